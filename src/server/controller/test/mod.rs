use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::server::{
    config::Environment, model::status::BotStatus, router, state::AppState,
};


/// Liveness state over a fresh `Starting` status, plus the router serving it.
fn setup() -> (Arc<BotStatus>, AppState, Router) {
    let status = Arc::new(BotStatus::new());
    let state = AppState::new(status.clone(), Environment::Production, 4);
    let app = router::router(state.clone());

    (status, state, app)
}

/// Sends a GET request and decodes the JSON response body.
async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> (StatusCode, T) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}
