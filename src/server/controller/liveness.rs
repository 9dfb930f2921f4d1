use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::api::{HealthDto, HomeDto, PingDto, StatsDto},
    server::{
        error::AppError,
        state::{AppState, BOT_NAME},
    },
};

/// Unix timestamp in seconds with millisecond precision.
fn unix_timestamp() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// `GET /` - bot name, running status, and whether Discord is connected.
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.status.snapshot().await;

    Json(HomeDto {
        name: BOT_NAME.to_string(),
        status: "running".to_string(),
        connected: snapshot.connected(),
        environment: state.environment.as_str().to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// `GET /health` - uptime monitor probe.
///
/// Every call is counted in `requests_served`.
///
/// # Returns
/// - `200 OK` - Gateway connection established, status `healthy`
/// - `503 Service Unavailable` - Starting, reconnecting, or closed, status `unhealthy`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    state.record_request();
    let snapshot = state.status.snapshot().await;

    let (code, status) = if snapshot.connected() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthDto {
            status: status.to_string(),
            connected: snapshot.connected(),
            guild_count: snapshot.guild_count,
            uptime_seconds: state.uptime_seconds(),
            timestamp: unix_timestamp(),
        }),
    )
}

/// `GET /stats` - guild, user, and command counts with latency.
///
/// # Returns
/// - `200 OK` - Statistics of the connected bot
/// - `503 Service Unavailable` - The bot is not connected
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.status.snapshot().await;
    if !snapshot.connected() {
        return Err(AppError::NotReady);
    }

    Ok((
        StatusCode::OK,
        Json(StatsDto {
            bot_name: snapshot.bot_name.clone(),
            guild_count: snapshot.guild_count,
            user_count: snapshot.user_count,
            command_count: state.command_count,
            latency_ms: snapshot.latency_ms(),
            uptime_seconds: state.uptime_seconds(),
            requests_served: state.requests_served(),
        }),
    ))
}

/// `GET /ping` - always answers, with the last sampled gateway latency.
pub async fn ping(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.status.snapshot().await;

    Json(PingDto {
        pong: true,
        latency_ms: snapshot.latency_ms(),
        timestamp: unix_timestamp(),
    })
}
