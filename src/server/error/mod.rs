//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for the liveness endpoints.

pub mod completion;
pub mod config;
pub mod delivery;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{completion::CompletionError, config::ConfigError, delivery::DeliveryError},
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Startup
/// code propagates it to `main`, which turns any variant into exit code 1. Command
/// handling never propagates it past the dispatch boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Completion API failure that was not downgraded to an apology.
    #[error(transparent)]
    CompletionErr(#[from] CompletionError),

    /// A response chunk could not be posted to Discord.
    #[error(transparent)]
    DeliveryErr(#[from] DeliveryError),

    /// HTTP client construction or request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Socket error while binding or serving the liveness server.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// The gateway connection is not established yet, or has been lost.
    ///
    /// Results in 503 Service Unavailable so uptime monitors treat it as down.
    #[error("Bot not ready")]
    NotReady,

    /// Discord connection could not be established within the retry budget.
    ///
    /// # Fields
    /// - Number of connection attempts made before giving up
    #[error("Failed to connect to Discord after {0} attempts")]
    ConnectExhausted(u32),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for server-side logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 503 Service Unavailable - For `NotReady`
/// - 500 Internal Server Error - For all other error types, with the detail logged
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorDto {
                    error: "Bot not ready".to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
