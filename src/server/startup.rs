use std::sync::Arc;

use crate::server::{
    config::Config,
    data::gemini::{GeminiClient, GeminiConfig},
    error::AppError,
    model::status::BotStatus,
    service::{dispatch::CommandService, rate_limit::RateLimiter, responder::AiResponder},
};

/// Builds the HTTP client used for completion API requests.
///
/// Redirects are disabled so a misconfigured API base cannot bounce the API key
/// to another host. Per-request timeouts are applied by the completion client.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured HTTP client
/// - `Err(AppError::ReqwestErr)` - The TLS backend could not be initialised
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the completion client from configuration.
///
/// # Arguments
/// - `config` - Application configuration with the Gemini settings
/// - `http_client` - Shared HTTP client
///
/// # Returns
/// - `Ok(GeminiClient)` - Client ready to issue requests
/// - `Err(AppError::CompletionErr)` - The API key is blank
pub fn setup_gemini_client(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<GeminiClient, AppError> {
    let client = GeminiClient::new(
        http_client,
        GeminiConfig {
            api_base: config.gemini_api_base.clone(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            timeout: config.gemini_timeout,
        },
    )?;

    Ok(client)
}

/// Wires the command service: in-memory rate limiter, Gemini-backed responder.
///
/// # Arguments
/// - `config` - Application configuration
/// - `http_client` - Shared HTTP client
/// - `status` - Bot status read by `/ping`
///
/// # Returns
/// - `Ok(CommandService)` - Service ready to dispatch commands
/// - `Err(AppError)` - The completion client could not be built
pub fn setup_command_service(
    config: &Config,
    http_client: reqwest::Client,
    status: Arc<BotStatus>,
) -> Result<CommandService, AppError> {
    let gemini = setup_gemini_client(config, http_client)?;

    Ok(CommandService::new(
        RateLimiter::in_memory(),
        AiResponder::new(Arc::new(gemini)),
        status,
    ))
}
