use std::time::Duration;

use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;

/// Deployment environment selected through `ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvVar {
                name: "ENVIRONMENT".to_string(),
                reason: format!("expected 'development' or 'production', got '{other}'"),
            }),
        }
    }
}

pub struct Config {
    pub discord_bot_token: String,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub gemini_timeout: Duration,

    pub environment: Environment,
    pub port: u16,
    /// Forces the liveness server on outside production.
    pub keep_alive: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset, matching how most hosting dashboards
    /// store a cleared secret.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of the named variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and optional ones valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &str| get(name).ok_or_else(|| missing(name));

        let discord_bot_token = require("DISCORD_BOT_TOKEN")?;
        let gemini_api_key = require("GEMINI_API_KEY")?;

        let environment = match get("ENVIRONMENT") {
            Some(value) => Environment::parse(&value)?,
            None => Environment::Development,
        };

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "PORT".to_string(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        let gemini_api_base = get("GEMINI_API_BASE")
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());
        validate_base_url(&gemini_api_base)?;

        let gemini_timeout = match get("GEMINI_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "GEMINI_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?,
            None => Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        };

        let gemini_model = get("GEMINI_MODEL")
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let keep_alive = get("KEEP_ALIVE").is_some_and(|value| is_truthy(&value));

        Ok(Self {
            discord_bot_token,
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            gemini_timeout,
            environment,
            port,
            keep_alive,
        })
    }

    /// Whether the liveness HTTP server should be started.
    pub fn liveness_enabled(&self) -> bool {
        self.environment == Environment::Production || self.keep_alive
    }
}

fn validate_base_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: "GEMINI_API_BASE".to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("unsupported scheme '{scheme}'"))),
    }
}

fn missing(name: &str) -> ConfigError {
    ConfigError::MissingEnvVar(name.to_string())
}

/// Whether a flag value means on, ignoring case.
fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    matches!(value.as_str(), "1" | "true" | "yes")
}
