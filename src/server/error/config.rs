use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot cannot reach Discord or the completion API without this variable.
    /// Check the `.env` file or the hosting platform's secret settings.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    ///
    /// Occurs for a non-numeric `PORT`, an unknown `ENVIRONMENT`, or a
    /// `GEMINI_API_BASE` that is not an absolute http(s) URL.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },
}
