use thiserror::Error;

/// Failures talking to the text-completion service.
///
/// None of these reach the end user: the AI responder logs them and answers
/// with a fixed apology instead.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// No API key was configured for the completion client.
    #[error("Completion API key is empty")]
    MissingApiKey,

    /// Transport failure, including request timeouts.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Completion API returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, as returned by the service
        body: String,
    },

    /// The response parsed but carried no usable text.
    #[error("Completion API returned an invalid response: {0}")]
    InvalidResponse(String),

    /// The response body was not the expected JSON shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
