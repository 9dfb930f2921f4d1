//! External data sources.
//!
//! This module contains the clients the service layer reads generated content from.
//! The completion API is reached through the `CompletionApi` trait so services can
//! be exercised against fakes and alternative providers without touching call sites.

pub mod gemini;

use serenity::async_trait;

use crate::server::error::completion::CompletionError;

/// Single-shot text completion.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Generates text for `prompt`.
    ///
    /// # Returns
    /// - `Ok(String)` - Generated text
    /// - `Err(CompletionError)` - Transport, status, or response-shape failure
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError>;
}
