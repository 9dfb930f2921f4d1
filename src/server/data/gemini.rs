//! Google Gemini `generateContent` client.

use std::time::Duration;

use dioxus_logger::tracing;
use serde::Deserialize;
use serde_json::json;
use serenity::async_trait;

use crate::server::{data::CompletionApi, error::completion::CompletionError};

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    /// Per-request timeout; the only bound on how long a command waits for the model.
    pub timeout: Duration,
}

/// Completion client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client that sends requests through `http`.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `config` - API base, key, model, and timeout
    ///
    /// # Returns
    /// - `Ok(GeminiClient)` - Client ready to issue requests
    /// - `Err(CompletionError::MissingApiKey)` - The configured key is blank
    pub fn new(http: reqwest::Client, config: GeminiConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        Ok(Self { http, config })
    }

    fn generate_content_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.config.model)
    }
}

#[async_trait]
impl CompletionApi for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(self.generate_content_url())
            .query(&[("key", self.config.api_key.as_str())])
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        let text = parse_generate_content_response(&raw)?;
        tracing::debug!(
            "Gemini returned {} characters for a {} character prompt",
            text.chars().count(),
            prompt.chars().count()
        );

        Ok(text)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Extracts the generated text from a generateContent response body.
///
/// Text parts of the first candidate are concatenated in order.
fn parse_generate_content_response(raw: &str) -> Result<String, CompletionError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw)?;

    let candidate = parsed
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or_else(|| {
            let reason = parsed
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .unwrap_or_else(|| "unspecified".to_string());
            CompletionError::InvalidResponse(format!(
                "response contained no candidates (block reason: {reason})"
            ))
        })?;

    let text: String = candidate
        .content
        .and_then(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(CompletionError::InvalidResponse(format!(
            "candidate contained no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unspecified")
        )));
    }

    Ok(text)
}
