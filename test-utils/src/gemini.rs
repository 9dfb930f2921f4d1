//! Wire shapes of the Gemini `generateContent` API used by mocks.

use serde_json::{json, Value};

/// Model name the mock endpoint is mounted under.
pub const TEST_MODEL: &str = "gemini-test";

/// API key the mock endpoint expects in the `key` query parameter.
pub const TEST_API_KEY: &str = "test-gemini-key";

/// Path of the generateContent endpoint for `model`, relative to the API base.
pub fn generate_content_path(model: &str) -> String {
    format!("/models/{model}:generateContent")
}

/// Successful generateContent body carrying a single text part.
pub fn completion_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
}

/// Successful body whose text is split across several parts of one candidate.
pub fn multi_part_body(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}

/// Body returned when the prompt was blocked and no candidate was produced.
pub fn blocked_body() -> Value {
    json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    })
}

/// Error body in the shape Google returns alongside non-2xx statuses.
pub fn error_body(status: u16, message: &str) -> Value {
    json!({
        "error": {
            "code": status,
            "message": message,
            "status": "INVALID_ARGUMENT"
        }
    })
}
