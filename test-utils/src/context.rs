use httpmock::{Method::POST, Mock, MockServer};
use serde_json::Value;

use crate::gemini::{completion_body, generate_content_path, TEST_API_KEY, TEST_MODEL};

/// Test context wrapping a running mock Gemini server.
///
/// Every mock mounted through this context only matches POST requests to the test
/// model's generateContent path carrying the test API key, so a request built with
/// the wrong URL or credential falls through to httpmock's default 404.
pub struct TestContext {
    /// The running mock server.
    ///
    /// Exposed so tests can mount additional mocks that the helpers don't cover.
    pub server: MockServer,
}

impl TestContext {
    /// Starts a new mock server with no mocks mounted.
    ///
    /// # Returns
    /// - New `TestContext` instance with a listening mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    /// Base URL to configure as the completion API base.
    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    /// Model name the mounted mocks answer for.
    pub fn model(&self) -> &'static str {
        TEST_MODEL
    }

    /// API key the mounted mocks require.
    pub fn api_key(&self) -> &'static str {
        TEST_API_KEY
    }

    /// Answers completion requests with `text` as the generated content.
    ///
    /// # Arguments
    /// - `text` - Text placed in the first candidate's only part
    ///
    /// # Returns
    /// - `Mock` - Handle for asserting how many requests were served
    pub async fn mock_completion(&self, text: &str) -> Mock<'_> {
        self.mock_completion_json(200, completion_body(text)).await
    }

    /// Answers completion requests with a JSON body and status.
    ///
    /// # Arguments
    /// - `status` - HTTP status code returned by the mock
    /// - `body` - JSON body returned by the mock
    ///
    /// # Returns
    /// - `Mock` - Handle for asserting how many requests were served
    pub async fn mock_completion_json(&self, status: u16, body: Value) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(generate_content_path(TEST_MODEL))
                    .query_param("key", TEST_API_KEY);
                then.status(status)
                    .header("content-type", "application/json")
                    .json_body(body);
            })
            .await
    }

    /// Answers completion requests with a plain text body and status.
    ///
    /// Used to simulate gateways and proxies that reply with non-JSON payloads.
    ///
    /// # Arguments
    /// - `status` - HTTP status code returned by the mock
    /// - `body` - Plain text body returned by the mock
    ///
    /// # Returns
    /// - `Mock` - Handle for asserting how many requests were served
    pub async fn mock_completion_raw(&self, status: u16, body: &str) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(generate_content_path(TEST_MODEL))
                    .query_param("key", TEST_API_KEY);
                then.status(status)
                    .header("content-type", "text/plain")
                    .body(body);
            })
            .await
    }

    /// Answers completion requests only after `delay`, to trip client timeouts.
    ///
    /// # Arguments
    /// - `delay` - Time the mock waits before responding
    ///
    /// # Returns
    /// - `Mock` - Handle for asserting how many requests were served
    pub async fn mock_slow_completion(&self, delay: std::time::Duration) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(generate_content_path(TEST_MODEL))
                    .query_param("key", TEST_API_KEY);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(completion_body("too late"))
                    .delay(delay);
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that a fresh context exposes a reachable base URL.
    ///
    /// Expected: Base URL uses http and the loopback host
    #[tokio::test]
    async fn start_exposes_base_url() {
        let test = TestContext::start().await;

        assert!(test.base_url().starts_with("http://127.0.0.1:"));
        assert_eq!(test.model(), TEST_MODEL);
        assert_eq!(test.api_key(), TEST_API_KEY);
    }
}
