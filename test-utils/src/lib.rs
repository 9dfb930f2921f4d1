//! Unitybot Test Utils
//!
//! Provides shared testing utilities for the unitybot crate. This crate offers a
//! running mock Gemini `generateContent` endpoint plus text fixtures for exercising
//! response chunking.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestContext**: Running mock server with helpers for mounting canned completions
//! - **gemini**: JSON shapes of the generateContent API
//! - **fixture**: Deterministic plain-text and code payloads of a requested size
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::context::TestContext;
//!
//! #[tokio::test]
//! async fn answers_question() {
//!     let test = TestContext::start().await;
//!     let mock = test.mock_completion("Use a Rigidbody.").await;
//!
//!     // Point a GeminiClient at test.base_url()...
//!
//!     mock.assert_calls(1);
//! }
//! ```

pub mod context;
pub mod fixture;
pub mod gemini;
