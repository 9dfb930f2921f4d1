//! AI responder: one completion call per command, never an error for the caller.
//!
//! Every failure of the completion API is logged and replaced by `APOLOGY`, so the
//! command handler always has something to send. The user cannot tell a refused
//! prompt from a network failure; the log can.

use std::sync::Arc;

use dioxus_logger::tracing;

use crate::server::{
    data::CompletionApi,
    error::completion::CompletionError,
    service::prompt::{self, ASK_CONTEXT, CODE_CONTEXT, ERROR_CONTEXT},
};

/// Sent in place of generated text whenever the completion API fails.
pub const APOLOGY: &str = "Sorry, I'm having trouble with the AI service right now.";

/// Language tag used to fence generated scripts.
pub const CODE_TAG: &str = "csharp";

/// Text to deliver for a command, and how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiReply {
    /// Plain Markdown text.
    Text(String),
    /// Source code to be fenced with `tag`.
    Code { body: String, tag: &'static str },
}

impl AiReply {
    /// Body text and optional fence tag, as the chunker expects them.
    pub fn parts(&self) -> (&str, Option<&str>) {
        match self {
            AiReply::Text(text) => (text, None),
            AiReply::Code { body, tag } => (body, Some(*tag)),
        }
    }
}

/// Wraps the completion API with the per-command system contexts.
#[derive(Clone)]
pub struct AiResponder {
    api: Arc<dyn CompletionApi>,
}

impl AiResponder {
    pub fn new(api: Arc<dyn CompletionApi>) -> Self {
        Self { api }
    }

    /// Issues one completion call for `user_prompt` under `system_context`.
    ///
    /// # Returns
    /// - `Ok(String)` - Generated text
    /// - `Err(CompletionError)` - The completion API failed
    pub async fn try_respond(
        &self,
        user_prompt: &str,
        system_context: &str,
    ) -> Result<String, CompletionError> {
        let prompt = prompt::build_prompt(system_context, user_prompt);
        self.api.generate(&prompt).await
    }

    /// Like `try_respond`, but answers with `APOLOGY` on any failure.
    pub async fn respond(&self, user_prompt: &str, system_context: &str) -> String {
        match self.try_respond(user_prompt, system_context).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Completion API error: {}", e);
                APOLOGY.to_string()
            }
        }
    }

    /// Answers a free-form Unity question.
    pub async fn answer_question(&self, question: &str) -> AiReply {
        AiReply::Text(
            self.respond(&prompt::ask_prompt(question), ASK_CONTEXT)
                .await,
        )
    }

    /// Generates a C# script for `description` within `category`.
    ///
    /// Unknown categories use the general hint. The code is taken out of the
    /// model's own fence, and any prose around it is dropped, so each delivered
    /// chunk can be fenced on its own. Output whose fences cannot be untangled is
    /// sent as plain text. On failure the apology is returned as plain text
    /// rather than as code.
    pub async fn generate_code(&self, description: &str, category: &str) -> AiReply {
        let user_prompt = prompt::code_prompt(description, category);

        match self.try_respond(&user_prompt, CODE_CONTEXT).await {
            Ok(text) => match prompt::extract_code(&text) {
                Some(body) => AiReply::Code {
                    body,
                    tag: CODE_TAG,
                },
                None => {
                    tracing::warn!("Generated script has unbalanced code fences, sending as text");
                    AiReply::Text(text)
                }
            },
            Err(e) => {
                tracing::error!("Completion API error: {}", e);
                AiReply::Text(APOLOGY.to_string())
            }
        }
    }

    /// Explains an error message, prefixed by a canned fix when one is known.
    ///
    /// An error that matches no known pattern gets no prefix; that is not a failure.
    pub async fn explain_error(&self, error_text: &str) -> AiReply {
        let prefix = prompt::quick_fix_prefix(error_text);
        let explanation = self
            .respond(&prompt::error_prompt(error_text), ERROR_CONTEXT)
            .await;

        AiReply::Text(format!("{prefix}{explanation}"))
    }
}
