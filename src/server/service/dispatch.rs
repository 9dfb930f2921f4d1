//! Command dispatch: rate limit, acknowledge, generate, deliver.
//!
//! `CommandService::dispatch` never returns an error. Throttling is answered with
//! an ephemeral notice, and any failure after the gate is logged and answered
//! with one generic notice, so a failed command cannot take down the handler.

use std::sync::Arc;

use dioxus_logger::tracing;

use crate::server::{
    bot::reply::ReplyChannel,
    error::AppError,
    model::{
        command::{CommandAction, CommandInvocation, CommandSpec, ParamSpec},
        status::BotStatus,
    },
    service::{
        chunk,
        command::{self, CATEGORY_PARAM, DESCRIPTION_PARAM, ERROR_PARAM, QUESTION_PARAM},
        rate_limit::RateLimiter,
        responder::{AiReply, AiResponder},
    },
};

/// Ephemeral notice for an invocation inside the cooldown window.
pub const THROTTLE_NOTICE: &str = "Please wait before using this command again.";

/// Sent once when handling fails after the rate limit gate.
pub const FAILURE_NOTICE: &str = "Sorry, I encountered an error.";

/// Ephemeral notice for a command name missing from the table.
pub const UNKNOWN_NOTICE: &str = "Unknown command.";

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The response was delivered in `chunks` messages.
    Delivered { chunks: usize },
    /// The user was on cooldown; no AI call was made.
    Throttled,
    /// Handling failed and the generic notice was attempted.
    Failed,
    /// The command is not in the table.
    Unknown,
}

/// Runs slash commands from the command table.
#[derive(Clone)]
pub struct CommandService {
    rate_limiter: RateLimiter,
    responder: AiResponder,
    status: Arc<BotStatus>,
}

impl CommandService {
    /// Creates the service.
    ///
    /// # Arguments
    /// - `rate_limiter` - Cooldown gate for AI commands
    /// - `responder` - AI responder used by every AI command
    /// - `status` - Bot status, read for `/ping` latency
    pub fn new(rate_limiter: RateLimiter, responder: AiResponder, status: Arc<BotStatus>) -> Self {
        Self {
            rate_limiter,
            responder,
            status,
        }
    }

    /// Handles one invocation end to end.
    ///
    /// # Arguments
    /// - `invocation` - Command name, invoker, and arguments
    /// - `reply` - Reply channel of the invocation
    ///
    /// # Returns
    /// - `DispatchOutcome` - How handling ended; errors are already logged
    pub async fn dispatch<R>(
        &self,
        invocation: &CommandInvocation,
        reply: &mut R,
    ) -> DispatchOutcome
    where
        R: ReplyChannel + ?Sized,
    {
        let Some(command) = command::find(&invocation.name) else {
            tracing::warn!("Received unknown command /{}", invocation.name);
            if let Err(e) = reply.notify_ephemeral(UNKNOWN_NOTICE).await {
                tracing::error!("Failed to send unknown command notice: {}", e);
            }
            return DispatchOutcome::Unknown;
        };

        tracing::debug!(
            "Dispatching /{} for user {}",
            command.name,
            invocation.user_id
        );

        if command.action == CommandAction::Ping {
            return self.ping(reply).await;
        }

        if !self.rate_limiter.allow(invocation.user_id) {
            tracing::debug!("User {} throttled on /{}", invocation.user_id, command.name);
            if let Err(e) = reply.notify_ephemeral(THROTTLE_NOTICE).await {
                tracing::error!("Failed to send throttle notice: {}", e);
            }
            return DispatchOutcome::Throttled;
        }

        match self.run(command, invocation, reply).await {
            Ok(chunks) => DispatchOutcome::Delivered { chunks },
            Err(e) => {
                tracing::error!("/{} command error: {}", command.name, e);
                if let Err(e) = reply.follow_up(FAILURE_NOTICE).await {
                    tracing::error!("Failed to send failure notice: {}", e);
                }
                DispatchOutcome::Failed
            }
        }
    }

    async fn run<R>(
        &self,
        command: &CommandSpec,
        invocation: &CommandInvocation,
        reply: &mut R,
    ) -> Result<usize, AppError>
    where
        R: ReplyChannel + ?Sized,
    {
        // Generation routinely outlasts Discord's initial response window
        reply.acknowledge().await?;

        let ai_reply = self.generate(command, invocation).await?;
        let (text, code_tag) = ai_reply.parts();

        Ok(chunk::deliver(reply, text, code_tag).await?)
    }

    async fn generate(
        &self,
        command: &CommandSpec,
        invocation: &CommandInvocation,
    ) -> Result<AiReply, AppError> {
        let reply = match command.action {
            CommandAction::Ask => {
                let question = required_arg(invocation, &QUESTION_PARAM)?;
                self.responder.answer_question(question).await
            }
            CommandAction::GenerateCode => {
                let description = required_arg(invocation, &DESCRIPTION_PARAM)?;
                let category = required_arg(invocation, &CATEGORY_PARAM)?;
                self.responder.generate_code(description, category).await
            }
            CommandAction::ExplainError => {
                let error_text = required_arg(invocation, &ERROR_PARAM)?;
                self.responder.explain_error(error_text).await
            }
            CommandAction::Ping => {
                let reason = "ping has no AI response".to_string();
                return Err(AppError::InternalError(reason));
            }
        };

        Ok(reply)
    }

    async fn ping<R>(&self, reply: &mut R) -> DispatchOutcome
    where
        R: ReplyChannel + ?Sized,
    {
        let snapshot = self.status.snapshot().await;
        let content = match snapshot.latency {
            Some(latency) => format!("Pong! {}ms", latency.as_millis()),
            None => "Pong! Latency has not been measured yet.".to_string(),
        };

        match reply.reply(&content).await {
            Ok(()) => DispatchOutcome::Delivered { chunks: 1 },
            Err(e) => {
                tracing::error!("Failed to send ping reply: {}", e);
                DispatchOutcome::Failed
            }
        }
    }
}

/// Resolves a parameter, applying its default when optional.
fn required_arg<'a>(
    invocation: &'a CommandInvocation,
    param: &'a ParamSpec,
) -> Result<&'a str, AppError> {
    invocation.arg(param).ok_or_else(|| {
        AppError::InternalError(format!(
            "/{} invoked without required argument '{}'",
            invocation.name, param.name
        ))
    })
}
