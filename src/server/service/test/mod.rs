use std::sync::{Arc, Mutex};

use serenity::async_trait;

use crate::server::{
    bot::reply::ReplyChannel,
    data::CompletionApi,
    error::completion::CompletionError,
    model::status::BotStatus,
    service::{dispatch::CommandService, rate_limit::RateLimiter, responder::AiResponder},
};

mod chunk;
mod responder;

/// One call made on a `RecordingReply`, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Acknowledged,
    Reply(String),
    FollowUp(String),
    Ephemeral(String),
}

/// Reply channel that records every send and can be told to fail.
#[derive(Default)]
pub struct RecordingReply {
    pub sent: Vec<Sent>,
    /// Zero-based index among reply/follow-up sends that should fail.
    fail_send_at: Option<usize>,
    fail_acknowledge: bool,
    sends: usize,
}

impl RecordingReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_send_at(index: usize) -> Self {
        Self {
            fail_send_at: Some(index),
            ..Self::default()
        }
    }

    pub fn failing_acknowledge() -> Self {
        Self {
            fail_acknowledge: true,
            ..Self::default()
        }
    }

    /// Contents of the reply and follow-ups, in send order.
    pub fn messages(&self) -> Vec<String> {
        self.sent
            .iter()
            .filter_map(|sent| match sent {
                Sent::Reply(content) | Sent::FollowUp(content) => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    fn next_send(&mut self) -> Result<(), serenity::Error> {
        let index = self.sends;
        self.sends += 1;
        if self.fail_send_at == Some(index) {
            return Err(serenity::Error::Other("send rejected"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReplyChannel for RecordingReply {
    async fn acknowledge(&mut self) -> Result<(), serenity::Error> {
        if self.fail_acknowledge {
            return Err(serenity::Error::Other("interaction expired"));
        }
        self.sent.push(Sent::Acknowledged);
        Ok(())
    }

    async fn reply(&mut self, content: &str) -> Result<(), serenity::Error> {
        self.next_send()?;
        tokio::task::yield_now().await;
        self.sent.push(Sent::Reply(content.to_string()));
        Ok(())
    }

    async fn follow_up(&mut self, content: &str) -> Result<(), serenity::Error> {
        self.next_send()?;
        tokio::task::yield_now().await;
        self.sent.push(Sent::FollowUp(content.to_string()));
        Ok(())
    }

    async fn notify_ephemeral(&mut self, content: &str) -> Result<(), serenity::Error> {
        self.sent.push(Sent::Ephemeral(content.to_string()));
        Ok(())
    }
}

/// Completion API fake answering every prompt the same way.
pub struct FakeCompletion {
    /// `None` makes every call fail.
    answer: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionApi for FakeCompletion {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => Err(CompletionError::HttpStatus {
                status: 503,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

/// Command service over `api` with a fresh in-memory rate limiter.
pub fn command_service(api: Arc<dyn CompletionApi>) -> CommandService {
    CommandService::new(
        RateLimiter::in_memory(),
        AiResponder::new(api),
        Arc::new(BotStatus::new()),
    )
}
