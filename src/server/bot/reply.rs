//! Reply channel for a single slash command interaction.
//!
//! The service layer talks to Discord only through `ReplyChannel`, which keeps
//! chunked delivery and dispatch testable without a gateway connection.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::async_trait;

/// Request/response handle of one command invocation.
#[async_trait]
pub trait ReplyChannel: Send {
    /// Shows a provisional "thinking" placeholder.
    ///
    /// Must be called within Discord's initial response window when the real
    /// reply will take longer.
    async fn acknowledge(&mut self) -> Result<(), serenity::Error>;

    /// Sends the direct reply to the invocation, replacing the placeholder if
    /// one was shown.
    async fn reply(&mut self, content: &str) -> Result<(), serenity::Error>;

    /// Sends an additional message on the same interaction.
    async fn follow_up(&mut self, content: &str) -> Result<(), serenity::Error>;

    /// Sends a message only the invoking user can see.
    async fn notify_ephemeral(&mut self, content: &str) -> Result<(), serenity::Error>;
}

/// `ReplyChannel` backed by a Serenity command interaction.
pub struct InteractionReply {
    ctx: Context,
    interaction: CommandInteraction,
    /// Whether an initial response (deferred or final) has been sent.
    responded: bool,
}

impl InteractionReply {
    pub fn new(ctx: Context, interaction: CommandInteraction) -> Self {
        Self {
            ctx,
            interaction,
            responded: false,
        }
    }
}

#[async_trait]
impl ReplyChannel for InteractionReply {
    async fn acknowledge(&mut self) -> Result<(), serenity::Error> {
        self.interaction.defer(&self.ctx).await?;
        self.responded = true;
        Ok(())
    }

    async fn reply(&mut self, content: &str) -> Result<(), serenity::Error> {
        if self.responded {
            self.interaction
                .edit_response(&self.ctx, EditInteractionResponse::new().content(content))
                .await?;
        } else {
            let message = CreateInteractionResponseMessage::new().content(content);
            self.interaction
                .create_response(&self.ctx, CreateInteractionResponse::Message(message))
                .await?;
            self.responded = true;
        }

        Ok(())
    }

    async fn follow_up(&mut self, content: &str) -> Result<(), serenity::Error> {
        self.interaction
            .create_followup(
                &self.ctx,
                CreateInteractionResponseFollowup::new().content(content),
            )
            .await?;

        Ok(())
    }

    async fn notify_ephemeral(&mut self, content: &str) -> Result<(), serenity::Error> {
        if self.responded {
            self.interaction
                .create_followup(
                    &self.ctx,
                    CreateInteractionResponseFollowup::new()
                        .content(content)
                        .ephemeral(true),
                )
                .await?;
        } else {
            let message = CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true);
            self.interaction
                .create_response(&self.ctx, CreateInteractionResponse::Message(message))
                .await?;
            self.responded = true;
        }

        Ok(())
    }
}
