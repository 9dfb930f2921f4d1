use serenity::all::{
    Context, EventHandler, Guild, Interaction, Ready, ResumedEvent, ShardStageUpdateEvent,
    UnavailableGuild,
};
use serenity::async_trait;

use crate::server::state::BotContext;

pub mod connection;
pub mod guild;
pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub bot: BotContext,
}

impl Handler {
    pub fn new(bot: BotContext) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.bot.status, ctx, ready).await;
    }

    /// Called when a dropped session is resumed
    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        connection::handle_resume(&self.bot.status).await;
    }

    /// Called when a shard moves between connection stages
    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        connection::handle_shard_stage_update(&self.bot.status, event).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.bot.status, guild, is_new).await;
    }

    /// Called when the bot leaves a guild or a guild becomes unavailable
    async fn guild_delete(
        &self,
        _ctx: Context,
        incomplete: UnavailableGuild,
        _full: Option<Guild>,
    ) {
        guild::handle_guild_delete(&self.bot.status, incomplete).await;
    }

    /// Called for every interaction; only slash commands are handled
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.bot, ctx, interaction).await;
    }
}
