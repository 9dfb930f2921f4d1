//! Guild event handlers keeping guild and member counts current.
//!
//! `guild_create` fires for every guild after ready, when the bot joins a new
//! guild, and when a guild comes back after an outage. `guild_delete` fires when
//! the bot is removed or a guild becomes unavailable; both cases drop the guild
//! from the count until it is created again.

use dioxus_logger::tracing;
use serenity::all::{Guild, UnavailableGuild};

use crate::server::model::status::BotStatus;

/// Handles the guild_create event by recording the guild's member count.
///
/// # Arguments
/// - `status` - Shared bot status
/// - `guild` - Guild data from Discord
/// - `is_new` - Whether the bot just joined the guild, when known
pub async fn handle_guild_create(status: &BotStatus, guild: Guild, is_new: Option<bool>) {
    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild.id,
        guild.member_count,
    );

    if is_new == Some(true) {
        tracing::info!("Joined guild {} ({})", guild.name, guild.id);
    }

    let guild_id = guild.id.get();
    status.upsert_guild(guild_id, guild.member_count).await;
}

/// Handles the guild_delete event by dropping the guild from the counts.
pub async fn handle_guild_delete(status: &BotStatus, incomplete: UnavailableGuild) {
    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", incomplete.id);
    } else {
        tracing::info!("Removed from guild {}", incomplete.id);
    }

    status.remove_guild(incomplete.id.get()).await;
}
