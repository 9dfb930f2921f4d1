//! Ready event handler for bot initialization.
//!
//! The `ready` event fires after the gateway handshake completes and assigns the
//! bot its identity. It is the transition into the `Connected` state, and the
//! point where presence is set and slash commands are registered.

use dioxus_logger::tracing;
use serenity::all::{ActivityData, Context, Ready};

use crate::server::{
    bot::command,
    model::status::{BotStatus, ConnectionState},
};

/// Presence shown under the bot's name.
const ACTIVITY: &str = "Unity development";

/// Handles the ready event when the bot connects to Discord.
///
/// Records the bot identity and guild list, sets presence, then registers the
/// slash commands. A failed registration is logged but does not disconnect the
/// bot, since previously registered commands keep working.
///
/// # Arguments
/// - `status` - Shared bot status to mark connected
/// - `ctx` - Discord context for setting activity and registering commands
/// - `ready` - Ready event data containing bot user and guild information
pub async fn handle_ready(status: &BotStatus, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    if status.state().await == ConnectionState::Disconnected {
        tracing::info!("Session could not be resumed, started a new one");
    }

    let guild_ids: Vec<u64> = ready.guilds.iter().map(|guild| guild.id.get()).collect();
    let bot_name = ready.user.name.clone();
    status.mark_connected(bot_name, &guild_ids).await;

    ctx.set_activity(Some(ActivityData::playing(ACTIVITY)));

    match command::register_commands(&ctx).await {
        Ok(count) => tracing::info!("Registered {} slash commands", count),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
