//! Gateway connection stage tracking.
//!
//! Serenity reconnects shards on its own. These handlers only mirror what it
//! reports into `BotStatus`, so the liveness surface can tell a live session
//! from one that is reconnecting.

use dioxus_logger::tracing;
use serenity::all::{ConnectionStage, ShardStageUpdateEvent};

use crate::server::model::status::BotStatus;

/// Handles a resumed session by moving back to `Connected`.
pub async fn handle_resume(status: &BotStatus) {
    tracing::info!("Discord session resumed");
    status.mark_resumed().await;
}

/// Handles a shard stage change.
///
/// Leaving the `Connected` stage marks the bot disconnected. Re-entering it is
/// handled by `ready` or `resume`, which fire once the session is usable again.
///
/// # Arguments
/// - `status` - Shared bot status
/// - `event` - Old and new connection stage of the shard
pub async fn handle_shard_stage_update(status: &BotStatus, event: ShardStageUpdateEvent) {
    tracing::debug!(
        "Shard {} stage changed from {} to {}",
        event.shard_id,
        event.old,
        event.new
    );

    if is_disconnect(event.old, event.new) {
        tracing::warn!("Shard {} lost its gateway connection", event.shard_id);
        status.mark_disconnected().await;
    }
}

/// Whether a stage change leaves a usable session.
fn is_disconnect(old: ConnectionStage, new: ConnectionStage) -> bool {
    old == ConnectionStage::Connected && new != ConnectionStage::Connected
}
