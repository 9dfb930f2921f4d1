//! Gateway connection state and the status snapshot read by the liveness server.
//!
//! `BotStatus` is written only by the Discord event handler and the latency
//! sampler, and read by the liveness endpoints. Readers always receive a
//! `StatusSnapshot` copy so no lock is held across an HTTP response.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;

/// Lifecycle of the gateway connection.
///
/// `Closed` is terminal: once the bot has been shut down no later gateway
/// event can move it back to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Client exists but no identity has been assigned yet.
    Starting,
    /// Identity assigned and the shard is receiving events.
    Connected,
    /// Shard lost its connection and is reconnecting.
    Disconnected,
    /// Explicit shutdown.
    Closed,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Point-in-time copy of the bot's status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub state: ConnectionState,
    /// Username assigned by the gateway on ready.
    pub bot_name: Option<String>,
    pub guild_count: usize,
    /// Sum of member counts across all known guilds.
    pub user_count: u64,
    /// Most recent gateway heartbeat latency.
    pub latency: Option<Duration>,
}

impl StatusSnapshot {
    pub fn connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Latency in milliseconds, rounded to two decimals.
    pub fn latency_ms(&self) -> Option<f64> {
        let millis = self.latency?.as_secs_f64() * 1000.0;
        Some((millis * 100.0).round() / 100.0)
    }
}

struct StatusInner {
    state: ConnectionState,
    bot_name: Option<String>,
    /// Guild ID to member count.
    guilds: HashMap<u64, u64>,
    latency: Option<Duration>,
}

/// Shared, lock-protected bot status.
pub struct BotStatus {
    inner: RwLock<StatusInner>,
}

impl BotStatus {
    /// Creates a status in the `Starting` state with no guilds.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StatusInner {
                state: ConnectionState::Starting,
                bot_name: None,
                guilds: HashMap::new(),
                latency: None,
            }),
        }
    }

    /// Returns a copy of the current status.
    pub async fn snapshot(&self) -> StatusSnapshot {
        let inner = self.inner.read().await;

        StatusSnapshot {
            state: inner.state,
            bot_name: inner.bot_name.clone(),
            guild_count: inner.guilds.len(),
            user_count: inner.guilds.values().sum(),
            latency: inner.latency,
        }
    }

    pub async fn state(&self) -> ConnectionState {
        self.inner.read().await.state
    }

    /// Records the identity assigned on ready and the guilds it listed.
    ///
    /// Guilds already known keep their member counts; guilds missing from the
    /// ready payload are dropped.
    ///
    /// # Arguments
    /// - `bot_name` - Username of the bot account
    /// - `guild_ids` - Guilds listed in the ready payload
    pub async fn mark_connected(&self, bot_name: String, guild_ids: &[u64]) {
        let mut inner = self.inner.write().await;
        if inner.state == ConnectionState::Closed {
            return;
        }

        inner.state = ConnectionState::Connected;
        inner.bot_name = Some(bot_name);

        let previous = std::mem::take(&mut inner.guilds);
        inner.guilds = guild_ids
            .iter()
            .map(|id| (*id, previous.get(id).copied().unwrap_or(0)))
            .collect();
    }

    /// Moves back to `Connected` after a session resume.
    ///
    /// Ignored before the first ready, since a resume cannot assign an identity.
    pub async fn mark_resumed(&self) {
        let mut inner = self.inner.write().await;
        if inner.state == ConnectionState::Disconnected {
            inner.state = ConnectionState::Connected;
        }
    }

    /// Marks the connection as lost while the shard reconnects.
    pub async fn mark_disconnected(&self) {
        let mut inner = self.inner.write().await;
        if inner.state == ConnectionState::Connected {
            inner.state = ConnectionState::Disconnected;
        }
    }

    /// Marks the bot as shut down. Terminal.
    pub async fn mark_closed(&self) {
        let mut inner = self.inner.write().await;
        inner.state = ConnectionState::Closed;
        inner.latency = None;
    }

    /// Adds or refreshes a guild with its member count.
    pub async fn upsert_guild(&self, guild_id: u64, member_count: u64) {
        let mut inner = self.inner.write().await;
        inner.guilds.insert(guild_id, member_count);
    }

    /// Forgets a guild the bot has left or that became unavailable.
    pub async fn remove_guild(&self, guild_id: u64) {
        self.inner.write().await.guilds.remove(&guild_id);
    }

    pub async fn set_latency(&self, latency: Option<Duration>) {
        let mut inner = self.inner.write().await;
        if inner.state != ConnectionState::Closed {
            inner.latency = latency;
        }
    }
}

impl Default for BotStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the initial status before any gateway event.
    ///
    /// Expected: Starting, not connected, no identity or guilds
    #[tokio::test]
    async fn starts_disconnected() {
        let status = BotStatus::new();
        let snapshot = status.snapshot().await;

        assert_eq!(snapshot.state, ConnectionState::Starting);
        assert!(!snapshot.connected());
        assert_eq!(snapshot.bot_name, None);
        assert_eq!(snapshot.guild_count, 0);
        assert_eq!(snapshot.user_count, 0);
    }

    /// Tests the full lifecycle: ready, disconnect, resume, close.
    ///
    /// Expected: Each transition applies and Closed is terminal
    #[tokio::test]
    async fn follows_lifecycle() {
        let status = BotStatus::new();

        status.mark_connected("UnityBot".into(), &[1, 2]).await;
        assert_eq!(status.state().await, ConnectionState::Connected);

        status.mark_disconnected().await;
        assert_eq!(status.state().await, ConnectionState::Disconnected);

        status.mark_resumed().await;
        assert_eq!(status.state().await, ConnectionState::Connected);

        status.mark_closed().await;
        status.mark_resumed().await;
        status.mark_connected("UnityBot".into(), &[1]).await;
        assert_eq!(status.state().await, ConnectionState::Closed);
    }

    /// Tests that a resume before the first ready is ignored.
    ///
    /// Expected: State stays Starting
    #[tokio::test]
    async fn resume_requires_identity() {
        let status = BotStatus::new();

        status.mark_resumed().await;

        assert_eq!(status.state().await, ConnectionState::Starting);
    }

    /// Tests guild and member bookkeeping.
    ///
    /// Verifies member counts are summed, that a later ready keeps known counts,
    /// and that guilds absent from ready are dropped.
    ///
    /// Expected: Guild and user counts track upserts, removals, and ready
    #[tokio::test]
    async fn tracks_guilds() {
        let status = BotStatus::new();

        status.mark_connected("UnityBot".into(), &[1, 2, 3]).await;
        status.upsert_guild(1, 10).await;
        status.upsert_guild(2, 5).await;

        let snapshot = status.snapshot().await;
        assert_eq!(snapshot.guild_count, 3);
        assert_eq!(snapshot.user_count, 15);

        status.remove_guild(3).await;
        status.mark_connected("UnityBot".into(), &[1, 4]).await;

        let snapshot = status.snapshot().await;
        assert_eq!(snapshot.guild_count, 2);
        assert_eq!(snapshot.user_count, 10);
    }

    /// Tests latency rounding to two decimal places of milliseconds.
    ///
    /// Expected: 42.123ms reported as 42.12
    #[tokio::test]
    async fn reports_latency_in_milliseconds() {
        let status = BotStatus::new();
        let latency = Duration::from_micros(42_123);
        status.set_latency(Some(latency)).await;

        let snapshot = status.snapshot().await;

        assert_eq!(snapshot.latency_ms(), Some(42.12));
    }
}
