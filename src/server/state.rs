//! Shared state built once at startup.
//!
//! Two views of the same process are handed out. `BotContext` goes to the
//! Discord event handler and holds everything command handling needs.
//! `AppState` goes to the liveness router and only reads the shared
//! `BotStatus`; its one writable field is its own request counter, so liveness
//! traffic cannot affect command handling.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

use crate::server::{
    config::Environment, model::status::BotStatus, service::dispatch::CommandService,
};

/// Name reported by the liveness home endpoint.
pub const BOT_NAME: &str = "Unity AI Discord Bot";

/// State used by the Discord event handler.
#[derive(Clone)]
pub struct BotContext {
    /// Connection state, guild counts, and latency, updated from gateway events.
    pub status: Arc<BotStatus>,

    /// Dispatcher for slash commands.
    pub commands: Arc<CommandService>,
}

impl BotContext {
    pub fn new(status: Arc<BotStatus>, commands: CommandService) -> Self {
        Self {
            status,
            commands: Arc::new(commands),
        }
    }
}

/// State used by the liveness HTTP handlers.
///
/// All fields are cheap to clone; clones share the status and the counter.
#[derive(Clone)]
pub struct AppState {
    /// Read-only view of the bot status.
    pub status: Arc<BotStatus>,

    /// Process start, for uptime reporting.
    pub started_at: Instant,

    /// Health checks served since startup.
    pub requests_served: Arc<AtomicU64>,

    pub environment: Environment,

    /// Number of slash commands in the command table.
    pub command_count: usize,
}

impl AppState {
    /// Creates the liveness state.
    ///
    /// # Arguments
    /// - `status` - Bot status shared with the event handler
    /// - `environment` - Deployment environment, reported on the home endpoint
    /// - `command_count` - Number of registered slash commands
    ///
    /// # Returns
    /// - `AppState` - State with uptime starting now and no requests served
    pub fn new(status: Arc<BotStatus>, environment: Environment, command_count: usize) -> Self {
        Self {
            status,
            started_at: Instant::now(),
            requests_served: Arc::new(AtomicU64::new(0)),
            environment,
            command_count,
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Counts one more served health check and returns the new total.
    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }
}
