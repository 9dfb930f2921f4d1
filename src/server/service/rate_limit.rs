//! Per-user command cooldown.
//!
//! The limiter only asks its store one question per invocation, so the in-memory
//! map can be replaced by a shared store without touching the dispatch code.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Minimum time between two rate-limited commands from the same user.
pub const COMMAND_COOLDOWN: Duration = Duration::from_secs(3);

/// Storage for the last allowed invocation of each user.
pub trait RateLimitStore: Send + Sync {
    /// Allows the invocation and records `now` if the user is off cooldown.
    ///
    /// A denied invocation must leave the stored timestamp untouched.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the invoker
    /// - `now` - Time of the invocation
    ///
    /// # Returns
    /// - `true` - No prior entry, or at least the cooldown has elapsed; `now` was recorded
    /// - `false` - Still on cooldown
    fn check_and_update(&self, user_id: u64, now: Instant) -> bool;
}

/// Process-local store. Entries are never evicted.
pub struct InMemoryRateLimitStore {
    cooldown: Duration,
    last_invocation: Mutex<HashMap<u64, Instant>>,
}

impl InMemoryRateLimitStore {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_invocation: Mutex::new(HashMap::new()),
        }
    }

    /// Number of users that have ever been allowed a command.
    #[cfg(test)]
    pub fn tracked_users(&self) -> usize {
        self.last_invocation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn check_and_update(&self, user_id: u64, now: Instant) -> bool {
        let mut last_invocation = self
            .last_invocation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(last) = last_invocation.get(&user_id) {
            // An out-of-order `now` counts as zero elapsed, keeping timestamps non-decreasing
            if now.saturating_duration_since(*last) < self.cooldown {
                return false;
            }
        }

        last_invocation.insert(user_id, now);
        true
    }
}

/// Cooldown gate consulted before every rate-limited command.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Limiter backed by an in-memory store with the standard cooldown.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRateLimitStore::new(COMMAND_COOLDOWN)))
    }

    /// Checks and records an invocation by `user_id` at the current time.
    pub fn allow(&self, user_id: u64) -> bool {
        self.store.check_and_update(user_id, Instant::now())
    }
}
