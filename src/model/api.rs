use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeDto {
    pub name: String,
    pub status: String,
    pub connected: bool,
    pub environment: String,
    pub uptime_seconds: f64,
}

/// Body of `GET /health`.
///
/// `status` is `"healthy"` only while the gateway connection is established.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub connected: bool,
    pub guild_count: usize,
    pub uptime_seconds: f64,
    /// Unix timestamp in seconds, with fractional milliseconds.
    pub timestamp: f64,
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDto {
    pub bot_name: Option<String>,
    pub guild_count: usize,
    pub user_count: u64,
    pub command_count: usize,
    pub latency_ms: Option<f64>,
    pub uptime_seconds: f64,
    pub requests_served: u64,
}

/// Body of `GET /ping`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingDto {
    pub pong: bool,
    pub latency_ms: Option<f64>,
    pub timestamp: f64,
}
