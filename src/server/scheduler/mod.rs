//! Cron jobs running alongside the bot.

pub mod latency;
