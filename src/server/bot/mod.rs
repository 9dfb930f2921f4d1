//! Discord gateway integration for the slash command bot.
//!
//! This module is the only place that talks to Serenity directly. The event
//! handler keeps the shared `BotStatus` in step with the gateway connection and
//! turns each slash command interaction into a `CommandInvocation` for the
//! service layer, answering through an `InteractionReply`.
//!
//! The client is built once at startup and driven from `main`, which owns the
//! shard manager for shutdown and latency sampling.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is requested. Slash commands arrive as interactions regardless
//! of intents, and guild events are enough to count guilds and members.

pub mod command;
pub mod handler;
pub mod reply;
pub mod start;
