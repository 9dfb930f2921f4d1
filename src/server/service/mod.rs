//! Business logic layer for slash commands.
//!
//! Services sit between the Discord event handler and the completion API:
//!
//! - `rate_limit` - Per-user cooldown gate
//! - `prompt` - System contexts, prompt templates, and lookup tables
//! - `responder` - Fail-soft wrapper around the completion API
//! - `chunk` - Splitting and ordered delivery of long responses
//! - `command` - The slash command table
//! - `dispatch` - End-to-end handling of one invocation

pub mod chunk;
pub mod command;
pub mod dispatch;
pub mod prompt;
pub mod rate_limit;
pub mod responder;

#[cfg(test)]
mod test;
