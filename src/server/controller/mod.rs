//! HTTP request handlers for the liveness surface.
//!
//! Handlers read a fresh `BotStatus` snapshot on every request; nothing is cached
//! between requests.

pub mod liveness;

#[cfg(test)]
mod test;
