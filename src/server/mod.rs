//! Discord bot backend and its liveness HTTP surface.
//!
//! This module contains the complete implementation: slash command handling on
//! top of Serenity, the completion API client, and the small Axum server that
//! reports connection health to uptime monitors.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Serenity event handlers, interaction replies, command registration
//! - **Service Layer** (`service/`) - Rate limiting, prompts, AI responder, chunking, dispatch
//! - **Data Layer** (`data/`) - Completion API client behind the `CompletionApi` trait
//! - **Model Layer** (`model/`) - Connection state, bot status, and command table types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Controller Layer** (`controller/`) - Liveness HTTP handlers
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - `BotContext` for command handling, `AppState` for liveness
//! - **Startup** (`startup`) - Construction of the HTTP client and command service
//! - **Router** (`router`) - Liveness routes and middleware layers
//! - **Liveness** (`liveness`) - Start and stop of the liveness server
//! - **Scheduler** (`scheduler/`) - Cron job sampling gateway latency
//!
//! # Command Flow
//!
//! 1. **Bot** receives a slash command interaction and builds a `CommandInvocation`
//! 2. **Service** checks the per-user cooldown, acknowledges, and builds the prompt
//! 3. **Data** calls the completion API; failures become a fixed apology
//! 4. **Service** splits the answer into chunks and delivers them in order
//! 5. **Bot** posts each chunk as the reply or a follow-up message

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod liveness;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
