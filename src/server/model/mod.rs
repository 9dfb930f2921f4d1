//! Server-side domain models.
//!
//! Types shared between the Discord event handler, the command service layer, and
//! the liveness server. None of them carry platform-specific handles.

pub mod command;
pub mod status;
