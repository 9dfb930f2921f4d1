//! JSON models exposed by the liveness HTTP surface.

pub mod api;
