//! Test fixtures providing reusable response payloads.
//!
//! Fixtures build deterministic strings of a requested size so chunking tests can
//! assert exact chunk counts and boundaries without hand-writing long literals.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let answer = fixture::text::plain(5000);
//! let script = fixture::text::code_lines(120, 40);
//! ```

pub mod text;
