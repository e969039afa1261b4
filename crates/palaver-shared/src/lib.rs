//! # palaver-shared
//!
//! Utilities shared between the store and the client: identifier
//! generation and pure timestamp formatting for display.

pub mod ids;
pub mod time;
