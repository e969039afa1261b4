//! # palaver-store
//!
//! Local conversation storage for the Palaver chat client.
//!
//! The crate owns the durable collections of users and chats and
//! enforces the invariants around them: one chat per participant pair,
//! append-only message ordering, and unread-count consistency. All
//! state lives in three named blobs (`users`, `chats`, `current_user`)
//! behind a small key-value abstraction, so the store itself never
//! cares whether the medium is SQLite on disk or a map in memory.

pub mod kv;
pub mod models;
pub mod seed;
pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use kv::{KeyValueStore, MemoryKv, SqliteKv};
pub use models::*;
pub use store::{ChatStore, Clock, SystemClock};
