use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from the durable key-value medium.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The referenced chat does not exist.
    #[error("Record not found")]
    NotFound,

    /// The message sender is not a participant of the target chat.
    #[error("Sender is not a participant of the chat")]
    NotAParticipant,

    /// A chat requires two distinct participants.
    #[error("Chat participants must be two distinct users")]
    IdenticalParticipants,

    /// Blob serialization failure.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
