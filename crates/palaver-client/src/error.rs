use thiserror::Error;

use palaver_store::StoreError;

/// Errors produced by the client layer.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A shared-state mutex was poisoned by a panicking holder.
    #[error("State lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
