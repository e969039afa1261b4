//! # palaver-client
//!
//! Client-side state for the Palaver chat UI: the session (who is
//! logged in), the application state facade the presentation layer
//! reads from, and the polling refresher that keeps the facade's
//! caches in step with the store.

pub mod refresh;
pub mod session;
pub mod state;

mod error;

pub use error::{ClientError, Result};
pub use refresh::RefreshHandle;
pub use session::Session;
pub use state::AppState;

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, surfacing poisoning as a [`ClientError`] instead of
/// panicking inside presentation code.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| ClientError::LockPoisoned)
}
