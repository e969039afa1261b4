//! Periodic cache refresh.
//!
//! There is no push channel from the store, so the facade is refreshed
//! on a fixed interval to approximate live updates.  The timer is an
//! explicit task with a stop handle; it must not outlive the session,
//! so [`crate::state::AppState::logout`] stops it and the handle also
//! aborts the task when dropped.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::AppState;

/// Stop handle for a running refresher task.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Cancel the refresher.  Safe to call more than once.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the task has finished or been stopped.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task refreshing the facade's caches every `period`.
///
/// The task holds only a weak reference to the facade, so dropping the
/// facade ends the task on its next tick even without an explicit stop.
pub fn spawn_refresher(state: &Arc<Mutex<AppState>>, period: Duration) -> RefreshHandle {
    let weak: Weak<Mutex<AppState>> = Arc::downgrade(state);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let Some(state) = weak.upgrade() else { break };
            let Ok(mut guard) = state.lock() else { break };

            if let Err(e) = guard.refresh_chats() {
                tracing::warn!(error = %e, "periodic chat refresh failed");
            }
            if let Err(e) = guard.refresh_users() {
                tracing::warn!(error = %e, "periodic user refresh failed");
            }
        }
    });

    RefreshHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_store::{ChatStore, MemoryKv};

    fn shared_state() -> (Arc<Mutex<ChatStore>>, Arc<Mutex<AppState>>) {
        let mut store = ChatStore::new(Box::new(MemoryKv::new()));
        store.initialize().unwrap();
        let store = Arc::new(Mutex::new(store));

        let mut state = AppState::new(store.clone());
        state.login("1").unwrap();
        (store, Arc::new(Mutex::new(state)))
    }

    #[tokio::test]
    async fn test_poller_picks_up_store_mutations() {
        let (store, state) = shared_state();
        AppState::start_polling(&state, Duration::from_millis(10)).unwrap();

        store
            .lock()
            .unwrap()
            .append_message("chat-1-2", "2", "ping", None)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let guard = state.lock().unwrap();
        assert!(guard.is_polling());
        assert_eq!(guard.chats.first().unwrap().id, "chat-1-2");
    }

    #[tokio::test]
    async fn test_logout_stops_poller() {
        let (store, state) = shared_state();
        AppState::start_polling(&state, Duration::from_millis(10)).unwrap();

        state.lock().unwrap().logout().unwrap();

        // Mutations after logout are no longer mirrored into the cache.
        store
            .lock()
            .unwrap()
            .append_message("chat-1-2", "2", "ping", None)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let guard = state.lock().unwrap();
        assert!(!guard.is_polling());
        assert!(guard.chats.is_empty());
    }

    #[tokio::test]
    async fn test_dropping_the_facade_ends_the_task() {
        let (_store, state) = shared_state();
        let handle = spawn_refresher(&state, Duration::from_millis(10));

        drop(state);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(handle.is_stopped());
    }
}
