//! Application state facade.
//!
//! [`AppState`] owns the cached, derived view of the store for the
//! current session.  Presentation code reads `users` and `chats` from
//! here and never touches the raw store; the caches are refreshed
//! explicitly after a mutation or periodically by the poller in
//! [`crate::refresh`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use palaver_store::{Chat, ChatStore, User};

use crate::error::Result;
use crate::refresh::{spawn_refresher, RefreshHandle};
use crate::session::Session;
use crate::lock;

/// Cached view of the store for the active session.
pub struct AppState {
    store: Arc<Mutex<ChatStore>>,
    session: Session,
    /// All known users, refreshed via [`AppState::refresh_users`].
    pub users: Vec<User>,
    /// The current user's chats, most recent first.  Empty when logged
    /// out.
    pub chats: Vec<Chat>,
    refresher: Option<RefreshHandle>,
}

impl AppState {
    /// Create an empty facade over the given store handle.
    pub fn new(store: Arc<Mutex<ChatStore>>) -> Self {
        let session = Session::new(store.clone());
        Self {
            store,
            session,
            users: Vec::new(),
            chats: Vec::new(),
            refresher: None,
        }
    }

    /// The session this facade serves.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Recompute the cached chat list for the current user.  No-op when
    /// logged out.
    pub fn refresh_chats(&mut self) -> Result<()> {
        let Some(user_id) = self.session.current_user()? else {
            return Ok(());
        };
        self.chats = lock(&self.store)?.list_chats_for_user(&user_id)?;
        Ok(())
    }

    /// Recompute the cached user list.
    pub fn refresh_users(&mut self) -> Result<()> {
        self.users = lock(&self.store)?.list_users()?;
        Ok(())
    }

    /// Log in as `user_id` and populate both caches.
    pub fn login(&mut self, user_id: &str) -> Result<()> {
        self.session.set_current_user(Some(user_id))?;
        self.refresh_chats()?;
        self.refresh_users()?;

        tracing::info!(user = user_id, "logged in");
        Ok(())
    }

    /// Log out: stop the poller, clear the session and the chat cache.
    /// The user cache is retained since it is session-independent.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(refresher) = self.refresher.take() {
            refresher.stop();
        }

        self.session.set_current_user(None)?;
        self.chats.clear();

        tracing::info!("logged out");
        Ok(())
    }

    /// Start refreshing this facade every `period` to approximate live
    /// updates.  Any previous poller is stopped first; [`AppState::logout`]
    /// stops the poller too.
    pub fn start_polling(state: &Arc<Mutex<AppState>>, period: Duration) -> Result<()> {
        let handle = spawn_refresher(state, period);
        let mut guard = lock(state)?;
        if let Some(old) = guard.refresher.replace(handle) {
            old.stop();
        }
        Ok(())
    }

    /// Whether a poller is currently attached.
    pub fn is_polling(&self) -> bool {
        self.refresher.as_ref().is_some_and(|r| !r.is_stopped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_store::MemoryKv;

    fn shared_store() -> Arc<Mutex<ChatStore>> {
        let mut store = ChatStore::new(Box::new(MemoryKv::new()));
        store.initialize().unwrap();
        Arc::new(Mutex::new(store))
    }

    #[test]
    fn test_login_populates_caches() {
        let mut state = AppState::new(shared_store());
        assert!(state.users.is_empty());
        assert!(state.chats.is_empty());

        state.login("1").unwrap();
        assert_eq!(state.users.len(), 5);
        assert_eq!(state.chats.len(), 4);

        // Seed recency: Eve's chat is the freshest, Diana's the oldest.
        assert_eq!(state.chats.first().unwrap().id, "chat-1-5");
        assert_eq!(state.chats.last().unwrap().id, "chat-1-4");
    }

    #[test]
    fn test_refresh_picks_up_mutations() {
        let store = shared_store();
        let mut state = AppState::new(store.clone());
        state.login("1").unwrap();

        store
            .lock()
            .unwrap()
            .append_message("chat-1-3", "3", "you around?", None)
            .unwrap();

        state.refresh_chats().unwrap();
        assert_eq!(state.chats.first().unwrap().id, "chat-1-3");
        assert_eq!(state.chats.first().unwrap().unread_count, 2);
    }

    #[test]
    fn test_refresh_chats_is_noop_when_logged_out() {
        let mut state = AppState::new(shared_store());
        state.refresh_chats().unwrap();
        assert!(state.chats.is_empty());
    }

    #[test]
    fn test_logout_clears_chats_keeps_users() {
        let store = shared_store();
        let mut state = AppState::new(store.clone());
        state.login("1").unwrap();

        state.logout().unwrap();
        assert!(state.chats.is_empty());
        assert_eq!(state.users.len(), 5);
        assert_eq!(store.lock().unwrap().current_user_id().unwrap(), None);
    }
}
