//! The locally acting user identity.
//!
//! A [`Session`] is constructed explicitly at application start and
//! handed to whatever needs it; there is no ambient global.  The
//! identity itself lives in the store's `current_user` record so it
//! survives restarts.

use std::sync::{Arc, Mutex};

use palaver_store::ChatStore;

use crate::error::Result;
use crate::lock;

/// Tracks which user is currently logged in on this client.
pub struct Session {
    store: Arc<Mutex<ChatStore>>,
}

impl Session {
    /// Create a session over the given store handle.
    pub fn new(store: Arc<Mutex<ChatStore>>) -> Self {
        Self { store }
    }

    /// Id of the logged-in user, or `None` when logged out.
    pub fn current_user(&self) -> Result<Option<String>> {
        Ok(lock(&self.store)?.current_user_id()?)
    }

    /// Log in (`Some`) or out (`None`).
    pub fn set_current_user(&self, user_id: Option<&str>) -> Result<()> {
        lock(&self.store)?.set_current_user(user_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_store::MemoryKv;

    #[test]
    fn test_login_logout_round_trip() {
        let store = Arc::new(Mutex::new(ChatStore::new(Box::new(MemoryKv::new()))));
        let session = Session::new(store);

        assert_eq!(session.current_user().unwrap(), None);

        session.set_current_user(Some("1")).unwrap();
        assert_eq!(session.current_user().unwrap().as_deref(), Some("1"));

        session.set_current_user(None).unwrap();
        assert_eq!(session.current_user().unwrap(), None);
    }
}
