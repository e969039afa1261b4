//! The conversation store.
//!
//! [`ChatStore`] is the single authoritative representation of users and
//! chats.  Each operation is a synchronous read-modify-write of one of
//! the three named blobs (`users`, `chats`, `current_user`) in the
//! key-value medium.
//!
//! Invariants enforced here:
//! - at most one chat per unordered participant pair,
//! - `messages` is append-only with non-decreasing timestamps,
//! - a message's sender is always one of the chat's participants,
//! - `unread_count` and `last_message` stay consistent with `messages`.
//!
//! Read paths degrade to empty results on unknown ids; mutations that
//! target a missing chat fail with [`StoreError::NotFound`] because
//! silently dropping a user's send would be worse than surfacing it.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use palaver_shared::ids;

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::models::{Chat, Message, User};
use crate::seed;

const KEY_CURRENT_USER: &str = "current_user";
const KEY_USERS: &str = "users";
const KEY_CHATS: &str = "chats";

/// Source of the current instant, injectable for tests.
pub trait Clock: Send {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Authoritative store of users, chats, and the current-user record.
pub struct ChatStore {
    kv: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl ChatStore {
    /// Create a store over the given medium, using the system clock.
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self::with_clock(kv, Box::new(SystemClock))
    }

    /// Create a store with an explicit clock.
    pub fn with_clock(kv: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    // ------------------------------------------------------------------
    // Initialization
    // ------------------------------------------------------------------

    /// Seed the store with default users and chats if no prior state
    /// exists.  Idempotent: present, parseable blobs are left alone.
    ///
    /// A blob that fails to parse is treated as a cold-start condition
    /// and replaced by seed data; nothing recoverable is lost since the
    /// medium is local-only.
    pub fn initialize(&mut self) -> Result<()> {
        let now = self.clock.now();

        if self.read_blob::<Vec<User>>(KEY_USERS)?.is_none() {
            tracing::info!("seeding default users");
            self.write_blob(KEY_USERS, &seed::seed_users(now))?;
        }

        if self.read_blob::<Vec<Chat>>(KEY_CHATS)?.is_none() {
            tracing::info!("seeding default chats");
            self.write_blob(KEY_CHATS, &seed::seed_chats(now))?;
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Return all known users in stored order.
    pub fn list_users(&self) -> Result<Vec<User>> {
        self.load_users()
    }

    /// Set a user's presence flag.
    ///
    /// Going offline records the current time as `last_seen`; coming
    /// back online clears it.  An unknown `user_id` is ignored so stale
    /// ids from the presentation layer never crash the client.
    pub fn set_user_presence(&mut self, user_id: &str, online: bool) -> Result<()> {
        let mut users = self.load_users()?;

        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            tracing::debug!(user = user_id, "presence update for unknown user ignored");
            return Ok(());
        };

        user.online = online;
        user.last_seen = if online { None } else { Some(self.clock.now()) };

        self.save_users(&users)
    }

    // ------------------------------------------------------------------
    // Session record
    // ------------------------------------------------------------------

    /// Id of the locally acting user, if logged in.
    pub fn current_user_id(&self) -> Result<Option<String>> {
        self.kv.get(KEY_CURRENT_USER)
    }

    /// Set or clear the current-user record.
    pub fn set_current_user(&mut self, user_id: Option<&str>) -> Result<()> {
        match user_id {
            Some(id) => self.kv.set(KEY_CURRENT_USER, id),
            None => self.kv.remove(KEY_CURRENT_USER),
        }
    }

    // ------------------------------------------------------------------
    // Chats
    // ------------------------------------------------------------------

    /// Look up a chat by id.
    pub fn get_chat(&self, chat_id: &str) -> Result<Option<Chat>> {
        let chats = self.load_chats()?;
        Ok(chats.into_iter().find(|c| c.id == chat_id))
    }

    /// Find the chat whose participant set equals `{user_a, user_b}`,
    /// regardless of order.
    pub fn find_chat_by_participants(&self, user_a: &str, user_b: &str) -> Result<Option<Chat>> {
        let chats = self.load_chats()?;
        Ok(chats
            .into_iter()
            .find(|c| c.has_participant(user_a) && c.has_participant(user_b)))
    }

    /// Create the chat for a participant pair, or return the existing
    /// one.
    ///
    /// The id is derived from the sorted pair, so `(A, B)` and `(B, A)`
    /// always resolve to the same chat and repeated calls are
    /// idempotent.
    pub fn create_chat(&mut self, user_a: &str, user_b: &str) -> Result<Chat> {
        if user_a == user_b {
            return Err(StoreError::IdenticalParticipants);
        }

        if let Some(existing) = self.find_chat_by_participants(user_a, user_b)? {
            return Ok(existing);
        }

        let chat = Chat {
            id: ids::chat_id(user_a, user_b),
            participant_ids: [user_a.to_string(), user_b.to_string()],
            messages: Vec::new(),
            last_message: None,
            unread_count: 0,
        };

        let mut chats = self.load_chats()?;
        chats.push(chat.clone());
        self.save_chats(&chats)?;

        tracing::info!(chat = %chat.id, "created chat");
        Ok(chat)
    }

    /// Append a message to a chat.
    ///
    /// A fresh id is generated, `read` starts false, and the cached
    /// `last_message` is updated.  When the sender is not the current
    /// user the message counts as incoming and bumps `unread_count`.
    /// A caller-supplied timestamp older than the current tail is
    /// clamped to the tail so the sequence stays non-decreasing.
    pub fn append_message(
        &mut self,
        chat_id: &str,
        sender_id: &str,
        text: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Message> {
        let viewer = self.current_user_id()?;
        let mut chats = self.load_chats()?;

        let chat = chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or(StoreError::NotFound)?;

        if !chat.has_participant(sender_id) {
            return Err(StoreError::NotAParticipant);
        }

        let mut ts = timestamp.unwrap_or_else(|| self.clock.now());
        if let Some(last) = chat.messages.last() {
            if ts < last.timestamp {
                ts = last.timestamp;
            }
        }

        let message = Message {
            id: ids::new_message_id(ts),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            timestamp: ts,
            read: false,
        };

        chat.messages.push(message.clone());
        chat.last_message = Some(message.clone());

        if viewer.as_deref() != Some(sender_id) {
            chat.unread_count += 1;
        }

        self.save_chats(&chats)?;

        tracing::debug!(chat = chat_id, sender = sender_id, msg = %message.id, "appended message");
        Ok(message)
    }

    /// Mark every message in a chat as read and reset its unread count.
    /// Idempotent.
    pub fn mark_chat_as_read(&mut self, chat_id: &str) -> Result<()> {
        let mut chats = self.load_chats()?;

        let chat = chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or(StoreError::NotFound)?;

        chat.unread_count = 0;
        for msg in &mut chat.messages {
            msg.read = true;
        }

        self.save_chats(&chats)
    }

    /// Return the chats the user participates in, most recent activity
    /// first.  Chats with no messages sort last; ties break on chat id
    /// ascending so the order is deterministic.
    pub fn list_chats_for_user(&self, user_id: &str) -> Result<Vec<Chat>> {
        let mut chats: Vec<Chat> = self
            .load_chats()?
            .into_iter()
            .filter(|c| c.has_participant(user_id))
            .collect();

        chats.sort_by(|a, b| {
            b.last_activity()
                .cmp(&a.last_activity())
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(chats)
    }

    // ------------------------------------------------------------------
    // Blob helpers
    // ------------------------------------------------------------------

    fn load_users(&self) -> Result<Vec<User>> {
        Ok(self.read_blob(KEY_USERS)?.unwrap_or_default())
    }

    fn save_users(&mut self, users: &[User]) -> Result<()> {
        self.write_blob(KEY_USERS, &users)
    }

    fn load_chats(&self) -> Result<Vec<Chat>> {
        Ok(self.read_blob(KEY_CHATS)?.unwrap_or_default())
    }

    fn save_chats(&mut self, chats: &[Chat]) -> Result<()> {
        self.write_blob(KEY_CHATS, &chats)
    }

    /// Read and parse a blob.  A blob that fails to parse is logged and
    /// reported as absent, which lets `initialize` re-seed it.
    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt blob");
                Ok(None)
            }
        }
    }

    fn write_blob<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, &raw)
    }
}
