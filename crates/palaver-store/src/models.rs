//! Domain model structs persisted as JSON blobs in the key-value medium.
//!
//! Field names serialize in camelCase to match the persisted record
//! layout; timestamps round-trip as RFC 3339 instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A known user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image URI, opaque to the store.
    pub avatar: String,
    /// Presence flag.
    pub online: bool,
    /// When the user was last online.  Present only while offline;
    /// cleared on the transition back to online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message, exclusively owned by its [`Chat`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique id, generated at append time.
    pub id: String,
    /// Id of the sending user; always one of the chat's participants.
    pub sender_id: String,
    /// Message body.
    pub text: String,
    /// Creation time; non-decreasing within a chat.
    pub timestamp: DateTime<Utc>,
    /// Whether the message has been read by the other participant.
    pub read: bool,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// A two-party conversation and its message history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Stable id derived from the sorted participant pair.
    pub id: String,
    /// Exactly two distinct user ids.  Order is fixed at creation but
    /// carries no meaning for identity.
    pub participant_ids: [String; 2],
    /// Append-only message sequence in chronological order.
    pub messages: Vec<Message>,
    /// Cached projection of the tail of `messages`; `None` when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    /// Cached count of unread incoming messages.  Incremented on
    /// received-message append, reset by mark-as-read.
    pub unread_count: u32,
}

impl Chat {
    /// Whether the given user is one of the two participants.
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }

    /// Timestamp of the most recent message, or the Unix epoch when the
    /// chat has no messages yet (so empty chats sort last by recency).
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.messages
            .last()
            .map(|m| m.timestamp)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_chat() -> Chat {
        let t1 = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 5, 12, 5, 0).unwrap();
        let m1 = Message {
            id: "msg-a".into(),
            sender_id: "1".into(),
            text: "hi".into(),
            timestamp: t1,
            read: true,
        };
        let m2 = Message {
            id: "msg-b".into(),
            sender_id: "2".into(),
            text: "hey".into(),
            timestamp: t2,
            read: false,
        };
        Chat {
            id: "chat-1-2".into(),
            participant_ids: ["1".into(), "2".into()],
            messages: vec![m1, m2.clone()],
            last_message: Some(m2),
            unread_count: 1,
        }
    }

    #[test]
    fn test_chat_round_trip() {
        let chat = sample_chat();
        let json = serde_json::to_string(&chat).unwrap();
        let back: Chat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chat);
    }

    #[test]
    fn test_persisted_field_names() {
        let chat = sample_chat();
        let json = serde_json::to_string(&chat).unwrap();
        assert!(json.contains("\"participantIds\""));
        assert!(json.contains("\"lastMessage\""));
        assert!(json.contains("\"unreadCount\""));
        assert!(json.contains("\"senderId\""));
    }

    #[test]
    fn test_last_seen_omitted_when_online() {
        let user = User {
            id: "1".into(),
            name: "Alice".into(),
            avatar: "about:blank".into(),
            online: true,
            last_seen: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("lastSeen"));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_timestamps_round_trip_as_rfc3339() {
        let chat = sample_chat();
        let json = serde_json::to_value(&chat).unwrap();
        let raw = json["messages"][0]["timestamp"].as_str().unwrap();
        assert_eq!(raw, "2024-03-05T12:00:00Z");
    }

    #[test]
    fn test_last_activity() {
        let chat = sample_chat();
        assert_eq!(chat.last_activity(), chat.messages[1].timestamp);

        let empty = Chat {
            id: "chat-3-4".into(),
            participant_ids: ["3".into(), "4".into()],
            messages: Vec::new(),
            last_message: None,
            unread_count: 0,
        };
        assert_eq!(empty.last_activity(), DateTime::UNIX_EPOCH);
    }
}
