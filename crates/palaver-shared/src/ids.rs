//! Identifier generation and derivation.
//!
//! Message ids are generated at append time from the message timestamp
//! plus a random suffix; uniqueness within one store lifetime is enough
//! since there is a single writer. Chat ids are *derived* from the
//! participant pair so that `(A, B)` and `(B, A)` name the same chat.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Length of the random suffix appended to generated ids.
const SUFFIX_LEN: usize = 9;

/// Generate a fresh opaque id: Unix millis plus a random suffix.
pub fn new_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &suffix[..SUFFIX_LEN])
}

/// Generate an id for a new message.
pub fn new_message_id(now: DateTime<Utc>) -> String {
    format!("msg-{}", new_id(now))
}

/// Derive the stable chat id for an unordered participant pair.
///
/// The pair is normalised by sorting lexicographically, so the result is
/// identical regardless of argument order.
pub fn chat_id(user_a: &str, user_b: &str) -> String {
    let (lo, hi) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("chat-{lo}-{hi}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_order_insensitive() {
        assert_eq!(chat_id("1", "2"), chat_id("2", "1"));
        assert_eq!(chat_id("1", "2"), "chat-1-2");
        assert_eq!(chat_id("bob", "alice"), "chat-alice-bob");
    }

    #[test]
    fn test_message_id_prefix_and_uniqueness() {
        let now = Utc::now();
        let a = new_message_id(now);
        let b = new_message_id(now);

        assert!(a.starts_with("msg-"));
        assert!(b.starts_with("msg-"));
        // Same instant, different random suffix.
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_id_embeds_millis() {
        let now = Utc::now();
        let id = new_id(now);
        assert!(id.starts_with(&now.timestamp_millis().to_string()));
    }
}
