//! First-run seed data.
//!
//! The store ships with a small cast of users and a few conversations
//! for user `"1"` so the client has something to show before any real
//! activity happens.  Timestamps are expressed as offsets from the
//! seeding instant.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Chat, Message, User};

fn user(id: &str, name: &str, online: bool, last_seen: Option<DateTime<Utc>>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            name.split_whitespace().next().unwrap_or(name)
        ),
        online,
        last_seen,
    }
}

fn message(id: &str, sender_id: &str, text: &str, timestamp: DateTime<Utc>, read: bool) -> Message {
    Message {
        id: id.to_string(),
        sender_id: sender_id.to_string(),
        text: text.to_string(),
        timestamp,
        read,
    }
}

fn chat(id: &str, participants: [&str; 2], messages: Vec<Message>, unread_count: u32) -> Chat {
    let last_message = messages.last().cloned();
    Chat {
        id: id.to_string(),
        participant_ids: [participants[0].to_string(), participants[1].to_string()],
        messages,
        last_message,
        unread_count,
    }
}

/// Default user set.
pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        user("1", "Alice Johnson", true, None),
        user("2", "Bob Smith", false, Some(now - Duration::hours(1))),
        user("3", "Charlie Davis", true, None),
        user("4", "Diana Wilson", false, Some(now - Duration::hours(24))),
        user("5", "Eve Martinez", true, None),
    ]
}

/// Default chat set for user `"1"`.
pub fn seed_chats(now: DateTime<Utc>) -> Vec<Chat> {
    vec![
        chat(
            "chat-1-2",
            ["1", "2"],
            vec![
                message(
                    "msg-1",
                    "2",
                    "Hey! How are you doing?",
                    now - Duration::seconds(7200),
                    true,
                ),
                message(
                    "msg-2",
                    "1",
                    "I'm great! Just finished a new project 🎉",
                    now - Duration::seconds(7000),
                    true,
                ),
                message(
                    "msg-3",
                    "2",
                    "That's awesome! Tell me more about it",
                    now - Duration::seconds(3600),
                    false,
                ),
            ],
            1,
        ),
        chat(
            "chat-1-3",
            ["1", "3"],
            vec![message(
                "msg-4",
                "3",
                "Want to grab coffee later?",
                now - Duration::seconds(1800),
                false,
            )],
            1,
        ),
        chat(
            "chat-1-4",
            ["1", "4"],
            vec![
                message(
                    "msg-5",
                    "1",
                    "Thanks for the help yesterday!",
                    now - Duration::seconds(172_800),
                    true,
                ),
                message(
                    "msg-6",
                    "4",
                    "No problem at all! Happy to help 😊",
                    now - Duration::seconds(172_700),
                    true,
                ),
            ],
            0,
        ),
        chat(
            "chat-1-5",
            ["1", "5"],
            vec![
                message(
                    "msg-7",
                    "5",
                    "Did you see the news today?",
                    now - Duration::seconds(900),
                    false,
                ),
                message(
                    "msg-8",
                    "5",
                    "It's pretty wild!",
                    now - Duration::seconds(890),
                    false,
                ),
            ],
            2,
        ),
    ]
}
