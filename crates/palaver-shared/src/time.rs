//! Timestamp formatting for display.
//!
//! Pure functions: the current instant is always passed in explicitly so
//! the presentation layer decides the timezone and tests stay
//! deterministic.

use chrono::{DateTime, TimeZone};

/// Format a time of day, e.g. `"2:30 PM"`.
pub fn format_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%-I:%M %p").to_string()
}

/// Format a chat-list timestamp relative to `now`.
///
/// Today collapses to the time of day, yesterday to `"Yesterday"`, the
/// last week to a short weekday name, anything older to `m/d/yy`.
pub fn format_chat_timestamp<Tz: TimeZone>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let days = (now.date_naive() - date.date_naive()).num_days();

    if days == 0 {
        format_time(date)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        date.format("%a").to_string()
    } else {
        date.format("%-m/%-d/%y").to_string()
    }
}

/// Format the timestamp shown on a message bubble.
pub fn format_message_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_time(date)
}

/// Format a last-seen line, e.g. `"last seen today at 2:30 PM"`.
pub fn format_last_seen<Tz: TimeZone>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let days = (now.date_naive() - date.date_naive()).num_days();

    if days == 0 {
        format!("last seen today at {}", format_time(date))
    } else if days == 1 {
        format!("last seen yesterday at {}", format_time(date))
    } else {
        format!(
            "last seen {} at {}",
            date.format("%b %-d"),
            format_time(date)
        )
    }
}

/// Truncate text to `max_len` characters, appending `"..."` when cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{cut}...")
}
