//! Demo shell for the Palaver client core.
//!
//! Opens the default on-disk store, seeds it on first run, logs in as
//! the first seed user and reports the chat list, then keeps the
//! facade polling until Ctrl-C.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use tracing_subscriber::{fmt, EnvFilter};

use palaver_client::{AppState, ClientError};
use palaver_shared::time::{format_chat_timestamp, truncate_text};
use palaver_store::{ChatStore, SqliteKv};

const POLL_PERIOD: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("palaver_client=debug,palaver_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "client failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ClientError> {
    let kv = SqliteKv::new().map_err(ClientError::Store)?;
    let mut store = ChatStore::new(Box::new(kv));
    store.initialize()?;

    let store = Arc::new(Mutex::new(store));
    let state = Arc::new(Mutex::new(AppState::new(store)));

    {
        let mut guard = state.lock().map_err(|_| ClientError::LockPoisoned)?;
        guard.login("1")?;

        let now = Local::now();
        for chat in &guard.chats {
            let preview = chat
                .last_message
                .as_ref()
                .map(|m| {
                    format!(
                        "{} ({})",
                        truncate_text(&m.text, 30),
                        format_chat_timestamp(&m.timestamp.with_timezone(&Local), &now)
                    )
                })
                .unwrap_or_else(|| "no messages yet".to_string());

            tracing::info!(
                chat = %chat.id,
                unread = chat.unread_count,
                last = %preview,
                "chat"
            );
        }
    }

    AppState::start_polling(&state, POLL_PERIOD)?;
    tracing::info!("polling for updates, Ctrl-C to quit");

    tokio::signal::ctrl_c().await.ok();

    state
        .lock()
        .map_err(|_| ClientError::LockPoisoned)?
        .logout()?;

    Ok(())
}
