//! Background sync worker.
//!
//! Fetches a batch from the remote endpoint every N seconds and replaces the
//! local collection with it. Server data takes precedence; local additions
//! made since the previous sync are dropped. Each tick is awaited before the
//! next sleep, so ticks never overlap.

use crate::remote;
use crate::routes::AppState;
use std::sync::Arc;
use std::time::Duration;

pub async fn run_worker(state: Arc<AppState>) {
    log::info!(
        "[QUOTE_SYNC] Worker started (sync interval: {}s)",
        state.sync_interval_secs
    );
    let client = reqwest::Client::new();

    loop {
        tokio::time::sleep(Duration::from_secs(state.sync_interval_secs)).await;

        match sync_tick(&state, &client).await {
            Ok(count) => {
                let now = chrono::Utc::now().to_rfc3339();
                *state.last_sync_at.lock().await = Some(now);
                log::info!("[QUOTE_SYNC] Tick complete: {} quotes taken from server", count);
            }
            Err(e) => {
                // No retry, no backoff: the local collection stays untouched
                // and the next interval fires as scheduled.
                log::error!("[QUOTE_SYNC] Tick error: {}", e);
            }
        }
    }
}

/// One sync tick: fetch the server batch and replace the local collection.
async fn sync_tick(state: &Arc<AppState>, client: &reqwest::Client) -> Result<usize, String> {
    let posts = remote::fetch_posts(client, &state.sync_url, state.sync_limit).await?;
    let quotes = remote::posts_to_quotes(posts, state.sync_limit);
    let count = quotes.len();

    {
        let mut store = state.store.lock().await;
        store.replace_all(quotes)?;
    }

    *state.notification.lock().await = Some("Quotes synced with server!".to_string());
    Ok(count)
}
