use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tokio::sync::watch;

/// Storage for the last accepted submission time per client key.
///
/// Timestamps are unix seconds. A key holds at most one timestamp; `record`
/// overwrites whatever was there.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    async fn last_accepted(&self, key: &str) -> Option<i64>;
    async fn record(&self, key: &str, at: i64);
    /// Drop entries last written before `cutoff`. Returns how many were removed.
    async fn purge_older_than(&self, cutoff: i64) -> usize;
}

/// Process-local cooldown store.
pub struct InMemoryCooldownStore {
    entries: DashMap<String, i64>,
}

impl InMemoryCooldownStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryCooldownStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CooldownStore for InMemoryCooldownStore {
    async fn last_accepted(&self, key: &str) -> Option<i64> {
        self.entries.get(key).map(|entry| *entry.value())
    }

    async fn record(&self, key: &str, at: i64) {
        self.entries.insert(key.to_string(), at);
    }

    async fn purge_older_than(&self, cutoff: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, at| *at >= cutoff);
        before.saturating_sub(self.entries.len())
    }
}

/// Hash a client address into a store key so raw IPs never sit in the store.
pub fn client_key(ip: IpAddr) -> String {
    let digest = Sha256::digest(ip.to_string().as_bytes());
    format!("last_submit_{}", hex::encode(digest))
}

/// Check whether `key` is still cooling down at `now`.
/// Returns Ok(()) or Err with retry-after seconds.
pub async fn check(
    store: &dyn CooldownStore,
    key: &str,
    now: i64,
    window_secs: u64,
) -> Result<(), u64> {
    let Some(last) = store.last_accepted(key).await else {
        return Ok(());
    };

    let elapsed = now.saturating_sub(last);
    let window = window_seconds(window_secs);
    if elapsed < window {
        return Err((window - elapsed.max(0)) as u64);
    }

    Ok(())
}

// Windows past i64::MAX saturate instead of wrapping negative.
fn window_seconds(window_secs: u64) -> i64 {
    i64::try_from(window_secs).unwrap_or(i64::MAX)
}

/// Periodically purge expired cooldown entries until shutdown is signaled.
pub fn spawn_sweeper(
    store: Arc<dyn CooldownStore>,
    window_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let cutoff = chrono::Utc::now()
                        .timestamp()
                        .saturating_sub(window_seconds(window_secs));
                    let removed = store.purge_older_than(cutoff).await;
                    if removed > 0 {
                        tracing::debug!("Purged {removed} expired cooldown entries");
                    }
                }
                _ = shutdown.changed() => break,
            }

            if *shutdown.borrow() {
                break;
            }
        }

        tracing::debug!("Cooldown sweeper stopped");
    })
}
