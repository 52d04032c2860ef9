//! In-process stage backend.
//!
//! Entries live in a `RwLock<HashMap>` with per-entry deadlines. Expired
//! entries become unreadable immediately and are physically reclaimed
//! lazily: on the read that observes expiry and by an opportunistic sweep
//! during writes. In a multi-node deployment this backend would be replaced
//! by a shared key-value store behind the same [Stage] trait.

use crate::key::StageKey;
use crate::traits::{Stage, StageError, StageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Sweep the whole map once it holds this many entries.
const SWEEP_THRESHOLD: usize = 256;

struct StagedEntry {
    data: Bytes,
    expires_at: Instant,
}

impl StagedEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory [Stage] implementation.
#[derive(Clone, Default)]
pub struct MemoryStage {
    entries: Arc<RwLock<HashMap<String, StagedEntry>>>,
}

impl MemoryStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries. Test and metrics helper.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Stage for MemoryStage {
    async fn put(&self, key: &StageKey, data: Bytes, ttl: Duration) -> StageResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        if entries.len() >= SWEEP_THRESHOLD {
            entries.retain(|_, e| !e.is_expired(now));
        }
        let previous = entries.insert(
            key.to_string(),
            StagedEntry {
                data,
                expires_at: now + ttl,
            },
        );
        if previous.is_some() {
            // Cannot happen under normal key construction; worth knowing about if it does.
            tracing::warn!(key = %key, "Stage key overwritten");
        }
        Ok(())
    }

    async fn get(&self, key: &StageKey) -> StageResult<Option<Bytes>> {
        let now = Instant::now();
        let rendered = key.to_string();
        {
            let entries = self.entries.read().await;
            match entries.get(&rendered) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.data.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // Entry exists but is expired: reclaim it under the write lock.
        let mut entries = self.entries.write().await;
        if entries.get(&rendered).is_some_and(|e| e.is_expired(now)) {
            entries.remove(&rendered);
        }
        Ok(None)
    }

    async fn delete(&self, key: &StageKey) -> StageResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(&key.to_string());
        Ok(())
    }
}
