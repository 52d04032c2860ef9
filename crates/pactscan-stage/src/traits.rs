//! Stage abstraction trait
//!
//! This module defines the Stage trait that all staging backends must
//! implement, along with the error type surfaced to callers.

use crate::key::StageKey;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Stage operation errors.
///
/// Any backend failure is a hard failure of the enclosing operation; there
/// is no partial degradation. A missing entry is *not* an error - `get`
/// returns `Ok(None)` for expired, never-written, or already-cleaned keys.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Stage backend error: {0}")]
    BackendError(String),
}

/// Result type for stage operations
pub type StageResult<T> = Result<T, StageError>;

/// Transient staging area for uploaded file payloads.
///
/// Payloads are binary-safe and must round-trip exactly; backends must not
/// re-encode the bytes. Entries are never updated in place: a `put` on an
/// existing key overwrites silently (which cannot happen under normal key
/// construction, see [StageKey]).
#[async_trait]
pub trait Stage: Send + Sync {
    /// Store bytes under the key with the given time-to-live.
    async fn put(&self, key: &StageKey, data: Bytes, ttl: Duration) -> StageResult<()>;

    /// Fetch the payload for a key. Absent is a normal outcome.
    async fn get(&self, key: &StageKey) -> StageResult<Option<Bytes>>;

    /// Remove the entry for a key. Idempotent; safe to call when the key is
    /// already absent.
    async fn delete(&self, key: &StageKey) -> StageResult<()>;
}
