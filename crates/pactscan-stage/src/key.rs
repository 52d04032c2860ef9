//! Stage key construction.

use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Composite key for one staged upload: owning user, creation timestamp,
/// and a random nonce.
///
/// The timestamp distinguishes sequential uploads by the same user; the
/// nonce closes the remaining race between two uploads landing in the same
/// millisecond. Keys are taken once at request admission and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageKey {
    user_id: Uuid,
    created_ms: i64,
    nonce: u32,
}

impl StageKey {
    /// Build a fresh key for an upload by the given user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            created_ms: chrono::Utc::now().timestamp_millis(),
            nonce: rand::random(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

impl Display for StageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "file:{}:{}:{:08x}",
            self.user_id, self.created_ms, self.nonce
        )
    }
}
