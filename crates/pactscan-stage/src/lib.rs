//! Pactscan Stage Library
//!
//! The Ephemeral Object Stage: a transient key-value area holding raw
//! uploaded bytes between upload and text extraction. Entries are created
//! with a TTL and deleted explicitly after processing; the TTL is a leak
//! backstop for abandoned or failed requests, never the primary cleanup
//! mechanism.
//!
//! # Key format
//!
//! Stage keys are request-scoped: `file:{user_id}:{millis}:{nonce}`. The
//! nonce component makes concurrent uploads by the same user within the
//! same millisecond collision-free.

pub mod key;
pub mod memory;
pub mod traits;

pub use key::StageKey;
pub use memory::MemoryStage;
pub use traits::{Stage, StageError, StageResult};
