//! Pactscan DB Library
//!
//! Persistence for analysis records: the sqlx-backed repository, the
//! in-memory record cache, and the read-through store that combines them.

pub mod cache;
pub mod repository;

pub use cache::AnalysisCache;
pub use repository::AnalysisRepository;
pub use repository::CachedAnalysisStore;
