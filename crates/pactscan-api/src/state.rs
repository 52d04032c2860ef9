//! Application state shared across handlers.
//!
//! External clients (stage backend, model client, record store) are
//! constructed once at startup and injected here, so handlers never reach
//! for globals and tests can substitute doubles behind the traits.

use pactscan_ai::TextModel;
use pactscan_core::Config;
use pactscan_db::CachedAnalysisStore;
use pactscan_stage::Stage;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub stage: Arc<dyn Stage>,
    pub model: Arc<dyn TextModel>,
    pub analyses: CachedAnalysisStore,
}
