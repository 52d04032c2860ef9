//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs so it can be
//! driven from tests as well as the binary.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::Result;
use pactscan_ai::GeminiClient;
use pactscan_core::Config;
use pactscan_db::{AnalysisRepository, CachedAnalysisStore};
use pactscan_stage::MemoryStage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production());
    tracing::info!(environment = %config.environment, "Configuration loaded");

    let pool = database::setup_database(&config).await?;

    let model = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?;

    let repository = AnalysisRepository::new(pool.clone());
    let analyses = CachedAnalysisStore::new(repository, config.record_cache_ttl());

    let state = Arc::new(AppState {
        config: config.clone(),
        pool,
        stage: Arc::new(MemoryStage::new()),
        model: Arc::new(model),
        analyses,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
