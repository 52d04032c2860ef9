//! Contract processing pipeline.
//!
//! Both request flows share one shape: stage the upload, run the adapters,
//! clean up the staged entry, respond. Cleanup is unconditional - it runs
//! on the failure path as well as the success path, so a failed model call
//! never leaves uploaded bytes behind. The TTL on the staged entry is only
//! a backstop for crashes between processing and cleanup.

use crate::state::AppState;
use bytes::Bytes;
use pactscan_ai::{analyze_contract, classify_contract, extract_text, ContractFindings, TextModel};
use pactscan_core::models::Tier;
use pactscan_core::AppError;
use pactscan_stage::{Stage, StageKey};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Output of the analysis flow, ready to persist.
#[derive(Debug)]
pub struct AnalyzedContract {
    pub findings: ContractFindings,
    pub extracted_text: String,
    pub model: String,
}

pub struct ContractPipeline {
    stage: Arc<dyn Stage>,
    model: Arc<dyn TextModel>,
    stage_ttl: Duration,
}

impl ContractPipeline {
    pub fn new(state: &AppState) -> Self {
        Self {
            stage: state.stage.clone(),
            model: state.model.clone(),
            stage_ttl: state.config.stage_ttl(),
        }
    }

    #[cfg(test)]
    fn with_parts(stage: Arc<dyn Stage>, model: Arc<dyn TextModel>, stage_ttl: Duration) -> Self {
        Self {
            stage,
            model,
            stage_ttl,
        }
    }

    /// Stage the upload, detect the contract type, clean up.
    pub async fn detect_type(&self, user_id: Uuid, data: Bytes) -> Result<String, AppError> {
        let key = self.stage_upload(user_id, data).await?;
        let result = self.run_detect(&key).await;
        self.finish(&key, result).await
    }

    /// Stage the upload, produce a validated analysis, clean up.
    pub async fn analyze(
        &self,
        user_id: Uuid,
        data: Bytes,
        tier: Tier,
        contract_type: &str,
    ) -> Result<AnalyzedContract, AppError> {
        let key = self.stage_upload(user_id, data).await?;
        let result = self.run_analyze(&key, tier, contract_type).await;
        self.finish(&key, result).await
    }

    async fn stage_upload(&self, user_id: Uuid, data: Bytes) -> Result<StageKey, AppError> {
        let key = StageKey::new(user_id);
        self.stage
            .put(&key, data, self.stage_ttl)
            .await
            .map_err(|e| AppError::Stage(e.to_string()))?;
        tracing::debug!(key = %key, "Upload staged");
        Ok(key)
    }

    async fn run_detect(&self, key: &StageKey) -> Result<String, AppError> {
        let text = self.extract_staged(key).await?;
        classify_contract(self.model.as_ref(), &text)
            .await
            .map_err(|e| AppError::Classification(e.to_string()))
    }

    async fn run_analyze(
        &self,
        key: &StageKey,
        tier: Tier,
        contract_type: &str,
    ) -> Result<AnalyzedContract, AppError> {
        let text = self.extract_staged(key).await?;
        let findings = analyze_contract(self.model.as_ref(), &text, tier, contract_type)
            .await
            .map_err(|e| AppError::Analysis(e.to_string()))?;
        Ok(AnalyzedContract {
            findings,
            extracted_text: text,
            model: self.model.model_id().to_string(),
        })
    }

    async fn extract_staged(&self, key: &StageKey) -> Result<String, AppError> {
        let data = self
            .stage
            .get(key)
            .await
            .map_err(|e| AppError::Stage(e.to_string()))?
            // A missing entry at this point is an extraction failure, not a
            // distinct condition: the caller aborts either way.
            .ok_or_else(|| AppError::Extraction("No file found".to_string()))?;

        extract_text(data.to_vec())
            .await
            .map_err(|e| AppError::Extraction(e.to_string()))
    }

    /// Unconditional cleanup, then resolve the request outcome. A cleanup
    /// failure fails an otherwise-successful request; on the error path the
    /// processing error wins and the cleanup failure is only logged.
    async fn finish<T>(&self, key: &StageKey, result: Result<T, AppError>) -> Result<T, AppError> {
        let cleanup = self.stage.delete(key).await;
        match (result, cleanup) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(AppError::Stage(e.to_string())),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                tracing::warn!(key = %key, error = %cleanup_err, "Stage cleanup failed");
                Err(e)
            }
        }
    }
}
