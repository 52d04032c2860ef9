use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::pipeline::ContractPipeline;
use crate::state::AppState;
use crate::utils::upload::{extract_contract_upload, validate_file_size};
use axum::{
    extract::{Multipart, State},
    Json,
};
use pactscan_core::models::{AnalysisResponse, NewAnalysis};
use pactscan_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/contracts/analyze",
    tag = "contracts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Contract analyzed and persisted", body = AnalysisResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not a PDF file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn analyze_contract(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, HttpAppError> {
    let upload = extract_contract_upload(multipart).await?;
    validate_file_size(upload.data.len(), state.config.max_contract_size_bytes)?;
    tracing::debug!(
        filename = ?upload.filename,
        size = upload.data.len(),
        "Contract received for analysis"
    );

    let contract_type = upload
        .contract_type
        .ok_or_else(|| AppError::InvalidInput("No contract type provided".to_string()))?;

    let pipeline = ContractPipeline::new(&state);
    let analyzed = pipeline
        .analyze(user.user_id, upload.data, user.tier, &contract_type)
        .await?;

    let analysis = state
        .analyses
        .create(NewAnalysis {
            user_id: user.user_id,
            contract_type,
            summary: analyzed.findings.summary,
            risks: analyzed.findings.risks,
            opportunities: analyzed.findings.opportunities,
            extracted_text: analyzed.extracted_text,
            model: analyzed.model,
            language: "en".to_string(),
        })
        .await?;

    tracing::info!(analysis_id = %analysis.id, "Contract analysis persisted");
    Ok(Json(AnalysisResponse::from(analysis)))
}
