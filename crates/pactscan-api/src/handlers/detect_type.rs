use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::pipeline::ContractPipeline;
use crate::state::AppState;
use crate::utils::upload::{extract_contract_upload, validate_file_size};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectTypeResponse {
    pub detected_type: String,
}

#[utoipa::path(
    post,
    path = "/api/contracts/detect-type",
    tag = "contracts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Contract type detected", body = DetectTypeResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not a PDF file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn detect_contract_type(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<DetectTypeResponse>, HttpAppError> {
    let upload = extract_contract_upload(multipart).await?;
    validate_file_size(upload.data.len(), state.config.max_contract_size_bytes)?;
    tracing::debug!(
        filename = ?upload.filename,
        size = upload.data.len(),
        "Contract received for type detection"
    );

    let pipeline = ContractPipeline::new(&state);
    let detected_type = pipeline.detect_type(user.user_id, upload.data).await?;

    tracing::info!(detected_type = %detected_type, "Contract type detected");
    Ok(Json(DetectTypeResponse { detected_type }))
}
