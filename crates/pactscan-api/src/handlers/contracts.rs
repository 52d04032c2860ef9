use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use pactscan_core::models::AnalysisResponse;
use pactscan_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = "contracts",
    responses(
        (status = 200, description = "Caller's analysis records, newest first", body = Vec<AnalysisResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<AnalysisResponse>>, HttpAppError> {
    let analyses = state.analyses.list_by_user(user.user_id).await?;
    Ok(Json(
        analyses.into_iter().map(AnalysisResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contracts/{id}",
    tag = "contracts",
    params(
        ("id" = String, Path, description = "Analysis record id")
    ),
    responses(
        (status = 200, description = "Analysis record", body = AnalysisResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn get_contract(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResponse>, HttpAppError> {
    // Parse by hand so a malformed id becomes a 400 with the standard error
    // body instead of axum's plain-text rejection.
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::InvalidInput("Invalid analysis id".to_string()))?;

    let analysis = state
        .analyses
        .get_by_id(user.user_id, id)
        .await?
        // A record owned by someone else looks exactly like a missing one.
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

    Ok(Json(AnalysisResponse::from(analysis)))
}
