use crate::auth::models::AuthUser;
use crate::error::ErrorResponse;
use axum::Json;
use pactscan_core::models::UserProfile;

#[utoipa::path(
    get,
    path = "/api/auth/current-user",
    tag = "auth",
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_user(user: AuthUser) -> Json<UserProfile> {
    Json(user.profile())
}
