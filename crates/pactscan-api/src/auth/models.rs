use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use pactscan_core::models::{Tier, UserProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by the session token issued at OAuth sign-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid, // user_id
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub plan: String, // "free" or "premium"
    pub exp: i64,     // expiration timestamp
    pub iat: i64,     // issued at timestamp
}

/// Authenticated user extracted from the session token and stored in
/// request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub tier: Tier,
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        AuthUser {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            tier: Tier::from_plan(&claims.plan),
        }
    }
}

impl AuthUser {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            tier: self.tier,
        }
    }
}

// Implement FromRequestParts for AuthUser to work with Multipart
// Extension cannot be used with Multipart, so we extract directly from request parts
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("No user session found", "UNAUTHORIZED")),
            )
        })
    }
}
