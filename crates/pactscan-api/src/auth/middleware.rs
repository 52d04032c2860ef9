//! Bearer-token authentication middleware.
//!
//! Validates the session JWT and stores an [AuthUser] in request extensions
//! for handlers (and the [AuthUser] extractor) to pick up. Token issuance
//! itself happens at the OAuth callback, outside this service's scope.

use crate::auth::models::{AuthUser, SessionClaims};
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use pactscan_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    decoding_key: DecodingKey,
}

impl AuthState {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AppError::Unauthorized("Invalid or expired session".to_string())
            })
    }
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return HttpAppError(AppError::Unauthorized("No user session found".to_string()))
            .into_response();
    };

    let claims = match auth_state.verify(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn make_token(secret: &str, exp_offset_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "u@example.com".to_string(),
            name: None,
            plan: "free".to_string(),
            exp: now + exp_offset_secs,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_is_accepted() {
        let state = AuthState::new("secret");
        let token = make_token("secret", 3600);
        let claims = state.verify(&token).unwrap();
        assert_eq!(claims.email, "u@example.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let state = AuthState::new("secret");
        let token = make_token("secret", -3600);
        assert!(state.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let state = AuthState::new("secret");
        let token = make_token("other-secret", 3600);
        assert!(state.verify(&token).is_err());
    }
}
