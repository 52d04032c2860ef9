//! Session authentication: bearer-token middleware and the request-scoped
//! authenticated-user context.

pub mod middleware;
pub mod models;

pub use middleware::{auth_middleware, AuthState};
pub use models::{AuthUser, SessionClaims};
