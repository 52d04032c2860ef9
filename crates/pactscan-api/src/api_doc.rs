//! OpenAPI documentation.

use crate::error;
use crate::handlers;
use pactscan_core::models;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pactscan API",
        version = "0.1.0",
        description = "Contract analysis API. Upload a PDF contract to detect its type or to produce a persisted risk/opportunity analysis. All contract endpoints require a bearer session token."
    ),
    paths(
        handlers::detect_type::detect_contract_type,
        handlers::analyze::analyze_contract,
        handlers::contracts::list_contracts,
        handlers::contracts::get_contract,
        handlers::current_user::current_user,
    ),
    components(schemas(
        handlers::detect_type::DetectTypeResponse,
        models::AnalysisResponse,
        models::UserProfile,
        error::ErrorResponse,
    )),
    tags(
        (name = "contracts", description = "Contract upload and analysis"),
        (name = "auth", description = "Session introspection")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
