//! Pactscan API
//!
//! HTTP surface for contract upload, type detection, and analysis. Handlers,
//! middleware, and application setup live here; domain types come from
//! pactscan-core and the adapters from pactscan-stage / pactscan-ai /
//! pactscan-db.

mod api_doc;
mod handlers;
mod services;
mod utils;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
