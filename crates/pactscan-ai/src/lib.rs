//! Pactscan AI Library
//!
//! Narrow adapters over the opaque external engines: PDF text extraction
//! (pdf-extract) and the hosted generative model (Gemini). Each adapter
//! exposes a pure input-to-output contract; the model is reached through
//! the [TextModel] trait so callers and tests can substitute doubles.

pub mod analyze;
pub mod classify;
pub mod extract;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
pub mod gemini;
pub mod model;

pub use analyze::{analyze_contract, ContractFindings};
pub use classify::classify_contract;
pub use extract::{extract_text, ExtractError};
pub use gemini::GeminiClient;
pub use model::{ModelError, TextModel};
