//! Text model abstraction.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the hosted language model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model transport error: {0}")]
    Transport(String),

    #[error("Model API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model response did not match the expected shape: {0}")]
    InvalidResponse(String),
}

/// A hosted generative text model.
///
/// The underlying model is probabilistic; callers must not assume
/// deterministic output. Tests substitute this trait with scripted doubles
/// rather than asserting on live output.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Submit a prompt and return the raw text completion.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Identifier of the underlying model, recorded on persisted analyses.
    fn model_id(&self) -> &str;
}
