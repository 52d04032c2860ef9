//! Extraction Adapter: staged PDF bytes to plain text.

use thiserror::Error;

/// Boundary inserted between consecutive pages in the combined text.
const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Not a well-formed PDF document: {0}")]
    Malformed(String),

    #[error("Document contains no extractable text")]
    EmptyText,

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

/// Decode the document page-by-page and return the concatenated text in
/// page order. Parsing is CPU-bound and runs on the blocking pool.
pub async fn extract_text(data: Vec<u8>) -> Result<String, ExtractError> {
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&data)
    })
    .await
    .map_err(|e| ExtractError::TaskFailed(e.to_string()))?
    .map_err(|e| ExtractError::Malformed(e.to_string()))?;

    let text = pages.join(PAGE_SEPARATOR);
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyText);
    }

    tracing::debug!(pages = pages.len(), text_len = text.len(), "PDF text extracted");
    Ok(text)
}
