//! Classification Adapter: contract text to a contract-type label.

use crate::model::{ModelError, TextModel};

/// Bounded prefix of the contract text submitted for classification.
/// Bounds cost and latency of the model call; the opening clauses of a
/// contract are enough to identify its type.
const CLASSIFY_PREFIX_CHARS: usize = 2000;

/// Truncate to a character-boundary-safe prefix.
fn bounded_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Identify the contract type from its text. Returns a short label such as
/// "Employment", "Non-Disclosure Agreement", "Sales", or "Lease".
pub async fn classify_contract(
    model: &dyn TextModel,
    contract_text: &str,
) -> Result<String, ModelError> {
    let prompt = format!(
        "Analyze the given contract text and identify its type.\n\
         Respond with only the contract type as a single string \
         (e.g., \"Employment\", \"Non-Disclosure Agreement\", \"Sales\", \"Lease\", etc.).\n\
         Exclude any additional explanation or details.\n\n\
         Contract text:\n{}",
        bounded_prefix(contract_text, CLASSIFY_PREFIX_CHARS)
    );

    let label = model.generate(&prompt).await?.trim().to_string();
    if label.is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    tracing::debug!(label = %label, "Contract type detected");
    Ok(label)
}
