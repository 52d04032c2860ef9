//! Analysis Adapter: contract text to structured findings.
//!
//! The model's JSON payload is never trusted implicitly: the response is
//! deserialized against an explicit schema and any missing required field
//! fails the operation before anything is persisted.

use crate::model::{ModelError, TextModel};
use pactscan_core::models::Tier;
use serde::{Deserialize, Serialize};

/// Structured findings for one contract. All three fields are required in
/// the model response; risks and opportunities may be empty lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractFindings {
    pub summary: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

fn analysis_prompt(contract_text: &str, tier: Tier, contract_type: &str) -> String {
    let depth = match tier {
        Tier::Free => {
            "Provide a brief summary and list the 3 most significant risks \
             and the 3 most significant opportunities."
        }
        Tier::Premium => {
            "Provide a thorough summary covering obligations, termination, \
             liability, and payment terms, and list at least 10 risks and \
             10 opportunities with their practical impact."
        }
    };

    format!(
        "Analyze the following {} contract. {}\n\
         Respond with valid JSON only, using exactly this shape:\n\
         {{\"summary\": string, \"risks\": [string], \"opportunities\": [string]}}\n\n\
         Contract text:\n{}",
        contract_type, depth, contract_text
    )
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Produce a validated analysis of the contract. `tier` selects prompt
/// depth; the structural contract of the result is identical for both.
pub async fn analyze_contract(
    model: &dyn TextModel,
    contract_text: &str,
    tier: Tier,
    contract_type: &str,
) -> Result<ContractFindings, ModelError> {
    let prompt = analysis_prompt(contract_text, tier, contract_type);
    let raw = model.generate(&prompt).await?;

    let findings: ContractFindings = serde_json::from_str(strip_code_fence(&raw))
        .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

    if findings.summary.trim().is_empty() {
        return Err(ModelError::InvalidResponse(
            "summary is empty".to_string(),
        ));
    }

    tracing::debug!(
        risks = findings.risks.len(),
        opportunities = findings.opportunities.len(),
        "Contract analysis validated"
    );
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct ScriptedModel {
        reply: String,
        saw_prompt: std::sync::Mutex<String>,
    }

    impl ScriptedModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                saw_prompt: std::sync::Mutex::new(String::new()),
            }
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
            *self.saw_prompt.lock().unwrap() = prompt.to_string();
            Ok(self.reply.clone())
        }

        fn model_id(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_valid_response_is_parsed() {
        let model = ScriptedModel::new(
            r#"{"summary": "A lease.", "risks": ["late fees"], "opportunities": []}"#,
        );
        let findings = analyze_contract(&model, "text", Tier::Free, "Lease")
            .await
            .unwrap();
        assert_eq!(findings.summary, "A lease.");
        assert_eq!(findings.risks, vec!["late fees".to_string()]);
        assert!(findings.opportunities.is_empty());
    }

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let model = ScriptedModel::new(
            "```json\n{\"summary\": \"A lease.\", \"risks\": [], \"opportunities\": []}\n```",
        );
        let findings = analyze_contract(&model, "text", Tier::Premium, "Lease")
            .await
            .unwrap();
        assert_eq!(findings.summary, "A lease.");
    }

    #[tokio::test]
    async fn test_missing_required_field_is_rejected() {
        // No "opportunities" field: must fail validation, not default to empty.
        let model = ScriptedModel::new(r#"{"summary": "A lease.", "risks": []}"#);
        let err = analyze_contract(&model, "text", Tier::Free, "Lease")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_summary_is_rejected() {
        let model =
            ScriptedModel::new(r#"{"summary": "  ", "risks": [], "opportunities": []}"#);
        let err = analyze_contract(&model, "text", Tier::Free, "Lease")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_response_is_rejected() {
        let model = ScriptedModel::new("I cannot analyze this contract.");
        let err = analyze_contract(&model, "text", Tier::Free, "Lease")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_tier_selects_prompt_depth() {
        let reply = r#"{"summary": "ok", "risks": [], "opportunities": []}"#;

        let free = ScriptedModel::new(reply);
        analyze_contract(&free, "text", Tier::Free, "Lease")
            .await
            .unwrap();
        let free_prompt = free.saw_prompt.lock().unwrap().clone();

        let premium = ScriptedModel::new(reply);
        analyze_contract(&premium, "text", Tier::Premium, "Lease")
            .await
            .unwrap();
        let premium_prompt = premium.saw_prompt.lock().unwrap().clone();

        assert_ne!(free_prompt, premium_prompt);
        assert!(premium_prompt.contains("at least 10 risks"));
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }
}
