use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One persisted, immutable contract-analysis result, exclusively owned by
/// the user that uploaded the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Analysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contract_type: String,
    pub summary: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub extracted_text: String,
    pub model: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

/// Database row for an analysis record. Risks and opportunities are stored
/// as JSONB arrays.
#[cfg(feature = "sqlx")]
#[derive(Debug, sqlx::FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contract_type: String,
    pub summary: String,
    pub risks: sqlx::types::Json<Vec<String>>,
    pub opportunities: sqlx::types::Json<Vec<String>>,
    pub extracted_text: String,
    pub model: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "sqlx")]
impl From<AnalysisRow> for Analysis {
    fn from(row: AnalysisRow) -> Self {
        Analysis {
            id: row.id,
            user_id: row.user_id,
            contract_type: row.contract_type,
            summary: row.summary,
            risks: row.risks.0,
            opportunities: row.opportunities.0,
            extracted_text: row.extracted_text,
            model: row.model,
            language: row.language,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a new analysis record; id and timestamp are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub user_id: Uuid,
    pub contract_type: String,
    pub summary: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub extracted_text: String,
    pub model: String,
    pub language: String,
}

/// API response shape for an analysis record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contract_type: String,
    pub summary: String,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub model: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        AnalysisResponse {
            id: analysis.id,
            user_id: analysis.user_id,
            contract_type: analysis.contract_type,
            summary: analysis.summary,
            risks: analysis.risks,
            opportunities: analysis.opportunities,
            model: analysis.model,
            language: analysis.language,
            created_at: analysis.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_response_serializes_camel_case() {
        let response = AnalysisResponse {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            contract_type: "Lease".to_string(),
            summary: "A lease agreement".to_string(),
            risks: vec![],
            opportunities: vec![],
            model: "gemini-pro".to_string(),
            language: "en".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("contractType").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("contract_type").is_none());
        // Responses never carry the extracted text; it stays server-side.
        assert!(json.get("extractedText").is_none());
    }
}
