use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account entitlement level; selects analysis depth on the model side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Premium => write!(f, "premium"),
        }
    }
}

impl Tier {
    /// Parse a tier string; anything that is not "premium" falls back to free.
    pub fn from_plan(plan: &str) -> Self {
        if plan.eq_ignore_ascii_case("premium") {
            Tier::Premium
        } else {
            Tier::Free
        }
    }
}

/// Safe user profile returned to clients; never carries provider tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_plan() {
        assert_eq!(Tier::from_plan("premium"), Tier::Premium);
        assert_eq!(Tier::from_plan("PREMIUM"), Tier::Premium);
        assert_eq!(Tier::from_plan("free"), Tier::Free);
        assert_eq!(Tier::from_plan("unknown"), Tier::Free);
    }

    #[test]
    fn test_tier_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"premium\"");
        let tier: Tier = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(tier, Tier::Free);
    }
}
