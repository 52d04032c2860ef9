//! In-memory cache for analysis records.
//!
//! Records are immutable after creation, so entries are never invalidated;
//! they simply expire. The cache is keyed by record id and ownership is
//! re-checked on every hit so a cached record can never leak across users.

use pactscan_core::models::Analysis;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

struct CachedRecord {
    analysis: Analysis,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct AnalysisCache {
    entries: Arc<RwLock<HashMap<Uuid, CachedRecord>>>,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Fetch a cached record if it is live and owned by `user_id`. A foreign
    /// owner is indistinguishable from a miss.
    pub async fn get_owned(&self, user_id: Uuid, id: Uuid) -> Option<Analysis> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(&id) {
                Some(cached) if now < cached.expires_at => {
                    if cached.analysis.user_id == user_id {
                        return Some(cached.analysis.clone());
                    }
                    return None;
                }
                Some(_) => {}
                None => return None,
            }
        }
        let mut entries = self.entries.write().await;
        if entries.get(&id).is_some_and(|c| now >= c.expires_at) {
            entries.remove(&id);
        }
        None
    }

    pub async fn insert(&self, analysis: Analysis) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, c| now < c.expires_at);
        entries.insert(
            analysis.id,
            CachedRecord {
                analysis,
                expires_at: now + self.ttl,
            },
        );
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(user_id: Uuid) -> Analysis {
        Analysis {
            id: Uuid::new_v4(),
            user_id,
            contract_type: "Lease".to_string(),
            summary: "A lease agreement".to_string(),
            risks: vec!["late fees".to_string()],
            opportunities: vec![],
            extracted_text: "This lease agreement...".to_string(),
            model: "gemini-pro".to_string(),
            language: "en".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_hit_returns_identical_record() {
        let cache = AnalysisCache::new(Duration::from_secs(3600));
        let user_id = Uuid::new_v4();
        let analysis = record(user_id);
        cache.insert(analysis.clone()).await;

        let first = cache.get_owned(user_id, analysis.id).await.unwrap();
        let second = cache.get_owned(user_id, analysis.id).await.unwrap();
        assert_eq!(first, analysis);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_foreign_owner_is_a_miss() {
        let cache = AnalysisCache::new(Duration::from_secs(3600));
        let owner = Uuid::new_v4();
        let analysis = record(owner);
        cache.insert(analysis.clone()).await;

        let other = Uuid::new_v4();
        assert!(cache.get_owned(other, analysis.id).await.is_none());
        // The record is still there for its actual owner.
        assert!(cache.get_owned(owner, analysis.id).await.is_some());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = AnalysisCache::new(Duration::from_millis(20));
        let user_id = Uuid::new_v4();
        let analysis = record(user_id);
        cache.insert(analysis.clone()).await;

        assert!(cache.get_owned(user_id, analysis.id).await.is_some());
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(cache.get_owned(user_id, analysis.id).await.is_none());
        assert_eq!(cache.len().await, 0);
    }
}
