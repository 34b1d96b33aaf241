//! Persistent domain cache seam
//!
//! Scoped per invoking user identity; TTL/lifetime is the implementation's
//! business. The in-memory store backs tests and single-process deployments;
//! a remote KV store slots in behind the same trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::CompanyInfo;

#[async_trait]
pub trait DomainCache: Send + Sync {
    async fn get(&self, scope: &str, domain: &str) -> Option<CompanyInfo>;
    async fn set(&self, scope: &str, domain: &str, value: CompanyInfo);
}

/// In-memory scoped cache.
pub struct MemoryDomainCache {
    entries: Arc<RwLock<HashMap<String, CompanyInfo>>>,
}

impl MemoryDomainCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn key(scope: &str, domain: &str) -> String {
        format!("{}:{}", scope, domain)
    }
}

impl Default for MemoryDomainCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainCache for MemoryDomainCache {
    async fn get(&self, scope: &str, domain: &str) -> Option<CompanyInfo> {
        let entries = self.entries.read().await;
        entries.get(&Self::key(scope, domain)).cloned()
    }

    async fn set(&self, scope: &str, domain: &str, value: CompanyInfo) {
        let mut entries = self.entries.write().await;
        entries.insert(Self::key(scope, domain), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_scoping() {
        let cache = MemoryDomainCache::new();
        let info = CompanyInfo {
            company: Some("Acme".to_string()),
            industry: Some("Manufacturing".to_string()),
        };

        cache.set("user-1", "acme.com", info.clone()).await;
        assert_eq!(cache.get("user-1", "acme.com").await, Some(info));
        // Another user's scope never sees it.
        assert_eq!(cache.get("user-2", "acme.com").await, None);
    }
}
