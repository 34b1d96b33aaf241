//! Mock classifier for tests
//!
//! Deterministic: answers one industry label per payload line from a fixed
//! table, and counts every call so tests can assert batching and cache
//! behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::classifier::TextClassifier;
use crate::error::{ContactError, Result};

pub struct MockClassifier {
    labels: HashMap<String, String>,
    fallback: String,
    calls: AtomicUsize,
    payloads: Arc<RwLock<Vec<String>>>,
    /// Calls that fail before one succeeds.
    failures_remaining: AtomicUsize,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            labels: HashMap::new(),
            fallback: "Technology".to_string(),
            calls: AtomicUsize::new(0),
            payloads: Arc::new(RwLock::new(Vec::new())),
            failures_remaining: AtomicUsize::new(0),
        }
    }

    /// Fixed answer for one domain.
    pub fn with_label(mut self, domain: &str, industry: &str) -> Self {
        self.labels.insert(domain.to_string(), industry.to_string());
        self
    }

    /// Fail the first `count` calls with a transient error.
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn payloads(&self) -> Vec<String> {
        self.payloads.read().await.clone()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.write().await.push(user.to_string());

        if self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(ContactError::RateLimited("mock transient failure".to_string()));
        }

        // One `name, domain` pair per line; answer positionally.
        let lines: Vec<String> = user
            .lines()
            .map(|line| {
                let domain = line.rsplit(',').next().unwrap_or("").trim();
                self.labels.get(domain).cloned().unwrap_or_else(|| self.fallback.clone())
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn model_name(&self) -> &str {
        "mock-classifier-v1"
    }
}
