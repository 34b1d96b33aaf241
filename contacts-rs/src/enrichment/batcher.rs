//! Domain enrichment batching
//!
//! Groups contacts missing an industry by email domain, resolves each domain
//! through the known table and two cache levels, and sends only the remainder
//! to the external classifier in bounded, retried batches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, info, warn};

use super::cache::DomainCache;
use super::classifier::TextClassifier;
use super::known;
use super::types::{CompanyInfo, DomainQuery, EnrichmentStats};
use crate::address::{capitalize_domain_label, domain_of};
use crate::aggregator::types::Contact;
use crate::config::EnrichmentConfig;

const SYSTEM_PROMPT: &str = "You are given one contact per line as `name, domain`. \
For each line reply with the industry of the organization behind the domain, \
one label per line, in the same order. Reply with `Unknown` when unsure. \
Output nothing but the labels.";

struct DomainGroup {
    name: String,
    contact_keys: Vec<String>,
}

pub struct EnrichmentBatcher {
    classifier: Arc<dyn TextClassifier>,
    cache: Arc<dyn DomainCache>,
    config: EnrichmentConfig,
    /// In-run cache, keyed by domain. Lives as long as the batcher.
    run_cache: RwLock<HashMap<String, CompanyInfo>>,
}

impl EnrichmentBatcher {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        cache: Arc<dyn DomainCache>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            classifier,
            cache,
            config,
            run_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fill missing company/industry on the contact map.
    ///
    /// Classification failures degrade the affected domains to unresolved;
    /// they never abort other domains or the pipeline.
    pub async fn enrich(
        &self,
        contacts: &mut HashMap<String, Contact>,
        scope: &str,
    ) -> EnrichmentStats {
        let mut stats = EnrichmentStats::default();
        let groups = group_by_domain(contacts);
        stats.domains_considered = groups.len();

        let mut resolved: HashMap<String, CompanyInfo> = HashMap::new();
        let mut pending: Vec<DomainQuery> = Vec::new();

        for (domain, group) in &groups {
            if let Some(info) = known::lookup(domain) {
                stats.resolved_from_known += 1;
                resolved.insert(domain.clone(), info);
                continue;
            }
            if let Some(info) = self.run_cache.read().await.get(domain).cloned() {
                stats.resolved_from_cache += 1;
                resolved.insert(domain.clone(), info);
                continue;
            }
            if let Some(info) = self.cache.get(scope, domain).await {
                stats.resolved_from_cache += 1;
                self.run_cache.write().await.insert(domain.clone(), info.clone());
                resolved.insert(domain.clone(), info);
                continue;
            }
            pending.push(DomainQuery {
                domain: domain.clone(),
                name: group.name.clone(),
            });
        }

        if !pending.is_empty() {
            debug!("enrichment: {} domains need classification", pending.len());
            // Deterministic batch composition across runs.
            pending.sort_by(|a, b| a.domain.cmp(&b.domain));
            let classified = self.classify_pending(&pending, &mut stats).await;
            for (domain, info) in classified {
                self.run_cache.write().await.insert(domain.clone(), info.clone());
                self.cache.set(scope, &domain, info.clone()).await;
                resolved.insert(domain, info);
            }
        }

        for (domain, group) in &groups {
            let info = match resolved.get(domain) {
                Some(info) => info.clone(),
                None => {
                    stats.unresolved += 1;
                    CompanyInfo::unresolved()
                }
            };
            for key in &group.contact_keys {
                if let Some(contact) = contacts.get_mut(key) {
                    if contact.company.is_none() {
                        contact.company = info.company.clone();
                    }
                    if contact.industry.is_none() {
                        contact.industry = info.industry.clone();
                    }
                }
            }
        }

        info!(
            "enrichment: {} domains, {} known, {} cached, {} classifier calls, {} unresolved",
            stats.domains_considered,
            stats.resolved_from_known,
            stats.resolved_from_cache,
            stats.classifier_calls,
            stats.unresolved
        );
        stats
    }

    /// Dispatch pending domains in bounded batches with a fixed delay between
    /// dispatches, each batch retried with exponential backoff.
    async fn classify_pending(
        &self,
        pending: &[DomainQuery],
        stats: &mut EnrichmentStats,
    ) -> HashMap<String, CompanyInfo> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_batches.max(1)));
        let mut handles = Vec::new();

        for (index, chunk) in pending.chunks(self.config.batch_size.max(1)).enumerate() {
            if index > 0 && self.config.dispatch_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.dispatch_delay_ms)).await;
            }
            let semaphore = semaphore.clone();
            let classifier = self.classifier.clone();
            let config = self.config.clone();
            let batch: Vec<DomainQuery> = chunk.to_vec();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                let labels = classify_batch(classifier, &config, &batch).await?;
                Some((batch, labels))
            }));
        }
        stats.classifier_calls = handles.len();

        let mut resolved = HashMap::new();
        for handle in handles {
            match handle.await {
                Ok(Some((batch, labels))) => {
                    for (i, query) in batch.iter().enumerate() {
                        // Line i of the response belongs to input item i; a
                        // missing or empty line defaults to Unknown.
                        let label = labels
                            .get(i)
                            .map(|l| l.trim())
                            .filter(|l| !l.is_empty())
                            .unwrap_or("Unknown");
                        resolved.insert(
                            query.domain.clone(),
                            CompanyInfo {
                                company: Some(capitalize_domain_label(&query.domain)),
                                industry: Some(label.to_string()),
                            },
                        );
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("enrichment batch task failed: {}", e),
            }
        }
        resolved
    }
}

/// One classifier call per batch, retried with `base * 2^attempt` backoff.
/// Returns the response lines, or None once retries are exhausted.
async fn classify_batch(
    classifier: Arc<dyn TextClassifier>,
    config: &EnrichmentConfig,
    batch: &[DomainQuery],
) -> Option<Vec<String>> {
    let payload: Vec<String> =
        batch.iter().map(|q| format!("{}, {}", q.name, q.domain)).collect();
    let payload = payload.join("\n");

    for attempt in 0..=config.max_retries {
        match classifier.complete(SYSTEM_PROMPT, &payload).await {
            Ok(text) => {
                return Some(text.lines().map(|l| l.to_string()).collect());
            }
            Err(e) => {
                warn!("classification attempt {} failed: {}", attempt + 1, e);
                if attempt < config.max_retries {
                    let backoff = config.retry_base_ms.saturating_mul(2u64.saturating_pow(attempt));
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
            }
        }
    }
    warn!("classification exhausted retries for batch of {}", batch.len());
    None
}

/// Group contacts still missing an industry by lower-cased email domain.
///
/// The representative name comes from the smallest contact key, so the
/// classifier payload for a domain is identical across runs.
fn group_by_domain(contacts: &HashMap<String, Contact>) -> HashMap<String, DomainGroup> {
    let mut keys_by_domain: HashMap<String, Vec<String>> = HashMap::new();
    for (key, contact) in contacts {
        if contact.industry.is_some() {
            continue;
        }
        let Some(domain) = domain_of(&contact.email) else {
            continue;
        };
        keys_by_domain.entry(domain.to_lowercase()).or_default().push(key.clone());
    }

    keys_by_domain
        .into_iter()
        .map(|(domain, mut contact_keys)| {
            contact_keys.sort();
            let name = contact_keys
                .iter()
                .filter_map(|key| contacts.get(key))
                .map(|contact| contact.name.as_str())
                .find(|name| !name.is_empty())
                .unwrap_or_default()
                .to_string();
            (domain, DomainGroup { name, contact_keys })
        })
        .collect()
}
