//! Pipeline orchestration
//!
//! messages -> address parsing -> contact reduction -> velocity + spam
//! scoring -> enrichment -> network summary. Ingestion runs in bounded waves
//! with concurrent per-message parsing; all map writes go through the
//! single-writer reducer. Enrichment runs under its own concurrency cap
//! because it targets a different external dependency.

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::address::AddressParser;
use crate::aggregator::reducer::ContactReducer;
use crate::aggregator::types::{Contact, MessageMeta};
use crate::aggregator::parse_message;
use crate::config::Config;
use crate::enrichment::{DomainCache, EnrichmentBatcher, EnrichmentStats, TextClassifier};
use crate::error::Result;
use crate::network::{NetworkScoreAggregator, NetworkSummary};
use crate::spam::SpamClassifier;
use crate::velocity::VelocityScorer;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub contacts: Vec<Contact>,
    pub network: NetworkSummary,
    pub enrichment: EnrichmentStats,
}

pub struct ContactPipeline {
    config: Config,
    classifier: Arc<dyn TextClassifier>,
    cache: Arc<dyn DomainCache>,
}

impl ContactPipeline {
    pub fn new(
        config: Config,
        classifier: Arc<dyn TextClassifier>,
        cache: Arc<dyn DomainCache>,
    ) -> Self {
        Self {
            config,
            classifier,
            cache,
        }
    }

    /// Run the full pipeline over one batch of messages.
    ///
    /// Always produces a best-effort contact set: per-message parse problems
    /// and enrichment failures degrade individual records, they never abort
    /// the run. `scope` identifies the invoking user for the persistent
    /// domain cache.
    pub async fn run(
        &self,
        owner: &str,
        messages: &[MessageMeta],
        scope: &str,
    ) -> Result<PipelineOutput> {
        let owner = crate::address::canonical_email(owner);
        info!("pipeline: processing {} messages for {}", messages.len(), owner);

        let reducer = ContactReducer::spawn(&owner);
        let parser = Arc::new(AddressParser::new());

        let wave_size = self.config.ingest.wave_size.max(1);
        for (index, wave) in messages.chunks(wave_size).enumerate() {
            debug!("pipeline: wave {} ({} messages)", index, wave.len());
            let mut tasks = Vec::with_capacity(wave.len());
            for msg in wave {
                let parser = parser.clone();
                let tx = reducer.sender();
                let owner = owner.to_string();
                let msg = msg.clone();
                tasks.push(tokio::spawn(async move {
                    for event in parse_message(&parser, &owner, &msg) {
                        if tx.send(event).await.is_err() {
                            warn!("pipeline: reducer queue closed mid-wave");
                            return;
                        }
                    }
                }));
            }
            for result in join_all(tasks).await {
                if let Err(e) = result {
                    warn!("pipeline: parse task failed: {}", e);
                }
            }
        }

        let aggregator = reducer.finish().await?;
        let mut contacts = aggregator.into_contacts();

        let now = Utc::now();
        let velocity_scorer = VelocityScorer::new();
        let spam_classifier = SpamClassifier::new();
        for contact in contacts.values_mut() {
            contact.velocity = velocity_scorer.score(&contact.interactions, now);
            let verdict = spam_classifier.classify(contact);
            contact.spam = Some(verdict);
        }

        let batcher = EnrichmentBatcher::new(
            self.classifier.clone(),
            self.cache.clone(),
            self.config.enrichment.clone(),
        );
        let enrichment = batcher.enrich(&mut contacts, scope).await;

        let network = NetworkScoreAggregator::new().summarize(contacts.values(), now);

        let mut contacts: Vec<Contact> = contacts.into_values().collect();
        contacts.sort_by(|a, b| a.email.cmp(&b.email));

        info!("pipeline: produced {} contacts", contacts.len());
        Ok(PipelineOutput {
            contacts,
            network,
            enrichment,
        })
    }
}
