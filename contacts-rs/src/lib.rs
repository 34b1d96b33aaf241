//! contacts-rs: contact graph aggregation and scoring
//!
//! Turns raw message-metadata records (sender/recipient headers, dates,
//! thread ids) into a deduplicated, enriched contact graph: one record per
//! real-world correspondent with a merged interaction timeline, a
//! relationship velocity score and trend, a promotional/spam classification,
//! and an inferred company/industry.
//!
//! # Pipeline
//!
//! ```text
//! messages -> AddressParser -> ContactAggregator -> VelocityScorer
//!                                                -> SpamClassifier
//!          -> EnrichmentBatcher -> NetworkScoreAggregator
//! ```
//!
//! # Example
//!
//! ```no_run
//! use contacts_rs::config::Config;
//! use contacts_rs::enrichment::{MemoryDomainCache, MockClassifier};
//! use contacts_rs::pipeline::ContactPipeline;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = ContactPipeline::new(
//!         Config::default(),
//!         Arc::new(MockClassifier::new()),
//!         Arc::new(MemoryDomainCache::new()),
//!     );
//!     let output = pipeline.run("me@example.com", &[], "me@example.com").await?;
//!     println!("{}", serde_json::to_string_pretty(&output)?);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`address`]: header address parsing
//! - [`aggregator`]: canonical contact map and single-writer reducer
//! - [`velocity`]: relationship velocity scoring
//! - [`spam`]: rule-based promotional/spam classification
//! - [`enrichment`]: batched company/industry inference
//! - [`network`]: network-level summary metrics
//! - [`pipeline`]: orchestration

pub mod address;
pub mod aggregator;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod network;
pub mod pipeline;
pub mod spam;
pub mod velocity;

// Re-export commonly used types
pub use aggregator::types::{Contact, Interaction, InteractionKind, MessageHeaders, MessageMeta};
pub use config::Config;
pub use error::{ContactError, Result};
pub use pipeline::{ContactPipeline, PipelineOutput};
