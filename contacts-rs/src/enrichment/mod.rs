//! Company/industry enrichment
//!
//! Fills missing `company`/`industry` on contacts from their email domains,
//! via a static known-domain table, an in-run cache, a persistent user-scoped
//! cache, and finally an external batched text classifier.

mod batcher;
mod cache;
mod classifier;
mod known;
mod mock;
mod types;

pub use batcher::EnrichmentBatcher;
pub use cache::{DomainCache, MemoryDomainCache};
pub use classifier::{OllamaClassifier, TextClassifier};
pub use mock::MockClassifier;
pub use types::{CompanyInfo, DomainQuery, EnrichmentStats};
