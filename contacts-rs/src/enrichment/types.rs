//! Enrichment types

use serde::{Deserialize, Serialize};

/// Company/industry inferred for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub company: Option<String>,
    pub industry: Option<String>,
}

impl CompanyInfo {
    pub fn unresolved() -> Self {
        Self {
            company: None,
            industry: None,
        }
    }
}

/// One domain awaiting classification, with a representative contact name to
/// give the classifier context.
#[derive(Debug, Clone)]
pub struct DomainQuery {
    pub domain: String,
    pub name: String,
}

/// Counters reported after an enrichment pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentStats {
    pub domains_considered: usize,
    pub resolved_from_known: usize,
    pub resolved_from_cache: usize,
    pub classifier_calls: usize,
    pub unresolved: usize,
}
