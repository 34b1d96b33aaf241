//! Spam classification types

use serde::{Deserialize, Serialize};

use crate::aggregator::types::Contact;

/// Classification result for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamVerdict {
    /// Confidence crossed the spam threshold.
    pub is_spam: bool,
    /// Accumulated points, clamped to 100.
    pub confidence: u32,
    /// One entry per matched rule.
    pub reasons: Vec<String>,
}

/// A keyword category matched against the contact's address.
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    /// Category title, used verbatim as the reason text.
    pub title: &'static str,
    pub keywords: &'static [&'static str],
}

impl CategoryPattern {
    pub fn matches(&self, email: &str) -> bool {
        self.keywords.iter().any(|keyword| email.contains(keyword))
    }
}

/// A behavioral rule over a contact's timeline or identity.
///
/// Kept as data so the rule set is testable and extensible without touching
/// the scoring engine. Every rule is evaluated independently; none
/// short-circuits another.
#[derive(Debug, Clone)]
pub struct BehaviorSignal {
    pub points: u32,
    pub reason: &'static str,
    pub check: fn(&Contact) -> bool,
}
