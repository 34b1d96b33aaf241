//! Spam scoring engine
//!
//! Deterministic point-accumulation over pure-data rule tables. Confidence is
//! the clamped sum of all matched rules; adding a matching signal can never
//! lower it.

use chrono::Timelike;
use std::collections::HashSet;

use super::types::{BehaviorSignal, CategoryPattern, SpamVerdict};
use crate::aggregator::types::{Contact, InteractionKind};

/// Points a category pattern match contributes, per distinct category.
const CATEGORY_POINTS: u32 = 25;

/// Confidence at or above this is classified spam.
const SPAM_THRESHOLD: u32 = 25;

const SUSPICIOUS_TLDS: &[&str] = &[
    ".xyz", ".top", ".click", ".loan", ".win", ".bid", ".link", ".date", ".stream",
];

const CATEGORY_PATTERNS: &[CategoryPattern] = &[
    CategoryPattern {
        title: "marketing",
        keywords: &["marketing", "promo", "promotions", "offers", "deals", "sales@"],
    },
    CategoryPattern {
        title: "notifications",
        keywords: &["noreply", "no-reply", "donotreply", "notification", "notifications", "alert", "alerts"],
    },
    CategoryPattern {
        title: "newsletters",
        keywords: &["newsletter", "digest", "weekly", "bulletin", "mailchimp", "substack", "campaign"],
    },
    CategoryPattern {
        title: "automated",
        keywords: &["automated", "mailer", "daemon", "bot@", "system@", "auto-confirm"],
    },
    CategoryPattern {
        title: "corporate",
        keywords: &["corporate", "press@", "media@", "investor"],
    },
    CategoryPattern {
        title: "support",
        keywords: &["support", "helpdesk", "help@", "service@", "feedback"],
    },
    CategoryPattern {
        title: "travel",
        keywords: &["travel", "booking", "flights", "reservations", "itinerary"],
    },
    CategoryPattern {
        title: "general",
        keywords: &["updates@", "news@", "hello@", "team@"],
    },
];

fn one_way_inbound(contact: &Contact) -> bool {
    contact.interactions.len() > 10
        && contact.interactions.iter().all(|i| i.kind == InteractionKind::Received)
}

fn unanswered_outbound(contact: &Contact) -> bool {
    contact.interactions.len() > 3
        && contact.interactions.iter().all(|i| i.kind == InteractionKind::Sent)
}

fn single_hour_timing(contact: &Contact) -> bool {
    if contact.interactions.len() < 5 {
        return false;
    }
    let hours: HashSet<u32> = contact.interactions.iter().map(|i| i.date.hour()).collect();
    hours.len() == 1
}

fn suspicious_tld(contact: &Contact) -> bool {
    SUSPICIOUS_TLDS.iter().any(|tld| contact.email.ends_with(tld))
}

fn missing_identity(contact: &Contact) -> bool {
    contact.name.trim().chars().count() < 2
}

const BEHAVIOR_SIGNALS: &[BehaviorSignal] = &[
    BehaviorSignal {
        points: 30,
        reason: "high frequency one-way communication",
        check: one_way_inbound,
    },
    BehaviorSignal {
        points: 20,
        reason: "no responses to multiple sent messages",
        check: unanswered_outbound,
    },
    BehaviorSignal {
        points: 15,
        reason: "suspicious message timing pattern",
        check: single_hour_timing,
    },
    BehaviorSignal {
        points: 20,
        reason: "suspicious email domain",
        check: suspicious_tld,
    },
    BehaviorSignal {
        points: 10,
        reason: "missing or invalid contact name",
        check: missing_identity,
    },
];

pub struct SpamClassifier {
    categories: &'static [CategoryPattern],
    signals: &'static [BehaviorSignal],
}

impl SpamClassifier {
    pub fn new() -> Self {
        Self {
            categories: CATEGORY_PATTERNS,
            signals: BEHAVIOR_SIGNALS,
        }
    }

    pub fn classify(&self, contact: &Contact) -> SpamVerdict {
        let mut points = 0u32;
        let mut reasons = Vec::new();

        for category in self.categories {
            if category.matches(&contact.email) {
                points += CATEGORY_POINTS;
                reasons.push(category.title.to_string());
            }
        }

        for signal in self.signals {
            if (signal.check)(contact) {
                points += signal.points;
                reasons.push(signal.reason.to_string());
            }
        }

        let confidence = points.min(100);
        SpamVerdict {
            is_spam: confidence >= SPAM_THRESHOLD,
            confidence,
            reasons,
        }
    }
}

impl Default for SpamClassifier {
    fn default() -> Self {
        Self::new()
    }
}
