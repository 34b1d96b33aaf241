//! Network-level summary metrics
//!
//! Folds the finished contact set into a handful of headline numbers, each
//! paired with a trend comparing the current window to the prior
//! equal-length window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::types::{Contact, InteractionKind};
use crate::velocity::{ratio_trend, Trend};

/// Days an interaction counts as "active".
const ACTIVE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetric {
    pub value: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    /// Contacts with an interaction in the last 30 days.
    pub active_relationships: NetworkMetric,
    /// Mean received-to-reply gap, in hours. A faster recent window trends
    /// upward.
    pub avg_response_time_hours: NetworkMetric,
    /// Total contact count.
    pub network_reach: NetworkMetric,
}

pub struct NetworkScoreAggregator;

impl NetworkScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize<'a, I>(&self, contacts: I, now: DateTime<Utc>) -> NetworkSummary
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        let window = Duration::days(ACTIVE_WINDOW_DAYS);
        let recent_start = now - window;
        let prior_start = now - window - window;

        let mut total = 0u64;
        let mut active_recent = 0u64;
        let mut active_prior = 0u64;
        let mut new_recent = 0u64;
        let mut new_prior = 0u64;
        let mut reply_gaps_all: Vec<f64> = Vec::new();
        let mut reply_gaps_recent: Vec<f64> = Vec::new();
        let mut reply_gaps_prior: Vec<f64> = Vec::new();

        for contact in contacts {
            total += 1;

            let dates: Vec<DateTime<Utc>> =
                contact.interactions.iter().map(|i| i.date).collect();
            if dates.iter().any(|d| *d > recent_start && *d <= now) {
                active_recent += 1;
            }
            if dates.iter().any(|d| *d > prior_start && *d <= recent_start) {
                active_prior += 1;
            }
            if let Some(first) = dates.iter().min() {
                if *first > recent_start && *first <= now {
                    new_recent += 1;
                } else if *first > prior_start && *first <= recent_start {
                    new_prior += 1;
                }
            }

            // Reply gap: a received interaction answered by the next sent one.
            let mut ordered = contact.interactions.clone();
            ordered.sort_by_key(|i| i.date);
            let mut pending_received: Option<DateTime<Utc>> = None;
            for interaction in &ordered {
                match interaction.kind {
                    InteractionKind::Received => {
                        if pending_received.is_none() {
                            pending_received = Some(interaction.date);
                        }
                    }
                    InteractionKind::Sent => {
                        if let Some(received_at) = pending_received.take() {
                            let hours = (interaction.date - received_at).num_seconds() as f64
                                / 3600.0;
                            reply_gaps_all.push(hours);
                            if interaction.date > recent_start {
                                reply_gaps_recent.push(hours);
                            } else if interaction.date > prior_start {
                                reply_gaps_prior.push(hours);
                            }
                        }
                    }
                }
            }
        }

        let avg = |gaps: &[f64]| {
            if gaps.is_empty() {
                0.0
            } else {
                gaps.iter().sum::<f64>() / gaps.len() as f64
            }
        };

        // Without gaps on both sides there is no responsiveness comparison.
        let response_trend = if reply_gaps_prior.is_empty() || reply_gaps_recent.is_empty() {
            Trend::Stable
        } else {
            // Smaller recent gaps mean the network got more responsive.
            ratio_trend(avg(&reply_gaps_prior), avg(&reply_gaps_recent))
        };

        NetworkSummary {
            active_relationships: NetworkMetric {
                value: active_recent as f64,
                trend: ratio_trend(active_recent as f64, active_prior as f64),
            },
            avg_response_time_hours: NetworkMetric {
                value: avg(&reply_gaps_all),
                trend: response_trend,
            },
            network_reach: NetworkMetric {
                value: total as f64,
                trend: ratio_trend(new_recent as f64, new_prior as f64),
            },
        }
    }
}

impl Default for NetworkScoreAggregator {
    fn default() -> Self {
        Self::new()
    }
}
