//! Relationship velocity scoring
//!
//! Produces a 0-100 composite of recency, frequency and consistency of a
//! contact's interaction timeline, plus a rising/stable/falling trend from
//! two adjacent 90-day windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::types::Interaction;

const MS_PER_DAY: f64 = 86_400_000.0;
const SECS_PER_DAY: f64 = 86_400.0;

/// Most recent interactions considered for frequency/consistency.
const FREQUENCY_WINDOW: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Velocity {
    pub score: u8,
    pub trend: Trend,
}

impl Default for Velocity {
    fn default() -> Self {
        Self {
            score: 0,
            trend: Trend::Stable,
        }
    }
}

/// Compare a recent window count against the prior window count.
///
/// Rising above a 1.2 ratio, falling below 0.8, stable otherwise. Two empty
/// windows are stable.
pub fn ratio_trend(recent: f64, prior: f64) -> Trend {
    if recent > 1.2 * prior {
        Trend::Rising
    } else if recent < 0.8 * prior {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

pub struct VelocityScorer;

impl VelocityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score an interaction timeline as of `now`.
    ///
    /// Empty history scores `{0, stable}`.
    pub fn score(&self, interactions: &[Interaction], now: DateTime<Utc>) -> Velocity {
        if interactions.is_empty() {
            return Velocity::default();
        }

        let mut dates: Vec<DateTime<Utc>> = interactions.iter().map(|i| i.date).collect();
        dates.sort();
        let last = dates[dates.len() - 1];

        // Linear decay, floor 0 at 100+ days.
        let days_since = (now - last).num_seconds() as f64 / SECS_PER_DAY;
        let recency = (100.0 - days_since).max(0.0).min(100.0);

        let recent = &dates[dates.len().saturating_sub(FREQUENCY_WINDOW)..];
        let frequency = recent.len() as f64 * 10.0;

        let consistency = Self::consistency(recent);

        let composite = 0.4 * recency + 0.4 * frequency + 0.2 * consistency;
        let score = composite.clamp(0.0, 100.0).round() as u8;

        Velocity {
            score,
            trend: self.trend(&dates, now),
        }
    }

    /// Lower variance in interaction spacing scores higher.
    fn consistency(dates: &[DateTime<Utc>]) -> f64 {
        if dates.len() < 2 {
            return 0.0;
        }

        let intervals: Vec<f64> = dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_milliseconds() as f64)
            .collect();
        let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
        let variance =
            intervals.iter().map(|i| (i - mean).powi(2)).sum::<f64>() / intervals.len() as f64;
        let std_dev = variance.sqrt();

        (100.0 - std_dev / MS_PER_DAY).max(0.0)
    }

    /// Recent window is 0-90 days old inclusive, prior window 91-180.
    fn trend(&self, dates: &[DateTime<Utc>], now: DateTime<Utc>) -> Trend {
        let mut recent_count = 0u32;
        let mut prior_count = 0u32;
        for date in dates {
            let age_days = (now - *date).num_seconds() as f64 / SECS_PER_DAY;
            if age_days < 0.0 {
                continue;
            }
            if age_days <= 90.0 {
                recent_count += 1;
            } else if age_days <= 180.0 {
                prior_count += 1;
            }
        }
        ratio_trend(recent_count as f64, prior_count as f64)
    }
}

impl Default for VelocityScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::types::InteractionKind;
    use chrono::Duration;

    fn interaction(days_ago: i64, now: DateTime<Utc>) -> Interaction {
        Interaction {
            date: now - Duration::days(days_ago),
            kind: InteractionKind::Received,
            thread_id: None,
            participants: None,
        }
    }

    #[test]
    fn test_empty_history_is_zero_stable() {
        let scorer = VelocityScorer::new();
        let v = scorer.score(&[], Utc::now());
        assert_eq!(v.score, 0);
        assert_eq!(v.trend, Trend::Stable);
    }

    #[test]
    fn test_score_in_bounds() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();

        // Dense, perfectly regular recent history saturates the composite.
        let dense: Vec<Interaction> = (0..40).map(|d| interaction(d, now)).collect();
        let v = scorer.score(&dense, now);
        assert!(v.score <= 100);
        assert!(v.score >= 90);

        // A single ancient interaction keeps only its frequency points.
        let stale = vec![interaction(400, now)];
        let v = scorer.score(&stale, now);
        assert_eq!(v.score, 4);
    }

    #[test]
    fn test_single_recent_interaction() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();
        let v = scorer.score(&[interaction(0, now)], now);
        // 0.4 * 100 recency + 0.4 * 10 frequency, consistency 0 under 2 points.
        assert_eq!(v.score, 44);
    }

    #[test]
    fn test_regular_spacing_beats_irregular() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();

        let regular: Vec<Interaction> = (0..10).map(|i| interaction(i * 7, now)).collect();
        let irregular: Vec<Interaction> =
            [0, 1, 2, 30, 31, 32, 33, 60, 61, 63].iter().map(|&d| interaction(d, now)).collect();

        let vr = scorer.score(&regular, now);
        let vi = scorer.score(&irregular, now);
        assert!(vr.score > vi.score);
    }

    #[test]
    fn test_trend_rising() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();
        // 5 recent vs 2 prior.
        let history: Vec<Interaction> =
            [1, 10, 20, 40, 60, 120, 150].iter().map(|&d| interaction(d, now)).collect();
        assert_eq!(scorer.score(&history, now).trend, Trend::Rising);
    }

    #[test]
    fn test_trend_falling() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();
        // 1 recent vs 5 prior.
        let history: Vec<Interaction> =
            [10, 100, 110, 120, 130, 140].iter().map(|&d| interaction(d, now)).collect();
        assert_eq!(scorer.score(&history, now).trend, Trend::Falling);
    }

    #[test]
    fn test_trend_stable_with_no_activity_in_either_window() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();
        let history = vec![interaction(300, now)];
        assert_eq!(scorer.score(&history, now).trend, Trend::Stable);
    }

    #[test]
    fn test_window_boundary_90_and_91_days() {
        let now = Utc::now();
        let scorer = VelocityScorer::new();
        // Exactly 90 days old lands in the recent window, 91 in the prior one:
        // one each means the 1:1 ratio reads stable.
        let history = vec![interaction(90, now), interaction(91, now)];
        assert_eq!(scorer.score(&history, now).trend, Trend::Stable);

        // Only the 90-day-old one: recent 1, prior 0 reads rising.
        let history = vec![interaction(90, now)];
        assert_eq!(scorer.score(&history, now).trend, Trend::Rising);

        // Only the 91-day-old one: recent 0, prior 1 reads falling.
        let history = vec![interaction(91, now)];
        assert_eq!(scorer.score(&history, now).trend, Trend::Falling);
    }

    #[test]
    fn test_consistency_defined_for_two_points() {
        let now = Utc::now();
        // Two points a day apart: single interval, zero deviation, so the
        // consistency term contributes its full 20 points.
        let history = vec![interaction(1, now), interaction(2, now)];
        let v = VelocityScorer::new().score(&history, now);
        // recency ~98-99, frequency 20, consistency 100.
        assert!(v.score >= 67 && v.score <= 68, "score was {}", v.score);
    }
}
