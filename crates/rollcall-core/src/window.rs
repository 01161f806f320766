//! Recency window arithmetic and filtering.
//!
//! The CRM search API only filters `last_seen_at` at day granularity, so the
//! fetch is backdated to the start of the day before the window opens and the
//! over-fetched profiles are trimmed here.

use chrono::{DateTime, Utc};

use crate::profile::Profile;

const SECONDS_PER_DAY: i64 = 86_400;

/// Bounds for one run's recency window, in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    pub recency_days: u32,
    /// Profiles must have been seen strictly after this instant.
    pub lower_bound: i64,
    /// Backdated instant passed to the CRM search: midnight UTC of the day
    /// containing `lower_bound`, minus one day.
    pub query_start: i64,
}

impl RecencyWindow {
    /// Computes the window that ends at `now` and spans `recency_days` days.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, recency_days: u32) -> Self {
        let lower_bound = now.timestamp() - i64::from(recency_days) * SECONDS_PER_DAY;
        let day_start = lower_bound.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;
        Self {
            recency_days,
            lower_bound,
            query_start: day_start - SECONDS_PER_DAY,
        }
    }
}

/// Keeps the profiles seen strictly after `lower_bound`, in input order.
#[must_use]
pub fn filter_window(profiles: &[Profile], lower_bound: i64) -> Vec<&Profile> {
    profiles
        .iter()
        .filter(|p| p.last_seen_at > lower_bound)
        .collect()
}

/// Renders epoch seconds as `YYYY-MM-DD HH:MM:SS UTC` for log lines.
#[must_use]
pub fn format_timestamp(epoch_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0).map_or_else(
        || epoch_secs.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
