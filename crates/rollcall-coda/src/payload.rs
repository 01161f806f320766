//! Flattening of an [`AggregateResult`] into the Coda table rows.
//!
//! Coda stores one row per (category, tier, waiver status). Categories are
//! emitted `7S2`, `7S1`, `Both`; tiers follow
//! [`SubscriptionTier::REPORT_ORDER`]; the regular row precedes the waiver
//! row. Every combination is present, zero or not, so the sheet always
//! receives 36 rows.

use rollcall_core::{AggregateResult, Category, SubscriptionTier, TaggingOutcome};
use serde::Serialize;

use crate::error::CodaError;

/// Category order of the report.
const REPORT_CATEGORIES: [Category; 3] = [Category::OnlyB, Category::OnlyA, Category::Both];

/// One `counts` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub category: &'static str,
    pub subscription: SubscriptionTier,
    pub fee_waiver: bool,
    pub total: u64,
}

/// Webhook body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodaPayload {
    pub run_id: String,
    /// Epoch seconds.
    pub timestamp: i64,
    pub recency_days: u32,
    pub counts: Vec<CountRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagging_results: Option<TaggingOutcome>,
}

impl CodaPayload {
    /// Builds the payload for `result`.
    ///
    /// # Errors
    ///
    /// Returns [`CodaError::MissingRunMetadata`] if `run_id` or `timestamp`
    /// has not been attached to the result.
    pub fn from_result(result: &AggregateResult, recency_days: u32) -> Result<Self, CodaError> {
        let run_id = result
            .run_id
            .clone()
            .ok_or(CodaError::MissingRunMetadata { field: "run_id" })?;
        let timestamp = result
            .timestamp
            .ok_or(CodaError::MissingRunMetadata { field: "timestamp" })?;

        Ok(Self {
            run_id,
            timestamp,
            recency_days,
            counts: count_rows(result),
            tagging_results: result.tagging_results,
        })
    }
}

fn count_rows(result: &AggregateResult) -> Vec<CountRow> {
    let mut rows = Vec::with_capacity(REPORT_CATEGORIES.len() * SubscriptionTier::ALL.len() * 2);
    for category in REPORT_CATEGORIES {
        let summary = result.category(category);
        for tier in SubscriptionTier::REPORT_ORDER {
            let split = summary.split(tier);
            for (fee_waiver, total) in [(false, split.regular), (true, split.fee_waiver)] {
                rows.push(CountRow {
                    category: category.label(),
                    subscription: tier,
                    fee_waiver,
                    total,
                });
            }
        }
    }
    rows
}
