//! Serializable output of one classification run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::group::Category;
use crate::tier::SubscriptionTier;

/// Email counts for one subscription tier, split by fee-waiver status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WaiverSplit {
    pub regular: u64,
    pub fee_waiver: u64,
}

impl WaiverSplit {
    pub(crate) fn record(&mut self, fee_waiver: bool) {
        if fee_waiver {
            self.fee_waiver += 1;
        } else {
            self.regular += 1;
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.regular + self.fee_waiver
    }
}

/// Tier → waiver split. Always holds an entry for every tier.
pub type SubscriptionBreakdown = BTreeMap<SubscriptionTier, WaiverSplit>;

pub(crate) fn empty_breakdown() -> SubscriptionBreakdown {
    SubscriptionTier::ALL
        .into_iter()
        .map(|tier| (tier, WaiverSplit::default()))
        .collect()
}

/// Reported figures for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Number of emails in the category.
    pub count: usize,
    /// Raw A+B profile count; only reported for `Both`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_profiles_in_this_category: Option<usize>,
    /// Up to ten randomly chosen member emails.
    pub sample: Vec<String>,
    pub subscription_breakdown: SubscriptionBreakdown,
}

impl CategorySummary {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            count: 0,
            total_profiles_in_this_category: None,
            sample: Vec::new(),
            subscription_breakdown: empty_breakdown(),
        }
    }

    #[must_use]
    pub fn split(&self, tier: SubscriptionTier) -> WaiverSplit {
        self.subscription_breakdown
            .get(&tier)
            .copied()
            .unwrap_or_default()
    }
}

/// Outcome of tagging a category's profiles in the CRM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaggingOutcome {
    pub total_profiles_to_tag: usize,
    pub successfully_tagged: usize,
    pub failed_batches: usize,
}

/// Aggregate counts for one run.
///
/// Built once by [`crate::aggregate`]. Tagging results and run metadata are
/// attached by the caller through the consuming `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub total_unique_emails: usize,
    pub total_profiles_in_window: usize,
    pub emails_with_multiple_profiles: usize,
    #[serde(rename = "only_7s2")]
    pub only_b: CategorySummary,
    #[serde(rename = "only_7s1")]
    pub only_a: CategorySummary,
    pub both: CategorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagging_results: Option<TaggingOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Epoch seconds at which the run was reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl AggregateResult {
    #[must_use]
    pub fn category(&self, category: Category) -> &CategorySummary {
        match category {
            Category::OnlyA => &self.only_a,
            Category::OnlyB => &self.only_b,
            Category::Both => &self.both,
        }
    }

    #[must_use]
    pub fn with_tagging(mut self, outcome: TaggingOutcome) -> Self {
        self.tagging_results = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_run_metadata(mut self, run_id: impl Into<String>, timestamp: i64) -> Self {
        self.run_id = Some(run_id.into());
        self.timestamp = Some(timestamp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> AggregateResult {
        AggregateResult {
            total_unique_emails: 0,
            total_profiles_in_window: 0,
            emails_with_multiple_profiles: 0,
            only_b: CategorySummary::empty(),
            only_a: CategorySummary::empty(),
            both: CategorySummary {
                total_profiles_in_this_category: Some(0),
                ..CategorySummary::empty()
            },
            tagging_results: None,
            run_id: None,
            timestamp: None,
        }
    }

    #[test]
    fn serializes_with_report_field_names() {
        let json = serde_json::to_value(empty_result()).unwrap();
        assert!(json.get("only_7s1").is_some());
        assert!(json.get("only_7s2").is_some());
        assert_eq!(json["both"]["total_profiles_in_this_category"], 0);
        assert!(json["only_7s1"]
            .get("total_profiles_in_this_category")
            .is_none());
        assert_eq!(
            json["only_7s1"]["subscription_breakdown"]["Coach"],
            serde_json::json!({"regular": 0, "fee_waiver": 0})
        );
    }

    #[test]
    fn optional_fields_are_omitted_until_attached() {
        let json = serde_json::to_value(empty_result()).unwrap();
        assert!(json.get("run_id").is_none());
        assert!(json.get("tagging_results").is_none());

        let result = empty_result()
            .with_tagging(TaggingOutcome {
                total_profiles_to_tag: 3,
                successfully_tagged: 2,
                failed_batches: 1,
            })
            .with_run_metadata("run-1", 1_700_000_000);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["run_id"], "run-1");
        assert_eq!(json["timestamp"], 1_700_000_000);
        assert_eq!(json["tagging_results"]["failed_batches"], 1);
    }

    #[test]
    fn breakdown_covers_every_tier() {
        let summary = CategorySummary::empty();
        assert_eq!(summary.subscription_breakdown.len(), SubscriptionTier::ALL.len());
        assert_eq!(summary.split(SubscriptionTier::Admin).total(), 0);
    }
}
