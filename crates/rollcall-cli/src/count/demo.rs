//! Static result used by `count --test` to exercise Coda delivery without
//! touching Intercom.

use rollcall_core::{AggregateResult, CategorySummary, SubscriptionTier, WaiverSplit};

/// `(tier, regular, fee_waiver)` in report order.
type Rows = [(SubscriptionTier, u64, u64); 6];

const ONLY_7S2: Rows = [
    (SubscriptionTier::Unknown, 0, 0),
    (SubscriptionTier::Admin, 0, 0),
    (SubscriptionTier::Coach, 33, 0),
    (SubscriptionTier::Live, 655, 142),
    (SubscriptionTier::Core, 684, 55),
    (SubscriptionTier::Free, 451, 0),
];

const ONLY_7S1: Rows = [
    (SubscriptionTier::Unknown, 1, 0),
    (SubscriptionTier::Admin, 3, 0),
    (SubscriptionTier::Coach, 178, 2),
    (SubscriptionTier::Live, 1467, 584),
    (SubscriptionTier::Core, 4991, 26),
    (SubscriptionTier::Free, 795, 43),
];

const BOTH: Rows = [
    (SubscriptionTier::Unknown, 0, 0),
    (SubscriptionTier::Admin, 13, 0),
    (SubscriptionTier::Coach, 21, 0),
    (SubscriptionTier::Live, 252, 78),
    (SubscriptionTier::Core, 338, 5),
    (SubscriptionTier::Free, 187, 3),
];

fn summary(count: usize, sample: [&str; 2], rows: &Rows) -> CategorySummary {
    let mut summary = CategorySummary::empty();
    summary.count = count;
    summary.sample = sample.iter().map(|s| (*s).to_string()).collect();
    for &(tier, regular, fee_waiver) in rows {
        summary
            .subscription_breakdown
            .insert(tier, WaiverSplit { regular, fee_waiver });
    }
    summary
}

pub(super) fn sample_result() -> AggregateResult {
    let mut both = summary(
        897,
        ["test.user5@example.com", "test.user6@example.com"],
        &BOTH,
    );
    both.total_profiles_in_this_category = Some(1796);

    AggregateResult {
        total_unique_emails: 11_007,
        total_profiles_in_window: 11_918,
        emails_with_multiple_profiles: 909,
        only_b: summary(
            2020,
            ["test.user1@example.com", "test.user2@example.com"],
            &ONLY_7S2,
        ),
        only_a: summary(
            8090,
            ["test.user3@example.com", "test.user4@example.com"],
            &ONLY_7S1,
        ),
        both,
        tagging_results: None,
        run_id: None,
        timestamp: None,
    }
}
