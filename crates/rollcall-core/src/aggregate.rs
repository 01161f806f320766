//! Reduction of grouped profiles into an [`AggregateResult`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::classifier::{Classifier, MAX_SAMPLE_SIZE};
use crate::group::{group_by_email, Category, EmailGroups};
use crate::profile::Profile;
use crate::result::{empty_breakdown, AggregateResult, CategorySummary, SubscriptionBreakdown};
use crate::window::filter_window;

#[derive(Default)]
struct Bucket<'a> {
    emails: Vec<&'a str>,
    breakdown: SubscriptionBreakdown,
    profile_total: usize,
}

impl<'a> Bucket<'a> {
    fn new() -> Self {
        Self {
            breakdown: empty_breakdown(),
            ..Self::default()
        }
    }

    fn into_summary<R: Rng + ?Sized>(
        self,
        sample_size: usize,
        report_profiles: bool,
        rng: &mut R,
    ) -> CategorySummary {
        CategorySummary {
            count: self.emails.len(),
            total_profiles_in_this_category: report_profiles.then_some(self.profile_total),
            sample: sample_emails(self.emails, sample_size, rng),
            subscription_breakdown: self.breakdown,
        }
    }
}

/// Shuffles `emails` and keeps the first `sample_size` (capped at
/// [`MAX_SAMPLE_SIZE`]).
fn sample_emails<R: Rng + ?Sized>(
    mut emails: Vec<&str>,
    sample_size: usize,
    rng: &mut R,
) -> Vec<String> {
    emails.shuffle(rng);
    emails
        .into_iter()
        .take(sample_size.min(MAX_SAMPLE_SIZE))
        .map(str::to_owned)
        .collect()
}

/// Random source for sampling: seeded when `seed` is set, OS entropy otherwise.
#[must_use]
pub fn sample_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Classifies every email in `groups` and builds the aggregate counts.
///
/// `total_profiles_in_window` is reported as-is; it counts profiles before
/// emailless ones were dropped by the grouper.
pub fn aggregate<R: Rng + ?Sized>(
    groups: &EmailGroups<'_>,
    total_profiles_in_window: usize,
    classifier: &Classifier,
    sample_size: usize,
    rng: &mut R,
) -> AggregateResult {
    let mut only_a = Bucket::new();
    let mut only_b = Bucket::new();
    let mut both = Bucket::new();
    let mut emails_with_multiple_profiles = 0usize;

    for (email, group) in groups.iter() {
        if group.total_profiles() > 1 {
            emails_with_multiple_profiles += 1;
        }

        let Some(category) = group.category() else {
            continue;
        };
        let bucket = match category {
            Category::OnlyA => &mut only_a,
            Category::OnlyB => &mut only_b,
            Category::Both => &mut both,
        };

        let tier = group.tier();
        let fee_waiver = group.fee_waiver(&classifier.fee_waiver_tag_id);
        bucket.emails.push(email);
        bucket.profile_total += group.product_profiles();
        bucket.breakdown.entry(tier).or_default().record(fee_waiver);
    }

    debug_assert!(both.profile_total >= 2 * both.emails.len());

    // Shuffle order is fixed so a seed reproduces the same samples.
    let only_b = only_b.into_summary(sample_size, false, rng);
    let only_a = only_a.into_summary(sample_size, false, rng);
    let both = both.into_summary(sample_size, true, rng);

    AggregateResult {
        total_unique_emails: groups.len(),
        total_profiles_in_window,
        emails_with_multiple_profiles,
        only_b,
        only_a,
        both,
        tagging_results: None,
        run_id: None,
        timestamp: None,
    }
}

/// Runs the whole pipeline with default classifier settings: window filter,
/// grouping, tier and waiver resolution, aggregation.
#[must_use]
pub fn compute(
    profiles: &[Profile],
    window_lower_bound: i64,
    sample_size: usize,
    rng_seed: Option<u64>,
) -> AggregateResult {
    compute_with(
        &Classifier::default(),
        profiles,
        window_lower_bound,
        sample_size,
        rng_seed,
    )
}

/// [`compute`] with explicit classifier settings.
#[must_use]
pub fn compute_with(
    classifier: &Classifier,
    profiles: &[Profile],
    window_lower_bound: i64,
    sample_size: usize,
    rng_seed: Option<u64>,
) -> AggregateResult {
    let in_window = filter_window(profiles, window_lower_bound);
    let total = in_window.len();
    let groups = group_by_email(in_window, classifier);
    let mut rng = sample_rng(rng_seed);
    aggregate(&groups, total, classifier, sample_size, &mut rng)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
