//! Subscription tier resolution.
//!
//! Each product line stores its subscription code in a different custom
//! attribute and spells its plans differently. Both vocabularies map onto the
//! shared [`SubscriptionTier`] scale; anything not in a table is `Unknown`.

use serde::Serialize;

use crate::profile::{ProductLine, Profile};

/// Shared ordinal subscription scale. Declaration order is rank order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SubscriptionTier {
    #[default]
    Unknown,
    Free,
    Core,
    Live,
    Coach,
    Admin,
}

impl SubscriptionTier {
    /// All tiers, lowest rank first.
    pub const ALL: [SubscriptionTier; 6] = [
        SubscriptionTier::Unknown,
        SubscriptionTier::Free,
        SubscriptionTier::Core,
        SubscriptionTier::Live,
        SubscriptionTier::Coach,
        SubscriptionTier::Admin,
    ];

    /// Row order used by the spreadsheet report.
    pub const REPORT_ORDER: [SubscriptionTier; 6] = [
        SubscriptionTier::Unknown,
        SubscriptionTier::Admin,
        SubscriptionTier::Coach,
        SubscriptionTier::Live,
        SubscriptionTier::Core,
        SubscriptionTier::Free,
    ];

    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SubscriptionTier::Unknown => "Unknown",
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Core => "Core",
            SubscriptionTier::Live => "Live",
            SubscriptionTier::Coach => "Coach",
            SubscriptionTier::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const PRODUCT_A_VOCABULARY: &[(&str, SubscriptionTier)] = &[
    ("Coaching", SubscriptionTier::Coach),
    ("Live", SubscriptionTier::Live),
    ("Yearly + Live", SubscriptionTier::Live),
    ("Core", SubscriptionTier::Core),
    ("Free Trial", SubscriptionTier::Free),
];

const PRODUCT_B_VOCABULARY: &[(&str, SubscriptionTier)] = &[
    ("admin", SubscriptionTier::Admin),
    ("Administrator", SubscriptionTier::Admin),
    ("Staff", SubscriptionTier::Admin),
    ("coach", SubscriptionTier::Coach),
    ("live", SubscriptionTier::Live),
    ("core", SubscriptionTier::Core),
    ("free", SubscriptionTier::Free),
];

fn vocabulary(line: ProductLine) -> &'static [(&'static str, SubscriptionTier)] {
    match line {
        ProductLine::A => PRODUCT_A_VOCABULARY,
        ProductLine::B => PRODUCT_B_VOCABULARY,
        ProductLine::Other => &[],
    }
}

/// Maps a raw subscription code to a tier using `line`'s vocabulary.
///
/// Matching is exact: `"live"` is a product-B plan, `"Live"` a product-A one.
#[must_use]
pub fn lookup_tier(line: ProductLine, raw: &str) -> SubscriptionTier {
    vocabulary(line)
        .iter()
        .find(|(code, _)| *code == raw)
        .map_or(SubscriptionTier::Unknown, |(_, tier)| *tier)
}

/// Resolves the tier of a single profile read as a member of `line`.
#[must_use]
pub fn profile_tier(profile: &Profile, line: ProductLine) -> SubscriptionTier {
    line.subscription_attribute()
        .and_then(|attr| profile.attribute(attr))
        .map_or(SubscriptionTier::Unknown, |raw| lookup_tier(line, raw))
}

/// Highest tier across `(line, profile)` pairs. `Other` profiles never count.
pub fn highest_tier<'a, I>(profiles: I) -> SubscriptionTier
where
    I: IntoIterator<Item = (ProductLine, &'a Profile)>,
{
    profiles
        .into_iter()
        .filter(|(line, _)| *line != ProductLine::Other)
        .map(|(line, profile)| profile_tier(profile, line))
        .max()
        .unwrap_or_default()
}
