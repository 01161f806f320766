//! Grouping of windowed profiles by email and product line.

use std::collections::BTreeMap;

use crate::classifier::Classifier;
use crate::profile::{ProductLine, Profile};
use crate::tier::{highest_tier, SubscriptionTier};
use crate::waiver::group_has_fee_waiver;

/// Product-membership category of an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    OnlyA,
    OnlyB,
    Both,
}

impl Category {
    /// Display name used in the spreadsheet report.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::OnlyA => "7S1",
            Category::OnlyB => "7S2",
            Category::Both => "Both",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Every profile sharing one email, split by product line.
#[derive(Debug, Clone, Default)]
pub struct EmailGroup<'a> {
    pub product_a: Vec<&'a Profile>,
    pub product_b: Vec<&'a Profile>,
    pub other: Vec<&'a Profile>,
}

impl<'a> EmailGroup<'a> {
    fn push(&mut self, line: ProductLine, profile: &'a Profile) {
        match line {
            ProductLine::A => self.product_a.push(profile),
            ProductLine::B => self.product_b.push(profile),
            ProductLine::Other => self.other.push(profile),
        }
    }

    /// Profile count across all lines, `Other` included.
    #[must_use]
    pub fn total_profiles(&self) -> usize {
        self.product_a.len() + self.product_b.len() + self.other.len()
    }

    /// Profile count across product lines A and B.
    #[must_use]
    pub fn product_profiles(&self) -> usize {
        self.product_a.len() + self.product_b.len()
    }

    /// `None` when the email only has `Other` profiles.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        match (self.product_a.is_empty(), self.product_b.is_empty()) {
            (false, true) => Some(Category::OnlyA),
            (true, false) => Some(Category::OnlyB),
            (false, false) => Some(Category::Both),
            (true, true) => None,
        }
    }

    /// A and B profiles tagged with their line.
    pub fn line_profiles(&self) -> impl Iterator<Item = (ProductLine, &'a Profile)> + '_ {
        let a = self.product_a.iter().map(|p| (ProductLine::A, *p));
        let b = self.product_b.iter().map(|p| (ProductLine::B, *p));
        a.chain(b)
    }

    #[must_use]
    pub fn tier(&self) -> SubscriptionTier {
        highest_tier(self.line_profiles())
    }

    #[must_use]
    pub fn fee_waiver(&self, waiver_tag_id: &str) -> bool {
        group_has_fee_waiver(self.line_profiles(), waiver_tag_id)
    }
}

/// Email → [`EmailGroup`] map, iterated in email order.
#[derive(Debug, Clone, Default)]
pub struct EmailGroups<'a> {
    groups: BTreeMap<&'a str, EmailGroup<'a>>,
}

impl<'a> EmailGroups<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, email: &str) -> Option<&EmailGroup<'a>> {
        self.groups.get(email)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &EmailGroup<'a>)> + '_ {
        self.groups.iter().map(|(email, group)| (*email, group))
    }

    /// Ids of the A/B profiles belonging to emails in `category`.
    ///
    /// For `OnlyA` this is every product-A profile of the A-only emails; these
    /// are the ids handed to the tag batcher. Empty ids are skipped.
    #[must_use]
    pub fn profile_ids_for(&self, category: Category) -> Vec<String> {
        self.groups
            .values()
            .filter(|group| group.category() == Some(category))
            .flat_map(|group| group.line_profiles())
            .filter(|(_, profile)| !profile.id.is_empty())
            .map(|(_, profile)| profile.id.clone())
            .collect()
    }
}

/// Groups profiles by email. Profiles without an email are dropped.
pub fn group_by_email<'a, I>(profiles: I, classifier: &Classifier) -> EmailGroups<'a>
where
    I: IntoIterator<Item = &'a Profile>,
{
    let mut groups: BTreeMap<&'a str, EmailGroup<'a>> = BTreeMap::new();
    for profile in profiles {
        let Some(email) = profile.email() else {
            continue;
        };
        let line = ProductLine::from_external_id(
            profile.external_id.as_deref(),
            &classifier.product_b_prefix,
        );
        groups.entry(email).or_default().push(line, profile);
    }
    EmailGroups { groups }
}
