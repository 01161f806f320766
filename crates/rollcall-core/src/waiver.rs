//! Fee-waiver detection.

use crate::profile::{ProductLine, Profile, PURCHASE_NAMES_ATTR};

/// Tag id applied in the CRM to fee-waiver contacts.
pub const DEFAULT_FEE_WAIVER_TAG_ID: &str = "11173348";

const WAIVER_MARKER: &str = "waiver";

/// A profile is a fee waiver if it carries the waiver tag or its purchase
/// names mention a waiver in any letter case.
#[must_use]
pub fn is_fee_waiver(profile: &Profile, waiver_tag_id: &str) -> bool {
    if profile.has_tag(waiver_tag_id) {
        return true;
    }
    profile
        .attribute(PURCHASE_NAMES_ATTR)
        .is_some_and(|names| names.to_lowercase().contains(WAIVER_MARKER))
}

/// True if any A or B profile of the group is a fee waiver.
pub fn group_has_fee_waiver<'a, I>(profiles: I, waiver_tag_id: &str) -> bool
where
    I: IntoIterator<Item = (ProductLine, &'a Profile)>,
{
    profiles
        .into_iter()
        .filter(|(line, _)| *line != ProductLine::Other)
        .any(|(_, profile)| is_fee_waiver(profile, waiver_tag_id))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    fn profile(tags: &[&str], purchases: Option<&str>) -> Profile {
        let mut custom_attributes = BTreeMap::new();
        if let Some(p) = purchases {
            custom_attributes.insert(PURCHASE_NAMES_ATTR.to_string(), p.to_string());
        }
        Profile {
            id: "p1".to_string(),
            email: Some("w@example.com".to_string()),
            external_id: Some("1001".to_string()),
            last_seen_at: 0,
            custom_attributes,
            tag_ids: tags.iter().map(|t| (*t).to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn waiver_tag_alone_is_enough() {
        let p = profile(&["55", DEFAULT_FEE_WAIVER_TAG_ID], Some("Core Plan"));
        assert!(is_fee_waiver(&p, DEFAULT_FEE_WAIVER_TAG_ID));
    }

    #[test]
    fn purchase_names_match_case_insensitively() {
        let p = profile(&[], Some("LSAT Live, Fee WAIVER Program"));
        assert!(is_fee_waiver(&p, DEFAULT_FEE_WAIVER_TAG_ID));
    }

    #[test]
    fn unrelated_tags_and_purchases_are_not_waivers() {
        let p = profile(&["42"], Some("Live Plan"));
        assert!(!is_fee_waiver(&p, DEFAULT_FEE_WAIVER_TAG_ID));
    }

    #[test]
    fn missing_fields_default_to_not_waiver() {
        let p = profile(&[], None);
        assert!(!is_fee_waiver(&p, DEFAULT_FEE_WAIVER_TAG_ID));
    }

    #[test]
    fn configured_tag_id_is_respected() {
        let p = profile(&["999"], None);
        assert!(!is_fee_waiver(&p, DEFAULT_FEE_WAIVER_TAG_ID));
        assert!(is_fee_waiver(&p, "999"));
    }

    #[test]
    fn group_waiver_is_any_over_both_lines() {
        let plain = profile(&[], Some("Core"));
        let waived = profile(&[DEFAULT_FEE_WAIVER_TAG_ID], None);
        assert!(group_has_fee_waiver(
            [(ProductLine::A, &plain), (ProductLine::B, &waived)],
            DEFAULT_FEE_WAIVER_TAG_ID
        ));
        assert!(!group_has_fee_waiver(
            [(ProductLine::A, &plain)],
            DEFAULT_FEE_WAIVER_TAG_ID
        ));
    }

    #[test]
    fn other_line_profiles_do_not_mark_group() {
        let waived = profile(&[DEFAULT_FEE_WAIVER_TAG_ID], None);
        assert!(!group_has_fee_waiver(
            [(ProductLine::Other, &waived)],
            DEFAULT_FEE_WAIVER_TAG_ID
        ));
    }
}
