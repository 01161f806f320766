use std::collections::{BTreeMap, BTreeSet};

/// Custom attribute holding the product-A subscription code.
pub const PRODUCT_A_SUBSCRIPTION_ATTR: &str = "lsat_course";
/// Custom attribute holding the product-B subscription code.
pub const PRODUCT_B_SUBSCRIPTION_ATTR: &str = "sub";
/// Free-text list of purchases, searched for fee-waiver markers.
pub const PURCHASE_NAMES_ATTR: &str = "lsat_purchase_names";

/// One contact record as fetched from the CRM, normalized for classification.
///
/// Only string-valued custom attributes survive normalization; everything the
/// classifier reads is text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// CRM contact id, used when tagging.
    pub id: String,
    pub email: Option<String>,
    /// Identifier assigned by the originating product; its prefix decides the
    /// product line.
    pub external_id: Option<String>,
    /// Epoch seconds. `0` when the CRM has never seen the contact.
    pub last_seen_at: i64,
    pub custom_attributes: BTreeMap<String, String>,
    pub tag_ids: BTreeSet<String>,
}

impl Profile {
    /// Returns the named custom attribute, treating an empty string as absent.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.custom_attributes
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Returns the email if present and non-empty.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    #[must_use]
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

/// Which source system a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductLine {
    /// Legacy platform, labelled `7S1`.
    A,
    /// Platform whose external ids carry the marker prefix, labelled `7S2`.
    B,
    /// No external id, so the owning product cannot be determined.
    Other,
}

impl ProductLine {
    /// Infers the product line from an external id.
    #[must_use]
    pub fn from_external_id(external_id: Option<&str>, product_b_prefix: &str) -> Self {
        match external_id.filter(|id| !id.is_empty()) {
            Some(id) if id.starts_with(product_b_prefix) => ProductLine::B,
            Some(_) => ProductLine::A,
            None => ProductLine::Other,
        }
    }

    /// Custom attribute carrying this line's raw subscription code.
    #[must_use]
    pub fn subscription_attribute(self) -> Option<&'static str> {
        match self {
            ProductLine::A => Some(PRODUCT_A_SUBSCRIPTION_ATTR),
            ProductLine::B => Some(PRODUCT_B_SUBSCRIPTION_ATTR),
            ProductLine::Other => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductLine::A => "7S1",
            ProductLine::B => "7S2",
            ProductLine::Other => "Other",
        }
    }
}

impl std::fmt::Display for ProductLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_id_with_prefix_is_product_b() {
        assert_eq!(
            ProductLine::from_external_id(Some("usr_8812"), "usr"),
            ProductLine::B
        );
    }

    #[test]
    fn external_id_without_prefix_is_product_a() {
        assert_eq!(
            ProductLine::from_external_id(Some("40291"), "usr"),
            ProductLine::A
        );
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(
            ProductLine::from_external_id(Some("USR_1"), "usr"),
            ProductLine::A
        );
    }

    #[test]
    fn missing_or_empty_external_id_is_other() {
        assert_eq!(ProductLine::from_external_id(None, "usr"), ProductLine::Other);
        assert_eq!(
            ProductLine::from_external_id(Some(""), "usr"),
            ProductLine::Other
        );
    }

    #[test]
    fn attribute_treats_empty_string_as_absent() {
        let mut profile = Profile {
            id: "1".to_string(),
            email: Some(String::new()),
            external_id: None,
            last_seen_at: 0,
            custom_attributes: BTreeMap::new(),
            tag_ids: BTreeSet::new(),
        };
        profile
            .custom_attributes
            .insert(PRODUCT_B_SUBSCRIPTION_ATTR.to_string(), String::new());
        assert_eq!(profile.attribute(PRODUCT_B_SUBSCRIPTION_ATTR), None);
        assert_eq!(profile.email(), None);
    }
}
