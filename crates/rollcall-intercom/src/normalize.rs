//! Normalization from raw Intercom contacts to [`rollcall_core::Profile`].

use rollcall_core::Profile;

use crate::types::Contact;

/// Converts a [`Contact`] into a [`Profile`].
///
/// Non-string custom attributes are dropped and a missing `last_seen_at`
/// becomes `0`, which falls outside every recency window.
#[must_use]
pub fn normalize_contact(contact: Contact) -> Profile {
    let custom_attributes = contact
        .custom_attributes
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect();

    let tag_ids = contact.tags.data.into_iter().map(|t| t.id).collect();

    Profile {
        id: contact.id,
        email: contact.email,
        external_id: contact.external_id,
        last_seen_at: contact.last_seen_at.unwrap_or(0),
        custom_attributes,
        tag_ids,
    }
}
