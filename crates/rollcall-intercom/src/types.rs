//! Intercom API response types for `POST /contacts/search`.
//!
//! ## Observed shape
//!
//! ### `custom_attributes`
//! A flat JSON object whose values may be strings, numbers, booleans, or
//! `null`. Only string values are meaningful to classification; the rest are
//! dropped during normalization.
//!
//! ### `tags`
//! A list object: `{"type": "list", "data": [{"id": "11173348", "type": "tag"}]}`.
//! Absent on some workspaces, so it defaults to an empty list.
//!
//! ### `last_seen_at`
//! Epoch seconds, or `null` for contacts that never opened the messenger.
//!
//! ### `pages.next`
//! Present only when another page exists; carries the `starting_after` cursor.

use serde::Deserialize;

/// Top-level response from `POST /contacts/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Contact>,
    #[serde(default)]
    pub pages: Option<Pages>,
}

impl SearchResponse {
    /// Cursor for the following page, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.pages
            .as_ref()
            .and_then(|p| p.next.as_ref())
            .and_then(|n| n.starting_after.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct Pages {
    #[serde(default)]
    pub next: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub struct NextPage {
    #[serde(default)]
    pub starting_after: Option<String>,
}

/// A single contact record.
#[derive(Debug, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub last_seen_at: Option<i64>,
    #[serde(default)]
    pub custom_attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub tags: TagList,
}

#[derive(Debug, Default, Deserialize)]
pub struct TagList {
    #[serde(default)]
    pub data: Vec<TagRef>,
}

#[derive(Debug, Deserialize)]
pub struct TagRef {
    pub id: String,
}
