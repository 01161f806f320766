//! Multi-page contact fetch for `IntercomClient`.

use rollcall_core::Profile;

use crate::error::IntercomError;
use crate::normalize::normalize_contact;

use super::IntercomClient;
use super::MAX_PAGES;

impl IntercomClient {
    /// Fetches every contact seen after `query_start`, following
    /// `pages.next.starting_after` until no cursor remains.
    ///
    /// Contacts are normalized into [`Profile`]s in the order returned. The
    /// rate-limit retry budget applies per page, so a 429 on page 40 does not
    /// consume retries spent on page 3.
    ///
    /// **All-or-nothing semantics**: on any page failure the profiles already
    /// collected are discarded and the error is returned. A partial population
    /// would skew every count in the report.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search_page`].
    /// Returns [`IntercomError::PaginationLimit`] if the number of pages
    /// exceeds [`MAX_PAGES`].
    pub async fn fetch_all_profiles(
        &self,
        query_start: i64,
        per_page: u32,
    ) -> Result<Vec<Profile>, IntercomError> {
        let mut profiles: Vec<Profile> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 0usize;

        tracing::info!(query_start, per_page, "fetching contacts seen since query start");

        loop {
            page += 1;
            if page > MAX_PAGES {
                return Err(IntercomError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let response = self
                .search_page(query_start, per_page, cursor.as_deref())
                .await?;

            cursor = response.next_cursor().map(str::to_owned);
            let fetched = response.data.len();
            profiles.extend(response.data.into_iter().map(normalize_contact));

            tracing::info!(page, fetched, total = profiles.len(), "fetched contacts page");

            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(pages = page, total = profiles.len(), "contact fetch complete");
        Ok(profiles)
    }
}
