//! Batched contact tagging for `IntercomClient`.

use std::time::Duration;

use rollcall_core::TaggingOutcome;

use crate::error::IntercomError;

use super::IntercomClient;

impl IntercomClient {
    /// Applies `tag_name` to one batch of contacts via `POST /tags`.
    ///
    /// A single attempt; a 429 surfaces as [`IntercomError::RateLimited`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::search_page`], minus pagination.
    pub async fn tag_contacts(
        &self,
        contact_ids: &[String],
        tag_name: &str,
    ) -> Result<(), IntercomError> {
        let url = self.endpoint("tags")?;
        let users: Vec<serde_json::Value> = contact_ids
            .iter()
            .map(|id| serde_json::json!({ "id": id }))
            .collect();
        let body = serde_json::json!({ "name": tag_name, "users": users });

        self.post_json::<serde_json::Value>(url, &body, "tag response")
            .await?;
        Ok(())
    }

    /// Tags `contact_ids` in chunks of `batch_size`.
    ///
    /// A failed batch is counted and skipped; it never aborts the remaining
    /// batches. After a 429 the batcher waits out `Retry-After` before moving
    /// on. `delay_ms` is slept between batches, not after the last one.
    ///
    /// An empty id list returns a zero outcome without sending anything.
    pub async fn tag_in_batches(
        &self,
        contact_ids: &[String],
        tag_name: &str,
        batch_size: usize,
        delay_ms: u64,
    ) -> TaggingOutcome {
        let mut outcome = TaggingOutcome {
            total_profiles_to_tag: contact_ids.len(),
            ..TaggingOutcome::default()
        };
        if contact_ids.is_empty() {
            tracing::info!("no profiles to tag");
            return outcome;
        }

        let batch_size = batch_size.max(1);
        let total_batches = contact_ids.len().div_ceil(batch_size);
        tracing::info!(
            total = contact_ids.len(),
            batch_size,
            total_batches,
            tag_name,
            "tagging profiles"
        );

        for (index, batch) in contact_ids.chunks(batch_size).enumerate() {
            let batch_num = index + 1;
            match self.tag_contacts(batch, tag_name).await {
                Ok(()) => {
                    outcome.successfully_tagged += batch.len();
                    tracing::info!(batch_num, total_batches, size = batch.len(), "tagged batch");
                }
                Err(err) => {
                    outcome.failed_batches += 1;
                    tracing::warn!(batch_num, total_batches, error = %err, "tag batch failed");
                    if let IntercomError::RateLimited { retry_after_secs } = err {
                        tokio::time::sleep(Duration::from_secs(retry_after_secs)).await;
                    }
                }
            }

            if batch_num < total_batches && delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }

        tracing::info!(
            successfully_tagged = outcome.successfully_tagged,
            failed_batches = outcome.failed_batches,
            "tagging complete"
        );
        outcome
    }
}
