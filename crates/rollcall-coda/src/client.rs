//! HTTP client for the Coda automation webhook.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::CodaError;
use crate::payload::CodaPayload;

/// Posts run payloads to one Coda webhook.
pub struct CodaClient {
    client: Client,
    webhook_url: Url,
    api_token: String,
}

impl CodaClient {
    /// # Errors
    ///
    /// Returns [`CodaError::InvalidWebhookUrl`] if `webhook_url` does not
    /// parse, or [`CodaError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(webhook_url: &str, api_token: &str, timeout_secs: u64) -> Result<Self, CodaError> {
        let parsed = Url::parse(webhook_url).map_err(|e| CodaError::InvalidWebhookUrl {
            url: webhook_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rollcall/0.1 (activity-report)")
            .build()?;

        Ok(Self {
            client,
            webhook_url: parsed,
            api_token: api_token.to_owned(),
        })
    }

    /// Delivers `payload`. Any non-2xx response is an error.
    ///
    /// # Errors
    ///
    /// - [`CodaError::UnexpectedStatus`] for a non-2xx response.
    /// - [`CodaError::Http`] on network failure.
    pub async fn send(&self, payload: &CodaPayload) -> Result<(), CodaError> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .bearer_auth(&self.api_token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CodaError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        tracing::info!(
            run_id = %payload.run_id,
            rows = payload.counts.len(),
            "sent results to Coda webhook"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_webhook_url() {
        let result = CodaClient::new("coda webhook", "token", 5);
        assert!(matches!(
            result,
            Err(CodaError::InvalidWebhookUrl { ref url, .. }) if url == "coda webhook"
        ));
    }

    #[test]
    fn accepts_https_webhook_url() {
        let url = "https://coda.io/apis/v1/docs/abc/hooks/automation/grid-auto-1";
        assert!(CodaClient::new(url, "t", 5).is_ok());
    }
}
