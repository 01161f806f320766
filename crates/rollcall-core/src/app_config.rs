use crate::ConfigError;

/// Runtime configuration for a `rollcall` run.
///
/// Built by [`crate::load_app_config`]; secrets are redacted from `Debug`.
#[derive(Clone)]
pub struct AppConfig {
    /// Intercom access token. Only required for live (non-test) runs.
    pub intercom_token: Option<String>,
    pub intercom_api_url: String,
    pub coda_webhook_url: Option<String>,
    pub coda_api_token: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    pub max_rate_limit_retries: u32,
    pub fee_waiver_tag_id: String,
    pub product_b_prefix: String,
    pub tag_name: String,
    pub tag_batch_size: usize,
    pub tag_batch_delay_ms: u64,
    /// Sample emails per category, already clamped to [`crate::MAX_SAMPLE_SIZE`].
    pub sample_size: usize,
    pub sample_seed: Option<u64>,
}

impl AppConfig {
    /// Returns the Intercom token, which live runs cannot do without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no token was configured
    /// in the environment or the credentials file.
    pub fn require_intercom_token(&self) -> Result<&str, ConfigError> {
        self.intercom_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("INTERCOM_TOKEN".to_string()))
    }

    /// Returns the webhook URL and token when both are configured.
    #[must_use]
    pub fn coda_credentials(&self) -> Option<(&str, &str)> {
        match (&self.coda_webhook_url, &self.coda_api_token) {
            (Some(url), Some(token)) => Some((url.as_str(), token.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "intercom_token",
                &self.intercom_token.as_ref().map(|_| "[redacted]"),
            )
            .field("intercom_api_url", &self.intercom_api_url)
            .field("coda_webhook_url", &self.coda_webhook_url)
            .field(
                "coda_api_token",
                &self.coda_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .field("fee_waiver_tag_id", &self.fee_waiver_tag_id)
            .field("product_b_prefix", &self.product_b_prefix)
            .field("tag_name", &self.tag_name)
            .field("tag_batch_size", &self.tag_batch_size)
            .field("tag_batch_delay_ms", &self.tag_batch_delay_ms)
            .field("sample_size", &self.sample_size)
            .field("sample_seed", &self.sample_seed)
            .finish()
    }
}
