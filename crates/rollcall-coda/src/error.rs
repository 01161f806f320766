use thiserror::Error;

/// Errors returned when building or delivering a Coda payload.
#[derive(Debug, Error)]
pub enum CodaError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from Coda webhook")]
    UnexpectedStatus { status: u16 },

    /// The result has no `run_id` or `timestamp` attached yet.
    #[error("result is missing run metadata: {field}")]
    MissingRunMetadata { field: &'static str },

    #[error("invalid webhook URL \"{url}\": {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
}
