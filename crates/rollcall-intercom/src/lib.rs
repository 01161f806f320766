//! Intercom API client: contact search and batch tagging.

pub mod client;
pub mod error;
pub mod normalize;
mod rate_limit;
pub mod types;

pub use client::IntercomClient;
pub use error::IntercomError;
pub use normalize::normalize_contact;
pub use types::{Contact, SearchResponse};
