//! Coda webhook delivery for run results.

pub mod client;
pub mod error;
pub mod payload;

pub use client::CodaClient;
pub use error::CodaError;
pub use payload::{CodaPayload, CountRow};
