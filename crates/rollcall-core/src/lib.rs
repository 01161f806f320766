//! Domain model, configuration, and the classification pipeline.
//!
//! Everything in this crate is synchronous and free of I/O apart from
//! configuration loading; the CRM and webhook clients live in their own
//! crates and hand plain [`Profile`]s in and take an [`AggregateResult`] out.

pub mod aggregate;
pub mod app_config;
pub mod classifier;
pub mod config;
pub mod error;
pub mod group;
pub mod profile;
pub mod result;
pub mod tier;
pub mod waiver;
pub mod window;

pub use aggregate::{aggregate, compute, compute_with, sample_rng};
pub use app_config::AppConfig;
pub use classifier::{Classifier, MAX_SAMPLE_SIZE};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use group::{group_by_email, Category, EmailGroup, EmailGroups};
pub use profile::{ProductLine, Profile};
pub use result::{AggregateResult, CategorySummary, TaggingOutcome, WaiverSplit};
pub use tier::SubscriptionTier;
pub use window::{filter_window, format_timestamp, RecencyWindow};
