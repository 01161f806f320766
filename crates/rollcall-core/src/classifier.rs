use crate::waiver::DEFAULT_FEE_WAIVER_TAG_ID;

/// External-id prefix that marks a product-B contact.
pub const DEFAULT_PRODUCT_B_PREFIX: &str = "usr";

/// Upper bound on the number of sample emails reported per category.
pub const MAX_SAMPLE_SIZE: usize = 10;

/// Settings the classification pipeline needs beyond the profiles themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    pub product_b_prefix: String,
    pub fee_waiver_tag_id: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            product_b_prefix: DEFAULT_PRODUCT_B_PREFIX.to_string(),
            fee_waiver_tag_id: DEFAULT_FEE_WAIVER_TAG_ID.to_string(),
        }
    }
}

impl Classifier {
    #[must_use]
    pub fn from_app_config(config: &crate::AppConfig) -> Self {
        Self {
            product_b_prefix: config.product_b_prefix.clone(),
            fee_waiver_tag_id: config.fee_waiver_tag_id.clone(),
        }
    }
}
