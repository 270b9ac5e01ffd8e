//! The serialized form of a validated submission.

use chrono::{DateTime, Utc};
use intake_core::AttemptId;
use intake_draft::{Category, ValidProduct};
use intake_media::ImageMeta;
use serde::{Deserialize, Serialize};

/// What the coordinator hands the sink: a validated product stamped with an
/// attempt id and a timestamp. Image bytes stay behind; only their metadata
/// travels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionEnvelope {
    pub attempt_id: AttemptId,
    pub submitted_at: DateTime<Utc>,
    pub product: ProductPayload,
}

impl SubmissionEnvelope {
    /// Stamps `product` with a fresh attempt id and the current time.
    pub fn new(product: &ValidProduct) -> Self {
        Self {
            attempt_id: AttemptId::new(),
            submitted_at: Utc::now(),
            product: ProductPayload::from(product),
        }
    }
}

/// The wire shape of a validated product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub description: String,
    pub image: Option<ImageMeta>,
}

impl From<&ValidProduct> for ProductPayload {
    fn from(product: &ValidProduct) -> Self {
        Self {
            name: product.name().to_string(),
            price: product.price(),
            category: product.category(),
            description: product.description().to_string(),
            image: product.image().map(|blob| blob.meta()),
        }
    }
}
