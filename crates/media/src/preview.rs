//! Preview derivation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::blob::ImageBlob;
use crate::error::MediaResult;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A displayable rendering of a selected image: a `data:` URL embedding the
/// blob bytes as base64, the form a browser hands an `<img src=...>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePreview {
    data_url: String,
}

impl ImagePreview {
    /// Reads the blob's bytes and encodes them as a data URL.
    pub async fn derive(blob: &ImageBlob) -> MediaResult<Self> {
        let bytes = blob.read_bytes().await?;
        Ok(Self::from_blob_bytes(blob, &bytes))
    }

    /// Encodes already-read `bytes` under the blob's content type.
    pub fn from_blob_bytes(blob: &ImageBlob, bytes: &[u8]) -> Self {
        let content_type = blob
            .content_type
            .as_deref()
            .unwrap_or(FALLBACK_CONTENT_TYPE);
        let payload = STANDARD.encode(bytes);
        Self {
            data_url: format!("data:{content_type};base64,{payload}"),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}
