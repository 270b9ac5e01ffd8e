//! The selected image file and its metadata.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, MediaResult};

/// Where a blob's bytes live.
#[derive(Debug, Clone)]
pub enum ByteSource {
    /// Bytes already in memory.
    Memory(Arc<[u8]>),
    /// A file on disk, read lazily.
    Path(PathBuf),
}

/// A selected image file.
///
/// Everything here is known at selection time without touching the contents:
/// a picker reports the name, declared content type and size up front. The
/// bytes themselves are pulled in later with [`ImageBlob::read_bytes`] when a
/// preview is derived.
#[derive(Debug, Clone, Serialize)]
pub struct ImageBlob {
    pub filename: String,
    /// Content type as declared at selection. Advisory only.
    pub content_type: Option<String>,
    pub size_bytes: u64,
    #[serde(skip)]
    pub source: ByteSource,
}

impl ImageBlob {
    /// Builds a blob around bytes already in memory. The content type is
    /// guessed from the filename extension.
    pub fn from_bytes(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let bytes: Vec<u8> = bytes.into();
        Self {
            content_type: guess_content_type(&filename),
            size_bytes: bytes.len() as u64,
            source: ByteSource::Memory(bytes.into()),
            filename,
        }
    }

    /// Builds a blob around a file on disk. The file is stat'ed for its size
    /// here; the contents are not read until [`ImageBlob::read_bytes`].
    pub fn from_path(path: impl Into<PathBuf>) -> MediaResult<Self> {
        let path = path.into();
        let meta = std::fs::metadata(&path)
            .map_err(|source| MediaError::read(path.display().to_string(), source))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            content_type: guess_content_type(&filename),
            size_bytes: meta.len(),
            source: ByteSource::Path(path),
            filename,
        })
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the declared content type claims this is an image. Mirrors a
    /// picker's `image/*` filter: advisory, never grounds for rejecting the
    /// selection.
    pub fn looks_like_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.starts_with("image/"))
    }

    pub fn meta(&self) -> ImageMeta {
        ImageMeta {
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            size_bytes: self.size_bytes,
        }
    }

    /// Reads the blob's bytes from wherever they live.
    pub async fn read_bytes(&self) -> MediaResult<Vec<u8>> {
        match &self.source {
            ByteSource::Memory(bytes) => Ok(bytes.to_vec()),
            ByteSource::Path(path) => {
                tracing::debug!("reading image bytes from {}", path.display());
                tokio::fs::read(path)
                    .await
                    .map_err(|source| MediaError::read(path.display().to_string(), source))
            }
        }
    }
}

/// Serializable summary of a blob, carried where the bytes themselves have no
/// business going (submission envelopes, logs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub filename: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
}

fn guess_content_type(filename: &str) -> Option<String> {
    let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(content_type.to_string())
}
