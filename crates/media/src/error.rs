//! Media error model.

use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

/// Failures while handling a selected image.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read image `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl MediaError {
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
