//! `intake-media` — image handling types for the product intake form.
//!
//! A selected image is an [`ImageBlob`]: metadata known at pick time plus a
//! byte source that is only read when a preview is derived. The preview itself
//! is an [`ImagePreview`], a base64 data URL ready for display.

pub mod blob;
pub mod error;
pub mod preview;

pub use blob::{ByteSource, ImageBlob, ImageMeta};
pub use error::{MediaError, MediaResult};
pub use preview::ImagePreview;
