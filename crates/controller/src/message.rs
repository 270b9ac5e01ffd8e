//! Messages consumed by the controller's event loop.

use intake_core::AttemptId;
use intake_media::{ImageBlob, ImagePreview, MediaError};

use crate::sink::SubmitError;

/// Everything the controller reacts to. Handle methods and background tasks
/// alike only ever send one of these; all state changes happen inside the
/// loop, in arrival order.
#[derive(Debug)]
pub enum FormMessage {
    SetName(String),
    SetPrice(f64),
    SetCategory(String),
    SetDescription(String),
    SelectImage(ImageBlob),
    ClearImage,
    Submit,
    /// A background image read finished for the given preview generation.
    PreviewReady {
        generation: u64,
        result: Result<ImagePreview, MediaError>,
    },
    /// The sink settled the given attempt.
    SubmitSettled {
        attempt: AttemptId,
        result: Result<(), SubmitError>,
    },
    Shutdown,
}
