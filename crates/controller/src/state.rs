//! Observable form state.

use intake_core::ValidationErrors;
use intake_draft::ProductDraft;
use intake_media::ImagePreview;
use serde::Serialize;

/// Whether a submission is currently at the sink.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }
}

/// A point-in-time copy of everything a rendering surface needs: the draft as
/// typed so far, the per-field errors from the last submit, the image preview
/// and the in-flight flag (which doubles as the submit button's disabled
/// state).
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormSnapshot {
    pub draft: ProductDraft,
    pub errors: ValidationErrors,
    pub preview: Option<ImagePreview>,
    pub submission: SubmissionState,
}

impl FormSnapshot {
    /// Whether a submit would be accepted right now (the button is enabled).
    pub fn can_submit(&self) -> bool {
        !self.submission.is_in_flight()
    }
}
