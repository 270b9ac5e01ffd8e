//! `intake-controller` — the form controller.
//!
//! One controller instance owns all form state inside a single event loop.
//! Callers hold a cheap [`FormHandle`] whose methods are fire-and-forget
//! messages; observable state comes back as [`FormSnapshot`]s on a watch
//! channel, and user-facing outcomes as [`Notification`]s on the hub.

pub mod controller;
pub mod envelope;
pub mod message;
pub mod notify;
pub mod sink;
pub mod state;

pub use controller::{ControllerConfig, FormController, FormHandle, SUBMIT_SUCCESS_MESSAGE};
pub use envelope::{ProductPayload, SubmissionEnvelope};
pub use message::FormMessage;
pub use notify::{Notification, NotificationFeed, NotificationHub, NotificationLevel};
pub use sink::{SimulatedSink, SubmitError, SubmitSink};
pub use state::{FormSnapshot, SubmissionState};
