//! The submission sink: where a validated product goes.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::envelope::SubmissionEnvelope;

/// Why the sink refused or lost an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission timed out")]
    TimedOut,
}

impl SubmitError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// Accepts validated submissions.
///
/// A real backend would POST the envelope somewhere; [`SimulatedSink`] stands
/// in with a timer. The controller only ever sees this contract, so swapping
/// the implementation never touches the submit flow.
pub trait SubmitSink: Send + Sync + 'static {
    fn submit(
        &self,
        envelope: SubmissionEnvelope,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// The stand-in backend: sleeps for a fixed delay, traces the envelope JSON,
/// then settles with a canned outcome.
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    delay: Duration,
    outcome: SimulatedOutcome,
}

#[derive(Debug, Clone)]
enum SimulatedOutcome {
    Accept,
    Reject(String),
}

impl SimulatedSink {
    /// Default settle delay for the fake network call.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// A sink that accepts every submission after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Accept,
        }
    }

    /// A sink that rejects every submission with `reason` after `delay`.
    pub fn rejecting(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Reject(reason.into()),
        }
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl SubmitSink for SimulatedSink {
    async fn submit(&self, envelope: SubmissionEnvelope) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;
        match serde_json::to_string(&envelope) {
            Ok(json) => tracing::info!("simulated sink received submission: {}", json),
            Err(e) => tracing::warn!("simulated sink could not serialize envelope: {}", e),
        }
        match &self.outcome {
            SimulatedOutcome::Accept => Ok(()),
            SimulatedOutcome::Reject(reason) => Err(SubmitError::rejected(reason.clone())),
        }
    }
}
