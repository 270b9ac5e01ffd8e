//! The form controller and its event loop.
//!
//! All form state lives inside one spawned task that drains one message
//! queue. [`FormHandle`] methods and background completions (image reads,
//! sink calls) only ever send [`FormMessage`]s, so every state change happens
//! on the loop, in arrival order. Observable state goes out as
//! [`FormSnapshot`]s on a watch channel after each change.

use std::sync::Arc;
use std::time::Duration;

use intake_core::{AttemptId, ValidationErrors};
use intake_draft::ProductDraft;
use intake_media::{ImageBlob, ImagePreview, MediaError};
use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};

use crate::envelope::SubmissionEnvelope;
use crate::message::FormMessage;
use crate::notify::{Notification, NotificationHub};
use crate::sink::{SubmitError, SubmitSink};
use crate::state::{FormSnapshot, SubmissionState};

/// Toast text for an accepted submission.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Product submitted successfully!";

/// Tuning knobs for the controller.
#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    /// When set, a sink call that outlives this duration settles as
    /// [`SubmitError::TimedOut`]. Off by default.
    pub submit_timeout: Option<Duration>,
}

/// A not-yet-started controller: the sink it will submit to, its config and
/// its notification hub. [`FormController::start`] consumes it and spawns the
/// event loop.
pub struct FormController<S> {
    sink: Arc<S>,
    config: ControllerConfig,
    hub: Arc<NotificationHub>,
}

impl<S: SubmitSink> FormController<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, ControllerConfig::default())
    }

    pub fn with_config(sink: S, config: ControllerConfig) -> Self {
        Self {
            sink: Arc::new(sink),
            config,
            hub: Arc::new(NotificationHub::new()),
        }
    }

    /// The notification hub, for subscribing before the loop starts.
    pub fn notifications(&self) -> &NotificationHub {
        &self.hub
    }

    /// Spawns the event loop. Returns the caller-facing handle and the
    /// loop's join handle.
    pub fn start(self) -> (FormHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(FormSnapshot::default());
        let ctx = LoopContext {
            tx: tx.downgrade(),
            snapshots: snapshot_tx,
            sink: self.sink,
            config: self.config,
            hub: Arc::clone(&self.hub),
        };
        let join = tokio::spawn(run_loop(rx, ctx));
        let handle = FormHandle {
            tx,
            snapshots: snapshot_rx,
            hub: self.hub,
        };
        (handle, join)
    }
}

/// Cheap-to-clone handle onto a running controller.
///
/// Every method is a fire-and-forget message send; the loop applies them in
/// order. Once the loop is gone (shutdown, or every handle dropped) sends are
/// silently discarded. Dropping the last handle closes the queue and ends the
/// loop.
#[derive(Clone)]
pub struct FormHandle {
    tx: mpsc::UnboundedSender<FormMessage>,
    snapshots: watch::Receiver<FormSnapshot>,
    hub: Arc<NotificationHub>,
}

impl FormHandle {
    pub fn set_name(&self, name: impl Into<String>) {
        self.send(FormMessage::SetName(name.into()));
    }

    pub fn set_price(&self, price: f64) {
        self.send(FormMessage::SetPrice(price));
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.send(FormMessage::SetCategory(category.into()));
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.send(FormMessage::SetDescription(description.into()));
    }

    /// Attaches `blob` to the draft and kicks off a background preview read.
    pub fn select_image(&self, blob: ImageBlob) {
        self.send(FormMessage::SelectImage(blob));
    }

    pub fn clear_image(&self) {
        self.send(FormMessage::ClearImage);
    }

    /// Validates the draft and, when it passes, dispatches it to the sink.
    pub fn submit(&self) {
        self.send(FormMessage::Submit);
    }

    pub fn shutdown(&self) {
        self.send(FormMessage::Shutdown);
    }

    /// The current snapshot, cloned.
    pub fn snapshot(&self) -> FormSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A watch receiver over snapshots, for awaiting state changes.
    pub fn snapshots(&self) -> watch::Receiver<FormSnapshot> {
        self.snapshots.clone()
    }

    pub fn notifications(&self) -> &NotificationHub {
        &self.hub
    }

    fn send(&self, message: FormMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Form controller is gone; dropping message");
        }
    }
}

/// Everything a message handler needs besides the state itself.
struct LoopContext<S> {
    /// Weak so that spawned tasks never keep the queue alive on their own.
    tx: mpsc::WeakUnboundedSender<FormMessage>,
    snapshots: watch::Sender<FormSnapshot>,
    sink: Arc<S>,
    config: ControllerConfig,
    hub: Arc<NotificationHub>,
}

impl<S: SubmitSink> LoopContext<S> {
    fn publish(&self, state: &ControllerState) {
        self.snapshots.send_replace(state.snapshot());
    }

    fn spawn_preview_read(&self, blob: ImageBlob, generation: u64) -> AbortHandle {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = ImagePreview::derive(&blob).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(FormMessage::PreviewReady { generation, result });
            }
        })
        .abort_handle()
    }

    fn spawn_submit(&self, envelope: SubmissionEnvelope) {
        let tx = self.tx.clone();
        let sink = Arc::clone(&self.sink);
        let limit = self.config.submit_timeout;
        let attempt = envelope.attempt_id;
        tokio::spawn(async move {
            let result = match limit {
                Some(limit) => match tokio::time::timeout(limit, sink.submit(envelope)).await {
                    Ok(result) => result,
                    Err(_) => Err(SubmitError::TimedOut),
                },
                None => sink.submit(envelope).await,
            };
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(FormMessage::SubmitSettled { attempt, result });
            }
        });
    }
}

/// The loop's private state. Nothing outside the loop ever touches it.
struct ControllerState {
    draft: ProductDraft,
    errors: ValidationErrors,
    preview: Option<ImagePreview>,
    /// Bumped whenever the selected image changes (select, clear, reset).
    /// Preview completions carrying an older value are stale and discarded.
    preview_generation: u64,
    /// The latest image read still possibly running; aborted at teardown.
    pending_read: Option<AbortHandle>,
    /// The attempt currently at the sink, if any.
    in_flight: Option<AttemptId>,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            draft: ProductDraft::empty(),
            errors: ValidationErrors::new(),
            preview: None,
            preview_generation: 0,
            pending_read: None,
            in_flight: None,
        }
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            preview: self.preview.clone(),
            submission: if self.in_flight.is_some() {
                SubmissionState::InFlight
            } else {
                SubmissionState::Idle
            },
        }
    }
}

async fn run_loop<S: SubmitSink>(mut rx: mpsc::UnboundedReceiver<FormMessage>, ctx: LoopContext<S>) {
    let mut state = ControllerState::new();
    tracing::info!("Form controller started");
    while let Some(message) = rx.recv().await {
        if !handle_message(&mut state, message, &ctx) {
            break;
        }
    }
    // Torn down mid-read: the pending read has nowhere to deliver anyway.
    if let Some(read) = state.pending_read.take() {
        read.abort();
    }
    tracing::info!("Form controller stopped");
}

/// Applies one message to the state. Returns `false` when the loop should
/// stop.
fn handle_message<S: SubmitSink>(
    state: &mut ControllerState,
    message: FormMessage,
    ctx: &LoopContext<S>,
) -> bool {
    match message {
        FormMessage::SetName(name) => {
            state.draft.name = name;
            ctx.publish(state);
        }
        FormMessage::SetPrice(price) => {
            state.draft.price = price;
            ctx.publish(state);
        }
        FormMessage::SetCategory(category) => {
            state.draft.category = category;
            ctx.publish(state);
        }
        FormMessage::SetDescription(description) => {
            state.draft.description = description;
            ctx.publish(state);
        }
        FormMessage::SelectImage(blob) => on_select_image(state, blob, ctx),
        FormMessage::ClearImage => on_clear_image(state, ctx),
        FormMessage::Submit => on_submit(state, ctx),
        FormMessage::PreviewReady { generation, result } => {
            on_preview_ready(state, generation, result, ctx)
        }
        FormMessage::SubmitSettled { attempt, result } => {
            on_submit_settled(state, attempt, result, ctx)
        }
        FormMessage::Shutdown => {
            tracing::info!("Form controller received shutdown");
            return false;
        }
    }
    true
}

fn on_select_image<S: SubmitSink>(state: &mut ControllerState, blob: ImageBlob, ctx: &LoopContext<S>) {
    if !blob.looks_like_image() {
        tracing::debug!(
            "Selected file {} does not declare an image content type",
            blob.filename
        );
    }
    state.preview_generation += 1;
    let generation = state.preview_generation;
    state.draft.image = Some(blob.clone());
    tracing::debug!(
        "Image selected: {} ({} bytes), preview generation {}",
        blob.filename,
        blob.size_bytes,
        generation
    );
    // The old preview stays visible until the new read lands.
    ctx.publish(state);
    state.pending_read = Some(ctx.spawn_preview_read(blob, generation));
}

fn on_clear_image<S: SubmitSink>(state: &mut ControllerState, ctx: &LoopContext<S>) {
    state.preview_generation += 1;
    state.draft.image = None;
    state.preview = None;
    tracing::debug!("Image cleared, preview generation {}", state.preview_generation);
    ctx.publish(state);
}

fn on_preview_ready<S: SubmitSink>(
    state: &mut ControllerState,
    generation: u64,
    result: Result<ImagePreview, MediaError>,
    ctx: &LoopContext<S>,
) {
    if generation != state.preview_generation {
        tracing::warn!(
            "Discarding stale preview (generation {}, current {})",
            generation,
            state.preview_generation
        );
        return;
    }
    match result {
        Ok(preview) => {
            tracing::debug!("Preview ready for generation {}", generation);
            state.preview = Some(preview);
        }
        Err(e) => {
            tracing::warn!("Image preview failed: {}", e);
            state.preview = None;
            ctx.hub
                .publish(Notification::error(format!("Could not preview image: {e}")));
        }
    }
    ctx.publish(state);
}

fn on_submit<S: SubmitSink>(state: &mut ControllerState, ctx: &LoopContext<S>) {
    if let Some(attempt) = state.in_flight {
        tracing::warn!("Submit ignored: attempt {} is still in flight", attempt);
        return;
    }
    match state.draft.validate() {
        Err(errors) => {
            tracing::debug!("Submit rejected by validation: {}", errors);
            state.errors = errors;
            ctx.publish(state);
        }
        Ok(product) => {
            state.errors = ValidationErrors::new();
            let envelope = SubmissionEnvelope::new(&product);
            let attempt = envelope.attempt_id;
            state.in_flight = Some(attempt);
            tracing::info!("Submitting attempt {} ({})", attempt, product.name());
            ctx.publish(state);
            ctx.spawn_submit(envelope);
        }
    }
}

fn on_submit_settled<S: SubmitSink>(
    state: &mut ControllerState,
    attempt: AttemptId,
    result: Result<(), SubmitError>,
    ctx: &LoopContext<S>,
) {
    if state.in_flight != Some(attempt) {
        tracing::warn!("Ignoring settlement for stale attempt {}", attempt);
        return;
    }
    state.in_flight = None;
    match result {
        Ok(()) => {
            tracing::info!("Attempt {} accepted", attempt);
            state.draft = ProductDraft::empty();
            state.errors = ValidationErrors::new();
            state.preview = None;
            state.preview_generation += 1;
            ctx.hub.publish(Notification::success(SUBMIT_SUCCESS_MESSAGE));
        }
        Err(e) => {
            tracing::error!("Attempt {} failed: {}", attempt, e);
            ctx.hub.publish(Notification::error(e.to_string()));
        }
    }
    ctx.publish(state);
}
