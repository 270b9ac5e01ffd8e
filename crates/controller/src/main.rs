//! Demo wiring: drives the form through an invalid submit, an image
//! selection and a successful submission, logging what a rendering surface
//! would show along the way.

use std::time::Duration;

use anyhow::Context;
use intake_controller::{FormController, FormSnapshot, SimulatedSink};
use intake_media::ImageBlob;
use tokio::sync::watch;

const LAMP_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn submit_delay_from_env() -> Duration {
    match std::env::var("INTAKE_SUBMIT_DELAY_MS") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!(
                    "INTAKE_SUBMIT_DELAY_MS={} is not a number; using the default",
                    raw
                );
                SimulatedSink::DEFAULT_DELAY
            }
        },
        Err(_) => SimulatedSink::DEFAULT_DELAY,
    }
}

async fn next_matching<F>(
    snapshots: &mut watch::Receiver<FormSnapshot>,
    pred: F,
) -> anyhow::Result<FormSnapshot>
where
    F: FnMut(&FormSnapshot) -> bool,
{
    let snapshot = snapshots
        .wait_for(pred)
        .await
        .context("form controller stopped early")?;
    Ok(snapshot.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    intake_observability::init();

    let delay = submit_delay_from_env();
    tracing::info!("Simulated sink delay: {:?}", delay);

    let controller = FormController::new(SimulatedSink::new(delay));
    let feed = controller.notifications().subscribe();
    let (handle, join) = controller.start();
    let mut snapshots = handle.snapshots();

    // Submitting the untouched form: every required field reports an error.
    handle.submit();
    let snapshot = next_matching(&mut snapshots, |s| !s.errors.is_empty()).await?;
    for (field, message) in snapshot.errors.iter() {
        tracing::info!("Field error [{}]: {}", field, message);
    }

    // Fill the form and attach an image.
    handle.set_name("Desk Lamp");
    handle.set_price(49.99);
    handle.set_category("home");
    handle.set_description("Adjustable LED desk lamp with a warm glow");
    handle.select_image(ImageBlob::from_bytes("lamp.png", LAMP_PNG.to_vec()));
    let snapshot = next_matching(&mut snapshots, |s| s.preview.is_some()).await?;
    if let Some(preview) = &snapshot.preview {
        tracing::info!("Preview ready ({} data-URL chars)", preview.data_url().len());
    }

    // Submit for real and watch the round trip.
    handle.submit();
    let snapshot = next_matching(&mut snapshots, |s| {
        s.submission.is_in_flight() || s.draft.name.is_empty()
    })
    .await?;
    if snapshot.submission.is_in_flight() {
        tracing::info!("Submission in flight; submit stays disabled until it settles");
    }
    let snapshot = next_matching(&mut snapshots, |s| {
        !s.submission.is_in_flight() && s.draft.name.is_empty()
    })
    .await?;

    let notification = feed
        .try_recv()
        .context("expected a settlement notification")?;
    tracing::info!(
        "Toast ({}): {}",
        notification.level.as_str(),
        notification.message
    );
    tracing::info!(
        "Form reset for the next product: name={:?} price={} category={:?}",
        snapshot.draft.name,
        snapshot.draft.price,
        snapshot.draft.category
    );

    handle.shutdown();
    join.await.context("form controller task failed")?;
    Ok(())
}
