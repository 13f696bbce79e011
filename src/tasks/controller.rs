use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{self, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Configuration;
use crate::display::{DisplayAction, DisplayStateMachine};
use crate::events::Tick;
use crate::net::PhotoBackend;
use crate::photos::{PhotoList, ReconcileOutcome};
use crate::render::{ResourceLoader, TransitionRenderer};
use crate::timer::PeriodicTimer;

/// Runs the kiosk: owns the photo list, the display state machine, the
/// renderer, and both timers. Every reaction — poll tick, rotation tick —
/// runs to completion inside this task before the next is taken, so list and
/// state mutation is race-free without locks.
///
/// Tick channels are bounded at one and timers drop ticks on a full channel,
/// which keeps polls at most one in flight: a tick that lands while the
/// previous fetch is still being applied is discarded, and the next scheduled
/// tick is the retry.
pub async fn run<B, L>(
    cfg: Configuration,
    backend: B,
    loader: L,
    cancel: CancellationToken,
) -> Result<()>
where
    B: PhotoBackend,
    L: ResourceLoader,
{
    let mut photos = PhotoList::new();
    let mut display = DisplayStateMachine::new();
    let mut renderer = TransitionRenderer::new(loader);

    let (poll_tx, mut poll_rx) = mpsc::channel::<Tick>(1);
    let (rotate_tx, mut rotate_rx) = mpsc::channel::<Tick>(1);
    let mut polling = PeriodicTimer::new("polling");
    let mut rotation = PeriodicTimer::new("rotation");

    // The first retrieval is fatal on failure: present the error surface and
    // park with neither scheduler running. There is nobody at the kiosk to
    // retry, so the surface stays up until the process is stopped.
    match backend.fetch_photos().await {
        Ok(fetched) => {
            let outcome = photos.reconcile(fetched);
            if photos.is_empty() {
                info!("no photos available; showing instructions");
            }
            apply_actions(
                &mut display,
                &mut renderer,
                &photos,
                outcome,
                &mut rotation,
                &cfg,
                &rotate_tx,
            )
            .await;
        }
        Err(err) => {
            error!(%err, "initial photo retrieval failed; showing error surface");
            cancel.cancelled().await;
            return Err(err.into());
        }
    }

    polling.start(cfg.polling_interval, poll_tx.clone(), Tick);
    info!(
        polling_ms = cfg.polling_interval.as_millis() as u64,
        rotation_ms = cfg.rotation_interval.as_millis() as u64,
        "kiosk running"
    );

    loop {
        select! {
            _ = cancel.cancelled() => {
                rotation.stop();
                polling.stop();
                info!("cancel received; exiting controller");
                break;
            }

            Some(Tick) = poll_rx.recv() => {
                match backend.fetch_photos().await {
                    Ok(fetched) => {
                        let outcome = photos.reconcile(fetched);
                        apply_actions(
                            &mut display,
                            &mut renderer,
                            &photos,
                            outcome,
                            &mut rotation,
                            &cfg,
                            &rotate_tx,
                        )
                        .await;
                    }
                    // Swallowed: the next scheduled tick is the retry.
                    Err(err) => warn!(%err, "poll failed; retrying on next tick"),
                }
            }

            Some(Tick) = rotate_rx.recv() => {
                if photos.len() < 2 {
                    continue;
                }
                let from = display.current_index();
                let to = renderer.advance(&photos, from).await;
                if to != from {
                    if let Err(err) = display.set_index(to, photos.len()) {
                        error!(%err, "rotation produced an out-of-range index");
                    }
                }
            }
        }
    }

    Ok(())
}

async fn apply_actions<L: ResourceLoader>(
    display: &mut DisplayStateMachine,
    renderer: &mut TransitionRenderer<L>,
    photos: &PhotoList,
    outcome: ReconcileOutcome,
    rotation: &mut PeriodicTimer<Tick>,
    cfg: &Configuration,
    rotate_tx: &Sender<Tick>,
) {
    for action in display.apply(outcome, photos.len()) {
        match action {
            DisplayAction::ShowCarousel => info!("surface: carousel"),
            DisplayAction::ShowInstructions => info!("surface: no-photos instructions"),
            DisplayAction::RenderIndex(index) => {
                if let Err(err) = renderer.show(photos, index).await {
                    error!(%err, "initial render failed; leaving state unchanged");
                }
            }
            DisplayAction::StartRotation => {
                // Idempotent: an already running rotation keeps its phase.
                if !rotation.is_running() {
                    rotation.start(cfg.rotation_interval, rotate_tx.clone(), Tick);
                }
            }
            DisplayAction::StopRotation => rotation.stop(),
        }
    }
}
