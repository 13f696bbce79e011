use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A cancellable periodic tick source with a stable identity per kind.
///
/// At most one tick task is live per value: `start` on a running timer tears
/// the previous task down before spawning the new one, so two concurrent
/// timers of the same kind cannot exist. Ticks are delivered with `try_send`
/// over a bounded channel; a tick arriving while the receiver is still busy
/// with the previous one is dropped, not queued.
#[derive(Debug)]
pub struct PeriodicTimer<T> {
    kind: &'static str,
    running: Option<CancellationToken>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Clone + Send + 'static> PeriodicTimer<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            running: None,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Begin ticking every `period`, sending `tick` on `tx`. The first tick
    /// lands one full period from now. Any previously running timer of this
    /// value is cancelled first.
    pub fn start(&mut self, period: Duration, tx: Sender<T>, tick: T) {
        self.stop();

        let cancel = CancellationToken::new();
        let child = cancel.clone();
        let kind = self.kind;
        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // the first delivered tick is a full period out.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        match tx.try_send(tick.clone()) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                debug!(kind, "tick dropped; receiver busy");
                            }
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
        });

        debug!(kind, period_ms = period.as_millis() as u64, "timer started");
        self.running = Some(cancel);
    }

    /// Cancel the timer. Immediate for future ticks; a reaction already
    /// running on the receiver side completes regardless.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.running.take() {
            cancel.cancel();
            debug!(kind = self.kind, "timer stopped");
        }
    }
}

impl<T> Drop for PeriodicTimer<T> {
    fn drop(&mut self) {
        if let Some(cancel) = self.running.take() {
            cancel.cancel();
        }
    }
}
