// ABOUTME: Cancelable rest-countdown scheduled task for the session engine
// ABOUTME: One pending countdown at a time; rescheduling cancels the predecessor
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Rest-interval countdown.
//!
//! The countdown is advisory: it never gates engine operations, and a set
//! completed before its rest interval elapses simply cancels the pending
//! countdown. Observers subscribe to a broadcast channel for finished and
//! cancelled events.

use crate::constants::channels;
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Outcome of a scheduled countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestTimerEvent {
    /// The full rest interval elapsed
    Finished { duration: Duration },
    /// A newer countdown (or explicit cancel) superseded this one
    Cancelled,
}

/// Cooperative, cancelable rest countdown.
///
/// At most one countdown is pending per timer; [`schedule`](Self::schedule)
/// aborts any prior countdown before starting the next.
pub struct RestTimer {
    events: broadcast::Sender<RestTimerEvent>,
    pending: Option<PendingCountdown>,
}

struct PendingCountdown {
    cancel: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(channels::REST_TIMER_CHANNEL_SIZE);
        Self {
            events,
            pending: None,
        }
    }

    /// Subscribe to countdown events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RestTimerEvent> {
        self.events.subscribe()
    }

    /// Start a countdown, implicitly cancelling any pending one.
    ///
    /// Returns immediately; the countdown runs as a spawned task and
    /// publishes its outcome on the event channel.
    pub fn schedule(&mut self, duration: Duration) {
        self.cancel();

        let events = self.events.clone();
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        debug!(?duration, "rest countdown scheduled");
        let task = tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(duration) => {
                    // No subscribers is fine; the event is advisory.
                    drop(events.send(RestTimerEvent::Finished { duration }));
                }
                _ = cancel_rx => {
                    drop(events.send(RestTimerEvent::Cancelled));
                }
            }
        });

        self.pending = Some(PendingCountdown {
            cancel: cancel_tx,
            task,
        });
    }

    /// Cancel the pending countdown, if any
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            // Receiver may already have fired; either way the task ends.
            let _ = pending.cancel.send(());
            drop(pending.task);
        }
    }

    /// Whether a countdown is currently scheduled
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for RestTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
