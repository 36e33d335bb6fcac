//! Single-writer recomputation loop.
//!
//! Insert events, refresh requests, and periodic ticks all land here.
//! Triggers that queue up while a recomputation runs are coalesced into
//! the next one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, trace};

use landwatch_core::events::InsertEvent;
use landwatch_entity::notification::NotificationState;

use super::tracker::TrackerShared;

/// Explicit refresh, answered with the state it produced.
#[derive(Debug)]
pub(crate) struct RefreshRequest {
    /// Receives the recomputed state.
    pub ack: oneshot::Sender<NotificationState>,
}

/// Run until `shutdown` flips to `true` or its sender is dropped.
pub(crate) async fn run(
    shared: Arc<TrackerShared>,
    mut inserts: mpsc::Receiver<InsertEvent>,
    mut requests: mpsc::Receiver<RefreshRequest>,
    mut shutdown: watch::Receiver<bool>,
    refresh_interval: Option<Duration>,
) {
    let mut ticker = refresh_interval.map(|period| {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    });

    debug!(
        periodic = refresh_interval.is_some(),
        "Notification worker started"
    );

    loop {
        let mut acks = Vec::new();

        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
            Some(event) = inserts.recv() => {
                trace!(source = %event.source, record_id = ?event.record_id, "Insert event");
            }
            Some(request) = requests.recv() => {
                acks.push(request.ack);
            }
            _ = next_tick(&mut ticker) => {
                trace!("Periodic refresh");
            }
        }

        let mut coalesced = 0usize;
        while inserts.try_recv().is_ok() {
            coalesced += 1;
        }
        while let Ok(request) = requests.try_recv() {
            acks.push(request.ack);
            coalesced += 1;
        }
        if coalesced > 0 {
            trace!(coalesced, "Coalesced pending triggers");
        }

        let state = shared.recompute().await;
        for ack in acks {
            let _ = ack.send(state.clone());
        }
    }

    debug!("Notification worker stopped");
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
