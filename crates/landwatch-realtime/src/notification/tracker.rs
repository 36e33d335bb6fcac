//! Live notification counters for one session.
//!
//! The counters live in a `watch` slot and are only ever replaced whole.
//! After [`NotificationTracker::start`], every recomputation runs on the
//! worker task, so insert events from the three sources and explicit
//! refreshes are serialized through one writer.
//!
//! A visit zeroes the unvisited counter immediately. Each visit bumps an
//! epoch under the slot's write lock; a recomputation that started before
//! the visit sees a different epoch when it tries to publish and is redone
//! against the new watermark instead of overwriting the visit.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use landwatch_core::config::notification::NotificationConfig;
use landwatch_core::error::AppError;
use landwatch_core::result::AppResult;
use landwatch_core::types::{RecordFilter, SubscriptionHandle};
use landwatch_database::sources::SourceSet;
use landwatch_entity::notification::{NotificationState, TrackerPhase, VisitState};
use landwatch_service::visit::{VisitOutcome, VisitRecorder};

use super::counter::count_all;
use super::worker::{self, RefreshRequest};

/// How many times a recomputation is redone after losing to a visit.
const MAX_PUBLISH_ATTEMPTS: usize = 3;

/// State shared between the tracker handle and its worker task.
#[derive(Debug)]
pub(crate) struct TrackerShared {
    /// Source adapters to count against.
    sources: SourceSet,
    /// Watermark reader/writer.
    visits: VisitRecorder,
    /// Trailing window of the "new" counter.
    new_window: chrono::Duration,
    /// Current counters.
    state: watch::Sender<NotificationState>,
    /// Lifecycle phase.
    phase: watch::Sender<TrackerPhase>,
    /// Bumped on every visit.
    visit_epoch: AtomicU64,
}

impl TrackerShared {
    /// Recompute all counters and publish them.
    ///
    /// Returns the published state, or the current one if every attempt
    /// was superseded by a visit.
    pub(crate) async fn recompute(&self) -> NotificationState {
        for attempt in 1..=MAX_PUBLISH_ATTEMPTS {
            let epoch = self.visit_epoch.load(Ordering::SeqCst);
            let next = self.compute().await;

            let published = self.state.send_if_modified(|current| {
                if self.visit_epoch.load(Ordering::SeqCst) != epoch {
                    return false;
                }
                *current = next.clone();
                true
            });

            if published {
                debug!(
                    total = next.total_alerts,
                    new = next.new_alerts,
                    unvisited = next.unvisited_alerts,
                    "Notification counters recomputed"
                );
                return next;
            }
            debug!(attempt, "Recomputation superseded by a visit, retrying");
        }

        self.state.borrow().clone()
    }

    async fn compute(&self) -> NotificationState {
        let now = Utc::now();
        let last_visited = self.watermark().await;
        let since_visit = last_visited.map(RecordFilter::created_since);
        let all = RecordFilter::all();
        let recent = RecordFilter::created_since(now - self.new_window);

        let (total, new_alerts, unvisited) = tokio::join!(
            count_all(&self.sources, &all),
            count_all(&self.sources, &recent),
            async {
                match &since_visit {
                    Some(filter) => Some(count_all(&self.sources, filter).await),
                    None => None,
                }
            },
        );

        NotificationState {
            total_alerts: total,
            new_alerts,
            unvisited_alerts: unvisited.unwrap_or(total),
            last_checked: Some(now),
            last_visited,
        }
    }

    /// Latest of the persisted watermark and the in-memory one.
    ///
    /// The in-memory value covers visits whose write did not persist.
    async fn watermark(&self) -> Option<DateTime<Utc>> {
        let local = self.state.borrow().last_visited;
        let stored = match self.visits.last_visited().await {
            Ok(at) => at,
            Err(e) => {
                warn!("Watermark unreadable, using in-memory value: {e}");
                None
            }
        };
        stored.max(local)
    }

    /// Zero the unvisited counter. The watermark never moves backwards, so
    /// overlapping visits keep the later timestamp.
    fn apply_visit(&self, at: DateTime<Utc>) {
        self.state.send_modify(|state| {
            self.visit_epoch.fetch_add(1, Ordering::SeqCst);
            let at = state.last_visited.map_or(at, |previous| previous.max(at));
            *state = state.visited(at);
        });
    }
}

/// Handles of a started tracker.
#[derive(Debug)]
struct Running {
    /// Insert subscriptions feeding the worker.
    subscriptions: Vec<SubscriptionHandle>,
    /// Worker stop signal.
    shutdown: watch::Sender<bool>,
    /// Worker task.
    task: JoinHandle<()>,
}

/// Live total / new / unvisited counters for one session.
#[derive(Debug)]
pub struct NotificationTracker {
    /// Shared with the worker.
    shared: Arc<TrackerShared>,
    /// Refresh requests to the worker.
    requests: mpsc::Sender<RefreshRequest>,
    /// Request receiver, handed to the worker on start.
    pending_requests: Mutex<Option<mpsc::Receiver<RefreshRequest>>>,
    /// Present while the worker runs.
    running: Mutex<Option<Running>>,
    /// Capacity of the insert-event queue.
    trigger_buffer: usize,
    /// Periodic refresh, if enabled.
    refresh_interval: Option<Duration>,
}

impl NotificationTracker {
    /// Creates a tracker in the `Uninitialized` phase.
    pub fn new(sources: SourceSet, visits: VisitRecorder, config: &NotificationConfig) -> Self {
        let trigger_buffer = config.trigger_buffer.max(1);
        let (requests, pending) = mpsc::channel(trigger_buffer);

        Self {
            shared: Arc::new(TrackerShared {
                sources,
                visits,
                new_window: config.new_window(),
                state: watch::Sender::new(NotificationState::default()),
                phase: watch::Sender::new(TrackerPhase::Uninitialized),
                visit_epoch: AtomicU64::new(0),
            }),
            requests,
            pending_requests: Mutex::new(Some(pending)),
            running: Mutex::new(None),
            trigger_buffer,
            refresh_interval: config.refresh_interval(),
        }
    }

    /// Subscribe to inserts, perform the initial load, and start the worker.
    ///
    /// A source whose subscription fails still counts; it just won't
    /// trigger recomputation on its own inserts.
    pub async fn start(&self) -> AppResult<()> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(AppError::internal("Notification tracker is already running"));
        }
        let Some(requests) = self.pending_requests.lock().await.take() else {
            return Err(AppError::internal(
                "Notification tracker was shut down and cannot be restarted",
            ));
        };

        let (sink, inserts) = mpsc::channel(self.trigger_buffer);
        let subscriptions = self.shared.sources.subscribe_all(sink).await;

        let state = self.shared.recompute().await;
        self.shared.phase.send_replace(TrackerPhase::Ready);
        info!(
            total = state.total_alerts,
            new = state.new_alerts,
            unvisited = state.unvisited_alerts,
            subscriptions = subscriptions.len(),
            "Notification tracker ready"
        );

        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(worker::run(
            self.shared.clone(),
            inserts,
            requests,
            shutdown_rx,
            self.refresh_interval,
        ));

        *running = Some(Running {
            subscriptions,
            shutdown,
            task,
        });
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TrackerPhase {
        *self.shared.phase.borrow()
    }

    /// Snapshot of the counters.
    pub fn state(&self) -> NotificationState {
        self.shared.state.borrow().clone()
    }

    /// Three-way view of the unvisited counter.
    pub fn visit_state(&self) -> VisitState {
        self.shared.state.borrow().visit_state()
    }

    /// Receiver notified on every published state.
    pub fn subscribe(&self) -> watch::Receiver<NotificationState> {
        self.shared.state.subscribe()
    }

    /// Recompute now and return the result.
    ///
    /// Goes through the worker when it is running; otherwise recomputes on
    /// the caller's task.
    pub async fn refresh(&self) -> NotificationState {
        if self.running.lock().await.is_some() {
            let (ack, done) = oneshot::channel();
            if self.requests.send(RefreshRequest { ack }).await.is_ok() {
                if let Ok(state) = done.await {
                    return state;
                }
            }
            warn!("Notification worker unavailable, recomputing inline");
        }
        self.shared.recompute().await
    }

    /// Record that the alert view is being shown.
    ///
    /// The unvisited counter drops to zero before the watermark is written.
    /// A failed write leaves the in-memory visit in place and is reported
    /// in the outcome.
    pub async fn mark_visited(&self) -> VisitOutcome {
        let at = Utc::now();
        self.shared.apply_visit(at);
        self.shared.visits.record_visit(at).await
    }

    /// Stop the worker and drop all insert subscriptions.
    pub async fn shutdown(&self) {
        let Some(running) = self.running.lock().await.take() else {
            return;
        };

        let _ = running.shutdown.send(true);
        for subscription in running.subscriptions {
            subscription.unsubscribe().await;
        }
        if let Err(e) = running.task.await {
            warn!("Notification worker ended abnormally: {e}");
        }
        info!("Notification tracker stopped");
    }
}
