//! Unsubscribe handle returned by insert subscriptions.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::types::source::SourceKind;

/// Handle to a running insert subscription.
///
/// The listener task watches the cancel signal and exits when it flips to
/// `true`. Dropping the handle also cancels the subscription.
#[derive(Debug)]
pub struct SubscriptionHandle {
    /// Which source this subscription listens to.
    source: SourceKind,
    /// Cancel signal observed by the listener task.
    cancel: watch::Sender<bool>,
    /// The listener task, if one was spawned.
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    /// Create a handle for a listener task.
    ///
    /// The task must stop once `cancel` receives `true`.
    pub fn new(source: SourceKind, cancel: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self {
            source,
            cancel,
            task: Some(task),
        }
    }

    /// Create a cancel channel for a listener task.
    pub fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
        watch::channel(false)
    }

    /// The source this subscription belongs to.
    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Stop delivery and wait for the listener task to exit.
    pub async fn unsubscribe(mut self) {
        let _ = self.cancel.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::debug!(source = %self.source, "Subscription task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
    }
}
