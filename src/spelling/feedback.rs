use crate::protocol::client_events::ClientEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Delayed, fire-and-forget feedback requests tied to one session.
///
/// Each scheduled request runs on its own timer task and is delivered to the
/// session's outbox once the delay elapses. Pending requests are aborted by
/// [`FeedbackScheduler::cancel_all`] and when the scheduler is dropped.
#[derive(Debug, Default)]
pub struct FeedbackScheduler {
    pending: Vec<AbortHandle>,
}

impl FeedbackScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to `outbox` after `delay`. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, event: ClientEvent, outbox: mpsc::Sender<ClientEvent>) {
        self.pending.retain(|handle| !handle.is_finished());
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if outbox.send(event).await.is_err() {
                tracing::warn!("feedback request dropped: session outbox closed");
            }
        });
        self.pending.push(task.abort_handle());
    }

    /// Abort every request that has not fired yet.
    pub fn cancel_all(&mut self) {
        let aborted = self.pending.len();
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            tracing::debug!(aborted, "cancelled pending feedback requests");
        }
    }

    /// Number of scheduled requests that have not completed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|handle| !handle.is_finished()).count()
    }
}

impl Drop for FeedbackScheduler {
    fn drop(&mut self) {
        for handle in &self.pending {
            handle.abort();
        }
    }
}
