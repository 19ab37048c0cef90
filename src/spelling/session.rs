use crate::protocol::client_events::ClientEvent;
use crate::protocol::server_events::ServerEvent;
use crate::transport::Transport;
use crate::{Error, Result};
use std::future;
use tokio::sync::{mpsc, oneshot, watch};

use super::config::PanelConfig;
use super::feedback::FeedbackScheduler;
use super::panel::{Outbound, SpellingPanel};
use super::state::{PracticeRecord, SessionPhase};
use super::view::View;

const OUTBOX_CAPACITY: usize = 16;

/// Everything a host needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub phase: SessionPhase,
    pub view: View,
    pub practice_record: PracticeRecord,
    /// The last reducer failure, cleared by the next successful update.
    pub last_error: Option<String>,
}

impl PanelSnapshot {
    fn of(panel: &SpellingPanel, last_error: Option<String>) -> Self {
        Self {
            phase: panel.phase(),
            view: panel.view(),
            practice_record: panel.practice_record().clone(),
            last_error,
        }
    }
}

enum Command {
    ToggleShowAll { respond: oneshot::Sender<()> },
    End { respond: oneshot::Sender<()> },
}

/// A spelling panel bound to a live Realtime session.
///
/// The driver task owns the transport until the session ends, tracks the
/// session's event log and publishes a [`PanelSnapshot`] after every change. It outlives the
/// connection so the summary stays usable; it stops once the `SpellingSession`
/// is dropped.
pub struct SpellingSession {
    sender: mpsc::Sender<Command>,
    snapshots: watch::Receiver<PanelSnapshot>,
}

impl SpellingSession {
    /// Start driving `transport`. Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the panel cannot be built from `config`.
    #[allow(clippy::result_large_err)]
    pub fn from_transport(transport: Box<dyn Transport>, config: PanelConfig) -> Result<Self> {
        let panel = SpellingPanel::new(config)?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(PanelSnapshot::of(&panel, None));

        let driver = Driver {
            panel,
            transport: Some(transport),
            log: EventLog::default(),
            feedback: FeedbackScheduler::new(),
            snapshots: snapshot_tx,
        };
        tokio::spawn(driver.run(cmd_rx));

        Ok(Self { sender: cmd_tx, snapshots: snapshot_rx })
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next published snapshot.
    ///
    /// # Errors
    /// Returns [`Error::ConnectionClosed`] if the driver task has stopped.
    pub async fn changed(&mut self) -> Result<PanelSnapshot> {
        self.snapshots.changed().await.map_err(|_| Error::ConnectionClosed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Flip the "show all words" toggle of the summary view.
    ///
    /// # Errors
    /// Returns [`Error::ConnectionClosed`] if the driver task has stopped.
    pub async fn toggle_show_all(&self) -> Result<()> {
        self.request(|respond| Command::ToggleShowAll { respond }).await
    }

    /// Mark the session inactive and close the transport.
    ///
    /// # Errors
    /// Returns [`Error::ConnectionClosed`] if the driver task has stopped.
    pub async fn end(&self) -> Result<()> {
        self.request(|respond| Command::End { respond }).await
    }

    async fn request(&self, command: impl FnOnce(oneshot::Sender<()>) -> Command) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(command(tx))
            .await
            .map_err(|_| Error::ConnectionClosed)?;
        rx.await.map_err(|_| Error::ConnectionClosed)
    }
}

/// The newest-first event log as the panel reads it: the newest event and the
/// one that opened the session. Events in between are never consulted.
#[derive(Debug, Default)]
struct EventLog {
    events: Vec<ServerEvent>,
}

impl EventLog {
    fn push(&mut self, event: ServerEvent) {
        if self.events.len() < 2 {
            self.events.insert(0, event);
        } else {
            self.events[0] = event;
        }
    }

    fn as_slice(&self) -> &[ServerEvent] {
        &self.events
    }

    fn clear(&mut self) {
        self.events.clear();
    }
}

struct Driver {
    panel: SpellingPanel,
    /// `None` once the session has ended.
    transport: Option<Box<dyn Transport>>,
    log: EventLog,
    feedback: FeedbackScheduler,
    snapshots: watch::Sender<PanelSnapshot>,
}

async fn next_event(transport: &mut Option<Box<dyn Transport>>) -> Result<Option<ServerEvent>> {
    match transport {
        Some(transport) => transport.next_event().await,
        None => future::pending().await,
    }
}

impl Driver {
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<Command>) {
        let (outbox_tx, mut outbox_rx) = mpsc::channel::<ClientEvent>(OUTBOX_CAPACITY);
        let outbound = self.panel.set_session_active(true);
        self.carry_out(outbound, &outbox_tx).await;
        self.publish(None);

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(Command::ToggleShowAll { respond }) => {
                        self.panel.toggle_show_all();
                        self.publish(None);
                        let _ = respond.send(());
                    }
                    Some(Command::End { respond }) => {
                        self.disconnect(&outbox_tx).await;
                        let _ = respond.send(());
                    }
                    None => break,
                },
                Some(event) = outbox_rx.recv() => match self.transport.as_mut() {
                    Some(transport) => {
                        if let Err(err) = transport.send(event).await {
                            tracing::warn!("feedback request failed: {err}");
                        }
                    }
                    None => tracing::debug!("session ended, dropping {}", event.kind()),
                },
                event = next_event(&mut self.transport) => match event {
                    Ok(Some(evt)) => self.on_server_event(evt, &outbox_tx).await,
                    Ok(None) => {
                        tracing::info!("realtime session closed");
                        self.disconnect(&outbox_tx).await;
                    }
                    Err(err) => {
                        tracing::warn!("realtime transport failed: {err}");
                        self.disconnect(&outbox_tx).await;
                    }
                },
            }
        }
    }

    async fn on_server_event(&mut self, evt: ServerEvent, outbox: &mpsc::Sender<ClientEvent>) {
        match &evt {
            ServerEvent::Error { error, .. } => tracing::warn!("server error: {}", error.message),
            ServerEvent::Unknown(_) => tracing::trace!("unhandled event {}", evt.kind()),
            _ => tracing::debug!("received {}", evt.kind()),
        }

        self.log.push(evt);
        match self.panel.on_events(self.log.as_slice()) {
            Ok(outbound) => {
                self.carry_out(outbound, outbox).await;
                self.publish(None);
            }
            Err(err) => {
                tracing::warn!("discarding panel update: {err}");
                self.publish(Some(err.to_string()));
            }
        }
    }

    async fn disconnect(&mut self, outbox: &mpsc::Sender<ClientEvent>) {
        if self.transport.take().is_none() {
            return;
        }
        tracing::debug!("realtime transport closed");
        let outbound = self.panel.set_session_active(false);
        self.carry_out(outbound, outbox).await;
        self.log.clear();
        self.publish(None);
    }

    async fn carry_out(&mut self, outbound: Vec<Outbound>, outbox: &mpsc::Sender<ClientEvent>) {
        for item in outbound {
            match item {
                Outbound::Send(event) => {
                    let Some(transport) = self.transport.as_mut() else {
                        continue;
                    };
                    let kind = event.kind();
                    if let Err(err) = transport.send(event).await {
                        tracing::warn!("failed to send {kind}: {err}");
                    }
                }
                Outbound::SendAfter { delay, event } => {
                    self.feedback.schedule(delay, event, outbox.clone());
                }
                Outbound::CancelPending => self.feedback.cancel_all(),
            }
        }
    }

    fn publish(&self, last_error: Option<String>) {
        self.snapshots.send_replace(PanelSnapshot::of(&self.panel, last_error));
    }
}
