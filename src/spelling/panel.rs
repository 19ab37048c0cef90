use crate::protocol::client_events::ClientEvent;
use crate::protocol::server_events::ServerEvent;
use crate::Result;
use std::time::Duration;

use super::config::PanelConfig;
use super::reducer::{self, Action, Effect, Transition};
use super::state::{PanelState, PracticeRecord, SessionPhase};
use super::tool;
use super::view::{self, View};

/// Work the host must carry out after a panel update.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Send immediately.
    Send(ClientEvent),
    /// Send once `delay` has elapsed; fire-and-forget.
    SendAfter { delay: Duration, event: ClientEvent },
    /// Abort every pending `SendAfter`.
    CancelPending,
}

/// Synchronous owner of the spelling panel state.
///
/// A new panel starts with an empty practice record; create one per mount.
#[derive(Debug, Clone)]
pub struct SpellingPanel {
    config: PanelConfig,
    state: PanelState,
    registration: ClientEvent,
    feedback: ClientEvent,
}

impl SpellingPanel {
    /// # Errors
    /// Returns an error if the tool declaration cannot be serialized.
    #[allow(clippy::result_large_err)]
    pub fn new(config: PanelConfig) -> Result<Self> {
        let registration = tool::registration_event(&config)?;
        let feedback = tool::feedback_event(&config);
        Ok(Self {
            config,
            state: PanelState::default(),
            registration,
            feedback,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    #[must_use]
    pub const fn practice_record(&self) -> &PracticeRecord {
        &self.state.practice_record
    }

    #[must_use]
    pub fn view(&self) -> View {
        view::render(&self.state)
    }

    pub fn set_session_active(&mut self, active: bool) -> Vec<Outbound> {
        let transition = reducer::set_session_active(&self.state, active, &self.config);
        self.commit(transition)
    }

    /// Notify the panel that the event log changed. `events` is newest first.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedToolArgs`] if a tool call cannot be parsed;
    /// the panel state is left as it was before the call.
    #[allow(clippy::result_large_err)]
    pub fn on_events(&mut self, events: &[ServerEvent]) -> Result<Vec<Outbound>> {
        let transition = reducer::reduce(&self.state, Action::EventsChanged(events), &self.config)?;
        Ok(self.commit(transition))
    }

    pub fn toggle_show_all(&mut self) {
        self.state = reducer::toggle_show_all(&self.state).state;
    }

    fn commit(&mut self, Transition { state, effects }: Transition) -> Vec<Outbound> {
        self.state = state;
        effects.into_iter().map(|effect| self.outbound(effect)).collect()
    }

    fn outbound(&self, effect: Effect) -> Outbound {
        match effect {
            Effect::RegisterTool => Outbound::Send(self.registration.clone()),
            Effect::ScheduleFeedback { delay, .. } => Outbound::SendAfter {
                delay,
                event: self.feedback.clone(),
            },
            Effect::CancelFeedback => Outbound::CancelPending,
        }
    }
}
