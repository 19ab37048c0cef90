//! Pure state transitions for the spelling panel.
//!
//! `reduce` never performs I/O: it returns the next [`PanelState`] together with
//! the [`Effect`]s the caller must carry out. A failed pass leaves the caller's
//! state untouched.

use crate::protocol::models::Item;
use crate::protocol::server_events::ServerEvent;
use crate::Result;
use std::time::Duration;

use super::config::PanelConfig;
use super::state::{PanelState, SpellingOutput};
use super::tool::{DISPLAY_SPELLED_WORD, SpelledWordArgs};

#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    /// The host's session-active flag changed (or was re-asserted).
    SessionActive(bool),
    /// The event log changed. Newest event first.
    EventsChanged(&'a [ServerEvent]),
    ToggleShowAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the `display_spelled_word` declaration.
    RegisterTool,
    /// Request spoken feedback once `delay` has elapsed.
    ScheduleFeedback { call_id: String, delay: Duration },
    /// Drop any feedback requests that have not fired yet.
    CancelFeedback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PanelState,
    pub effects: Vec<Effect>,
}

impl Transition {
    const fn unchanged(state: PanelState) -> Self {
        Self { state, effects: Vec::new() }
    }
}

/// Apply `action` to `state`.
///
/// # Errors
/// Returns [`crate::Error::MalformedToolArgs`] if a `display_spelled_word` call in
/// the newest `response.done` carries arguments that do not match its schema.
#[allow(clippy::result_large_err)]
pub fn reduce(state: &PanelState, action: Action<'_>, config: &PanelConfig) -> Result<Transition> {
    match action {
        Action::SessionActive(active) => Ok(set_session_active(state, active, config)),
        Action::EventsChanged(events) => events_changed(state, events, config),
        Action::ToggleShowAll => Ok(toggle_show_all(state)),
    }
}

/// Flip the summary's "show all words" toggle. Never produces effects.
#[must_use]
pub fn toggle_show_all(state: &PanelState) -> Transition {
    let mut next = state.clone();
    next.show_all_words = !next.show_all_words;
    Transition::unchanged(next)
}

/// Track the host's session-active flag. Ending a session keeps the practice
/// record.
#[must_use]
pub fn set_session_active(state: &PanelState, active: bool, config: &PanelConfig) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();
    match (state.session_active, active) {
        (true, false) => {
            next.session_active = false;
            next.tool_registered = false;
            next.last_output = None;
            if config.cancel_feedback_on_session_end {
                effects.push(Effect::CancelFeedback);
            }
        }
        (false, true) => next.session_active = true,
        _ => {}
    }
    Transition { state: next, effects }
}

fn events_changed(
    state: &PanelState,
    events: &[ServerEvent],
    config: &PanelConfig,
) -> Result<Transition> {
    let mut next = state.clone();
    let mut effects = Vec::new();

    // The log is newest first, so the session's opening event is last.
    if let Some(ServerEvent::SessionCreated { .. }) = events.last() {
        if next.session_active && !next.tool_registered {
            tracing::debug!("session created, registering {DISPLAY_SPELLED_WORD}");
            next.tool_registered = true;
            effects.push(Effect::RegisterTool);
        }
    }

    if let Some(ServerEvent::ResponseDone { response, .. }) = events.first() {
        let calls = response
            .function_calls()
            .filter(|item| item.is_call_to(DISPLAY_SPELLED_WORD));
        for item in calls {
            if let Item::FunctionCall { call_id, arguments, .. } = item {
                let output = judge(item, call_id, arguments)?;
                tracing::debug!(
                    call_id = %call_id,
                    correct = output.is_correct,
                    "judged spelling"
                );
                next.practice_record.push(output.args.correct_word.clone());
                next.last_output = Some(output);
                effects.push(Effect::ScheduleFeedback {
                    call_id: call_id.clone(),
                    delay: config.feedback_delay,
                });
            }
        }
    }

    Ok(Transition { state: next, effects })
}

#[allow(clippy::result_large_err)]
fn judge(item: &Item, call_id: &str, arguments: &str) -> Result<SpellingOutput> {
    let args = SpelledWordArgs::parse(call_id, arguments)?;
    let payload = serde_json::to_string_pretty(item)?;
    Ok(SpellingOutput {
        call_id: call_id.to_string(),
        item: item.clone(),
        is_correct: args.is_correct(),
        args,
        payload,
    })
}
