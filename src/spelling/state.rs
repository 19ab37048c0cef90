use crate::protocol::models::Item;

use super::tool::SpelledWordArgs;

/// Correct spellings presented during the panel's lifetime, in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeRecord {
    words: Vec<String>,
}

impl PracticeRecord {
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    pub(crate) fn push(&mut self, word: impl Into<String>) {
        self.words.push(word.into());
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
}

impl<'a> IntoIterator for &'a PracticeRecord {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The most recent judged tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellingOutput {
    pub call_id: String,
    /// The raw `function_call` item as received.
    pub item: Item,
    pub args: SpelledWordArgs,
    pub is_correct: bool,
    /// Pretty-printed JSON of `item`.
    pub payload: String,
}

/// Where the panel sits in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    /// Active, tool not yet declared to the model.
    Unregistered,
    /// Active, tool declared, nothing judged since the last reset.
    AwaitingUtterance,
    OutputReady,
}

/// All panel state. Transitions happen only through [`super::reducer::reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub session_active: bool,
    pub tool_registered: bool,
    pub last_output: Option<SpellingOutput>,
    pub practice_record: PracticeRecord,
    pub show_all_words: bool,
}

impl PanelState {
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        match (self.session_active, self.tool_registered, self.last_output.is_some()) {
            (false, _, _) => SessionPhase::Idle,
            (true, _, true) => SessionPhase::OutputReady,
            (true, false, false) => SessionPhase::Unregistered,
            (true, true, false) => SessionPhase::AwaitingUtterance,
        }
    }
}
