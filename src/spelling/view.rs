use std::fmt;

use super::state::PanelState;

pub const PANEL_TITLE: &str = "Spelling Tool";
pub const PROMPT_TEXT: &str = "Spell a word to see it displayed here...";
pub const SUMMARY_TEXT: &str = "Session ended. Here are the correct spellings you practiced:";
pub const SHOW_WORDS_LABEL: &str = "Show All Correct Spellings";
pub const HIDE_WORDS_LABEL: &str = "Hide Words";

/// What the panel shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// A judged spelling while the session is live.
    Output {
        word: String,
        correct_word: String,
        is_correct: bool,
        payload: String,
    },
    /// Live session, nothing judged yet.
    Prompt,
    /// Session over: a toggle and, when toggled on, every practiced word.
    Summary {
        toggle_label: &'static str,
        words: Option<Vec<String>>,
    },
}

#[must_use]
pub fn render(state: &PanelState) -> View {
    if !state.session_active {
        return View::Summary {
            toggle_label: if state.show_all_words { HIDE_WORDS_LABEL } else { SHOW_WORDS_LABEL },
            words: state
                .show_all_words
                .then(|| state.practice_record.words().to_vec()),
        };
    }
    match &state.last_output {
        Some(output) => View::Output {
            word: output.args.word.clone(),
            correct_word: output.args.correct_word.clone(),
            is_correct: output.is_correct,
            payload: output.payload.clone(),
        },
        None => View::Prompt,
    }
}

impl View {
    /// The verdict line for a judged spelling.
    #[must_use]
    pub fn verdict(&self) -> Option<String> {
        match self {
            Self::Output { is_correct: true, .. } => Some("Correct! Well done.".to_string()),
            Self::Output { correct_word, .. } => {
                Some(format!("Incorrect. The correct spelling is \"{correct_word}\"."))
            }
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PANEL_TITLE}")?;
        match self {
            Self::Output { word, payload, .. } => {
                writeln!(f, "Spelled Word: {word}")?;
                if let Some(verdict) = self.verdict() {
                    writeln!(f, "{verdict}")?;
                }
                writeln!(f, "{payload}")
            }
            Self::Prompt => writeln!(f, "{PROMPT_TEXT}"),
            Self::Summary { toggle_label, words } => {
                writeln!(f, "{SUMMARY_TEXT}")?;
                writeln!(f, "[{toggle_label}]")?;
                for word in words.iter().flatten() {
                    writeln!(f, "- {word}")?;
                }
                Ok(())
            }
        }
    }
}
