use std::time::Duration;

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_FEEDBACK_INSTRUCTIONS: &str =
    "Provide feedback on the spelled word and encourage the user to spell another word.";
pub const DEFAULT_TOOL_DESCRIPTION: &str =
    "Call this function to display the word spelled by the user and provide feedback on accuracy.";

/// Tunables for the spelling panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Delay between a judged spelling and the spoken-feedback request.
    pub feedback_delay: Duration,
    /// Instructions carried by the feedback `response.create`.
    pub feedback_instructions: String,
    /// Description attached to the `display_spelled_word` tool declaration.
    pub tool_description: String,
    /// Abort pending feedback requests when the session ends.
    pub cancel_feedback_on_session_end: bool,
}

impl PanelConfig {
    #[must_use]
    pub fn builder() -> PanelConfigBuilder {
        PanelConfigBuilder::new()
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            feedback_instructions: DEFAULT_FEEDBACK_INSTRUCTIONS.to_string(),
            tool_description: DEFAULT_TOOL_DESCRIPTION.to_string(),
            cancel_feedback_on_session_end: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct PanelConfigBuilder {
    config: PanelConfig,
}

impl PanelConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn feedback_delay(mut self, delay: Duration) -> Self {
        self.config.feedback_delay = delay;
        self
    }

    #[must_use]
    pub fn feedback_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.feedback_instructions = instructions.into();
        self
    }

    #[must_use]
    pub fn tool_description(mut self, description: impl Into<String>) -> Self {
        self.config.tool_description = description.into();
        self
    }

    #[must_use]
    pub const fn cancel_feedback_on_session_end(mut self, cancel: bool) -> Self {
        self.config.cancel_feedback_on_session_end = cancel;
        self
    }

    #[must_use]
    pub fn build(self) -> PanelConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_exercise_constants() {
        let config = PanelConfig::default();
        assert_eq!(config.feedback_delay, Duration::from_millis(500));
        assert!(config.cancel_feedback_on_session_end);
        assert!(config.feedback_instructions.starts_with("Provide feedback"));
    }

    #[test]
    fn builder_overrides_fields() {
        let config = PanelConfig::builder()
            .feedback_delay(Duration::from_millis(50))
            .feedback_instructions("Say well done.")
            .cancel_feedback_on_session_end(false)
            .build();
        assert_eq!(config.feedback_delay, Duration::from_millis(50));
        assert_eq!(config.feedback_instructions, "Say well done.");
        assert!(!config.cancel_feedback_on_session_end);
        assert_eq!(config.tool_description, DEFAULT_TOOL_DESCRIPTION);
    }
}
