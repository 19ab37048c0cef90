use crate::protocol::client_events::ClientEvent;
use crate::protocol::models::{ResponseConfig, SessionKind, SessionUpdate, Tool, ToolChoice};
use crate::{Error, Result};
use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::PanelConfig;

/// Name of the tool the model calls once the user has spelled a word.
pub const DISPLAY_SPELLED_WORD: &str = "display_spelled_word";

/// Arguments of a `display_spelled_word` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpelledWordArgs {
    /// The word spelled by the user.
    pub word: String,
    /// The correct spelling of the word.
    pub correct_word: String,
}

impl SpelledWordArgs {
    /// Parse raw tool-call arguments, validating them against the declared schema.
    ///
    /// # Errors
    /// Returns [`Error::MalformedToolArgs`] if `arguments` is not a JSON object
    /// carrying both string fields.
    #[allow(clippy::result_large_err)]
    pub fn parse(call_id: &str, arguments: &str) -> Result<Self> {
        let malformed = |source: serde_json::Error| Error::MalformedToolArgs {
            call_id: call_id.to_string(),
            source,
        };
        // Derived struct impls also accept a positional array.
        match serde_json::from_str::<Value>(arguments).map_err(malformed)? {
            value @ Value::Object(_) => serde_json::from_value(value).map_err(malformed),
            other => Err(malformed(serde::de::Error::invalid_type(
                unexpected(&other),
                &"an object with `word` and `correctWord`",
            ))),
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        is_correct_spelling(&self.word, &self.correct_word)
    }
}

fn unexpected(value: &Value) -> serde::de::Unexpected<'_> {
    use serde::de::Unexpected;
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// The spoken attempt is trimmed; both sides are compared case-insensitively.
#[must_use]
pub fn is_correct_spelling(word: &str, correct_word: &str) -> bool {
    word.trim().to_lowercase() == correct_word.to_lowercase()
}

/// A function tool declared to the model.
#[derive(Clone, Debug)]
pub struct ToolDefinition {
    pub name: String,
    pub description: Option<String>,
    pub schema: RootSchema,
}

impl ToolDefinition {
    #[must_use]
    pub fn for_args<T: JsonSchema>(name: &str, description: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            description,
            schema: schemars::schema_for!(T),
        }
    }

    /// Convert into the protocol-level tool declaration.
    ///
    /// # Errors
    /// Returns an error if schema serialization fails.
    #[allow(clippy::result_large_err)]
    pub fn try_as_tool(&self) -> Result<Tool> {
        let mut parameters = serde_json::to_value(&self.schema)?;
        // The API wants a bare object schema.
        if let Value::Object(map) = &mut parameters {
            map.remove("$schema");
            map.remove("title");
        }
        Ok(Tool::Function {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters,
        })
    }
}

/// Declaration of `display_spelled_word` with the configured description.
#[must_use]
pub fn spelled_word_tool(config: &PanelConfig) -> ToolDefinition {
    ToolDefinition::for_args::<SpelledWordArgs>(
        DISPLAY_SPELLED_WORD,
        Some(config.tool_description.clone()),
    )
}

/// The `session.update` that registers the spelling tool.
///
/// # Errors
/// Returns an error if the tool schema cannot be serialized.
#[allow(clippy::result_large_err)]
pub fn registration_event(config: &PanelConfig) -> Result<ClientEvent> {
    let tool = spelled_word_tool(config).try_as_tool()?;
    Ok(ClientEvent::SessionUpdate {
        event_id: None,
        session: Box::new(SessionUpdate {
            kind: SessionKind::Realtime,
            instructions: None,
            tools: Some(vec![tool]),
            tool_choice: Some(ToolChoice::default()),
        }),
    })
}

/// The `response.create` asking the model to give spoken feedback.
#[must_use]
pub fn feedback_event(config: &PanelConfig) -> ClientEvent {
    ClientEvent::ResponseCreate {
        event_id: None,
        response: Some(Box::new(ResponseConfig {
            instructions: Some(config.feedback_instructions.clone()),
            ..ResponseConfig::default()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trailing_space_misspelling_is_incorrect() {
        let args = SpelledWordArgs::parse("call_1", r#"{"word":"kat ","correctWord":"cat"}"#).unwrap();
        assert!(!args.is_correct());
        assert_eq!(args.correct_word, "cat");
    }

    #[test]
    fn case_differences_are_ignored() {
        let args = SpelledWordArgs::parse("call_1", r#"{"word":"Cat","correctWord":"cat"}"#).unwrap();
        assert!(args.is_correct());
        assert!(is_correct_spelling("  necessary ", "Necessary"));
    }

    #[test]
    fn only_the_attempt_is_trimmed() {
        assert!(!is_correct_spelling("cat", "cat "));
    }

    #[test]
    fn malformed_json_is_classified() {
        let err = SpelledWordArgs::parse("call_9", "{\"word\": ").unwrap_err();
        assert!(matches!(err, Error::MalformedToolArgs { ref call_id, .. } if call_id == "call_9"));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        assert!(SpelledWordArgs::parse("c", r#"{"word":"cat"}"#).is_err());
        assert!(SpelledWordArgs::parse("c", r#"{"word":3,"correctWord":"cat"}"#).is_err());
        assert!(SpelledWordArgs::parse("c", r#"["cat","cat"]"#).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        let err = SpelledWordArgs::parse("call_4", r#"["kat ","cat"]"#).unwrap_err();
        match err {
            Error::MalformedToolArgs { call_id, source } => {
                assert_eq!(call_id, "call_4");
                assert!(source.to_string().contains("sequence"), "{source}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(SpelledWordArgs::parse("c", r#""cat""#).is_err());
        assert!(SpelledWordArgs::parse("c", "null").is_err());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let args =
            SpelledWordArgs::parse("c", r#"{"word":"cat","correctWord":"cat","lang":"en"}"#).unwrap();
        assert!(args.is_correct());
    }

    #[test]
    fn tool_schema_declares_both_required_strings() {
        let tool = spelled_word_tool(&PanelConfig::default()).try_as_tool().unwrap();
        let Tool::Function { name, description, parameters } = tool;
        assert_eq!(name, DISPLAY_SPELLED_WORD);
        assert!(description.is_some_and(|d| d.contains("display the word")));
        assert_eq!(parameters["type"], json!("object"));
        assert_eq!(parameters["properties"]["word"]["type"], json!("string"));
        assert_eq!(parameters["properties"]["correctWord"]["type"], json!("string"));
        let mut required: Vec<&str> = parameters["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        required.sort_unstable();
        assert_eq!(required, vec!["correctWord", "word"]);
        assert!(parameters.get("$schema").is_none());
    }

    #[test]
    fn registration_event_wire_shape() {
        let event = registration_event(&PanelConfig::default()).unwrap();
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["type"], json!("session.update"));
        assert_eq!(wire["session"]["type"], json!("realtime"));
        assert_eq!(wire["session"]["tool_choice"], json!("auto"));
        assert_eq!(wire["session"]["tools"][0]["type"], json!("function"));
        assert_eq!(wire["session"]["tools"][0]["name"], json!(DISPLAY_SPELLED_WORD));
    }

    #[test]
    fn feedback_event_carries_instructions() {
        let wire = serde_json::to_value(feedback_event(&PanelConfig::default())).unwrap();
        assert_eq!(wire["type"], json!("response.create"));
        assert!(wire["response"]["instructions"]
            .as_str()
            .unwrap()
            .contains("encourage the user"));
    }
}
