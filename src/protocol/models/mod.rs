pub mod common;
pub mod items;
pub mod response;
pub mod session;
pub mod tools;

pub use common::{ArbitraryJson, DEFAULT_MODEL, ItemStatus, JsonSchema, Metadata, Role};
pub use items::Item;
pub use response::{ConversationMode, Response, ResponseConfig, ResponseStatus};
pub use session::{Session, SessionKind, SessionUpdate};
pub use tools::{Tool, ToolChoice, ToolChoiceMode};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_choice_auto_is_a_bare_string() {
        let serialized = serde_json::to_value(ToolChoice::default()).unwrap();
        assert_eq!(serialized, json!("auto"));
    }

    #[test]
    fn response_without_output_deserializes() {
        let response: Response = serde_json::from_value(json!({
            "id": "resp_1",
            "object": "realtime.response",
            "status": "completed"
        }))
        .unwrap();
        assert!(response.output.is_none());
        assert_eq!(response.function_calls().count(), 0);
    }
}
