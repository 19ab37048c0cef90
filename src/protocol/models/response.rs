use serde::{Deserialize, Serialize};

use super::{ArbitraryJson, Item, Metadata, ToolChoice};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    #[default]
    Auto,
    None,
}

/// Per-response overrides sent with `response.create`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResponseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    InProgress,
    Completed,
    Cancelled,
    Failed,
    Incomplete,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub status: ResponseStatus,
    #[serde(default)]
    pub status_details: Option<ArbitraryJson>,
    #[serde(default)]
    pub output: Option<Vec<Item>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Token accounting is passed through untouched.
    #[serde(default)]
    pub usage: Option<ArbitraryJson>,
}

impl Response {
    /// Function-call items in output order.
    pub fn function_calls(&self) -> impl Iterator<Item = &Item> {
        self.output
            .iter()
            .flatten()
            .filter(|item| matches!(item, Item::FunctionCall { .. }))
    }
}
