use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ArbitraryJson, ItemStatus, Role};

/// Manual (de)serialization preserves unknown variants as raw JSON while keeping
/// strong typing for known items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Message {
        id: Option<String>,
        status: Option<ItemStatus>,
        role: Role,
        /// Content parts are passed through untouched.
        content: Vec<ArbitraryJson>,
    },
    FunctionCall {
        id: Option<String>,
        status: Option<ItemStatus>,
        name: String,
        call_id: String,
        arguments: String,
    },
    FunctionCallOutput {
        id: Option<String>,
        call_id: String,
        output: String,
    },
    Unknown(ArbitraryJson),
}

impl Item {
    /// The wire `type` discriminator of this item.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Message { .. } => "message",
            Self::FunctionCall { .. } => "function_call",
            Self::FunctionCallOutput { .. } => "function_call_output",
            Self::Unknown(value) => value
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown"),
        }
    }

    /// Returns `true` if this is a function call to the tool named `tool`.
    #[must_use]
    pub fn is_call_to(&self, tool: &str) -> bool {
        matches!(self, Self::FunctionCall { name, .. } if name == tool)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ItemRepr {
    Message {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<ItemStatus>,
        role: Role,
        #[serde(default)]
        content: Vec<ArbitraryJson>,
    },
    FunctionCall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<ItemStatus>,
        name: String,
        call_id: String,
        arguments: String,
    },
    FunctionCallOutput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        call_id: String,
        output: String,
    },
}

impl From<ItemRepr> for Item {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Message { id, status, role, content } => Self::Message { id, status, role, content },
            ItemRepr::FunctionCall { id, status, name, call_id, arguments } => {
                Self::FunctionCall { id, status, name, call_id, arguments }
            }
            ItemRepr::FunctionCallOutput { id, call_id, output } => {
                Self::FunctionCallOutput { id, call_id, output }
            }
        }
    }
}

impl Item {
    fn to_repr(&self) -> Option<ItemRepr> {
        match self.clone() {
            Self::Message { id, status, role, content } => Some(ItemRepr::Message { id, status, role, content }),
            Self::FunctionCall { id, status, name, call_id, arguments } => {
                Some(ItemRepr::FunctionCall { id, status, name, call_id, arguments })
            }
            Self::FunctionCallOutput { id, call_id, output } => {
                Some(ItemRepr::FunctionCallOutput { id, call_id, output })
            }
            Self::Unknown(_) => None,
        }
    }
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match (self, self.to_repr()) {
            (_, Some(repr)) => repr.serialize(serializer),
            (Self::Unknown(value), None) => value.serialize(serializer),
            (_, None) => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = ArbitraryJson::deserialize(deserializer)?;
        match ItemRepr::deserialize(value.clone()) {
            Ok(repr) => Ok(repr.into()),
            Err(err) => {
                tracing::debug!("Failed to parse Item: {err}");
                Ok(Self::Unknown(value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn function_call_roundtrips_wire_shape() {
        let wire = json!({
            "type": "function_call",
            "id": "item_1",
            "status": "completed",
            "name": "display_spelled_word",
            "call_id": "call_1",
            "arguments": "{\"word\":\"cat\",\"correctWord\":\"cat\"}"
        });
        let item: Item = serde_json::from_value(wire.clone()).unwrap();
        assert!(item.is_call_to("display_spelled_word"));
        assert_eq!(serde_json::to_value(&item).unwrap(), wire);
    }

    #[test]
    fn unrecognised_items_are_preserved() {
        let wire = json!({ "type": "mcp_call", "id": "item_9", "server_label": "x" });
        let item: Item = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(item.kind(), "mcp_call");
        assert!(matches!(item, Item::Unknown(_)));
        assert_eq!(serde_json::to_value(&item).unwrap(), wire);
    }
}
