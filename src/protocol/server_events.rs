use serde::{Deserialize, Deserializer};
use super::models::{ArbitraryJson, Response, Session};
use crate::error::ServerError;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Error {
        event_id: String,
        error: ServerError,
    },
    SessionCreated {
        event_id: String,
        session: Session,
    },
    SessionUpdated {
        event_id: String,
        session: Session,
    },
    ResponseCreated {
        event_id: String,
        response: Response,
    },
    ResponseDone {
        event_id: String,
        response: Response,
    },
    Unknown(ArbitraryJson),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum ServerEventRepr {
    #[serde(rename = "error")]
    Error {
        event_id: String,
        error: ServerError,
    },
    #[serde(rename = "session.created")]
    SessionCreated {
        event_id: String,
        session: Session,
    },
    #[serde(rename = "session.updated")]
    SessionUpdated {
        event_id: String,
        session: Session,
    },
    #[serde(rename = "response.created")]
    ResponseCreated {
        event_id: String,
        response: Response,
    },
    #[serde(rename = "response.done")]
    ResponseDone {
        event_id: String,
        response: Response,
    },
}

impl From<ServerEventRepr> for ServerEvent {
    fn from(repr: ServerEventRepr) -> Self {
        match repr {
            ServerEventRepr::Error { event_id, error } => Self::Error { event_id, error },
            ServerEventRepr::SessionCreated { event_id, session } => Self::SessionCreated { event_id, session },
            ServerEventRepr::SessionUpdated { event_id, session } => Self::SessionUpdated { event_id, session },
            ServerEventRepr::ResponseCreated { event_id, response } => Self::ResponseCreated { event_id, response },
            ServerEventRepr::ResponseDone { event_id, response } => Self::ResponseDone { event_id, response },
        }
    }
}

impl<'de> Deserialize<'de> for ServerEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = ArbitraryJson::deserialize(deserializer)?;
        match ServerEventRepr::deserialize(value.clone()) {
            Ok(repr) => Ok(repr.into()),
            Err(err) => {
                tracing::debug!("Failed to parse ServerEvent: {err}");
                Ok(Self::Unknown(value))
            }
        }
    }
}

impl ServerEvent {
    #[must_use]
    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::Error { event_id, .. }
            | Self::SessionCreated { event_id, .. }
            | Self::SessionUpdated { event_id, .. }
            | Self::ResponseCreated { event_id, .. }
            | Self::ResponseDone { event_id, .. } => Some(event_id.as_str()),
            Self::Unknown(value) => value.get("event_id").and_then(|v| v.as_str()),
        }
    }

    /// The wire `type` discriminator, falling back to the raw payload for unknown events.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Error { .. } => "error",
            Self::SessionCreated { .. } => "session.created",
            Self::SessionUpdated { .. } => "session.updated",
            Self::ResponseCreated { .. } => "response.created",
            Self::ResponseDone { .. } => "response.done",
            Self::Unknown(value) => value
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_event_types_fall_back_to_raw_json() {
        let event: ServerEvent = serde_json::from_value(json!({
            "type": "response.output_audio.delta",
            "event_id": "evt_7",
            "delta": "AAAA"
        }))
        .unwrap();
        assert!(matches!(event, ServerEvent::Unknown(_)));
        assert_eq!(event.kind(), "response.output_audio.delta");
        assert_eq!(event.event_id(), Some("evt_7"));
    }

    #[test]
    fn session_created_parses_with_sparse_session() {
        let event: ServerEvent = serde_json::from_value(json!({
            "type": "session.created",
            "event_id": "evt_1",
            "session": { "id": "sess_1", "type": "realtime", "model": "gpt-realtime" }
        }))
        .unwrap();
        match event {
            ServerEvent::SessionCreated { session, .. } => {
                assert_eq!(session.id.as_deref(), Some("sess_1"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
