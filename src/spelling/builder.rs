use crate::transport::WsTransport;
use crate::{Error, Result};

use super::config::PanelConfig;
use super::session::SpellingSession;

/// Connects a spelling panel to the Realtime API over WebSocket.
#[derive(Debug, Default)]
pub struct SpellingSessionBuilder {
    api_key: Option<String>,
    model: Option<String>,
    config: PanelConfig,
}

impl SpellingSessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: PanelConfig) -> Self {
        self.config = config;
        self
    }

    /// Open the WebSocket and start driving the panel.
    ///
    /// # Errors
    /// Returns an error if no API key was set or the connection fails.
    pub async fn connect_ws(self) -> Result<SpellingSession> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::InvalidConfig("api_key required".to_string()))?;
        let transport = WsTransport::connect(&api_key, self.model.as_deref()).await?;
        SpellingSession::from_transport(Box::new(transport), self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_rejected_before_connecting() {
        let err = SpellingSessionBuilder::new().model("gpt-realtime").connect_ws().await;
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
        let err = SpellingSessionBuilder::new().api_key("").connect_ws().await;
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }
}
