use crate::error::Result;
use crate::protocol::client_events::ClientEvent;
use crate::protocol::models::DEFAULT_MODEL;
use crate::protocol::server_events::ServerEvent;
use futures::{SinkExt, StreamExt};
use std::borrow::Cow;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{AUTHORIZATION, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use super::{BoxFuture, Transport};

const WS_BASE_URL: &str = "wss://api.openai.com/v1/realtime";
const TRACE_LOG_MAX_BYTES: usize = 1024;
const TRACE_TRUNCATE_SUFFIX: &str = "... (truncated)";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport to the `OpenAI` Realtime API.
///
/// `WsTransport` is `Send` but not `Sync` because the underlying stream is not `Sync`.
#[derive(Debug)]
pub struct WsTransport {
    stream: WsStream,
}

impl WsTransport {
    /// Connect to the Realtime API.
    ///
    /// # Errors
    /// Returns an error if the URL or auth header is invalid or the handshake fails.
    pub async fn connect(api_key: &str, model: Option<&str>) -> Result<Self> {
        let url = realtime_url(model)?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {api_key}"))?;

        let mut req = url.as_str().into_client_request()?;
        req.headers_mut().insert(AUTHORIZATION, auth_header);
        let (stream, _) = connect_async(req).await?;

        tracing::info!("Connected to OpenAI Realtime");
        Ok(Self { stream })
    }

    async fn send_event(&mut self, event: ClientEvent) -> Result<()> {
        let json = serde_json::to_string(&event)?;
        tracing::trace!("Sending event: {}", safe_truncate(&json, TRACE_LOG_MAX_BYTES));
        self.stream.send(Message::Text(json.into())).await?;
        Ok(())
    }

    async fn receive_event(&mut self) -> Result<Option<ServerEvent>> {
        while let Some(msg) = self.stream.next().await {
            match msg? {
                Message::Text(text) => {
                    tracing::trace!("Received event: {}", safe_truncate(&text, TRACE_LOG_MAX_BYTES));
                    return Ok(Some(serde_json::from_str::<ServerEvent>(&text)?));
                }
                Message::Close(_) => {
                    tracing::info!("WebSocket connection closed by server");
                    return Ok(None);
                }
                Message::Ping(payload) => {
                    tracing::debug!("Received Ping, sending Pong");
                    self.stream.send(Message::Pong(payload)).await?;
                }
                _ => (),
            }
        }
        Ok(None)
    }
}

impl Transport for WsTransport {
    fn send(&mut self, event: ClientEvent) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.send_event(event))
    }

    fn next_event(&mut self) -> BoxFuture<'_, Result<Option<ServerEvent>>> {
        Box::pin(self.receive_event())
    }
}

fn realtime_url(model: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(WS_BASE_URL)?;
    url.query_pairs_mut().append_pair("model", model.unwrap_or(DEFAULT_MODEL));
    Ok(url)
}

fn safe_truncate(s: &str, max_bytes: usize) -> Cow<'_, str> {
    if s.len() <= max_bytes {
        return Cow::Borrowed(s);
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!(
        "{} {} {} bytes",
        &s[..end],
        TRACE_TRUNCATE_SUFFIX,
        s.len() - end
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_model_query() {
        let url = realtime_url(Some("gpt-realtime-mini")).unwrap();
        assert_eq!(url.as_str(), "wss://api.openai.com/v1/realtime?model=gpt-realtime-mini");
        let url = realtime_url(None).unwrap();
        assert!(url.as_str().ends_with("model=gpt-realtime"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let s = "é".repeat(10);
        let out = safe_truncate(&s, 3);
        assert!(out.starts_with('é'));
        assert!(out.contains("truncated"));
        assert_eq!(safe_truncate("short", 10), "short");
    }
}
