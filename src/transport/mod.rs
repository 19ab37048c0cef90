//! Transport seam between the panel driver and the Realtime service.

pub mod ws;

use crate::protocol::client_events::ClientEvent;
use crate::protocol::server_events::ServerEvent;
use crate::Result;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A bidirectional event channel to a Realtime session.
///
/// `next_event` resolving to `Ok(None)` means the peer closed the session.
pub trait Transport: Send {
    fn send(&mut self, event: ClientEvent) -> BoxFuture<'_, Result<()>>;
    fn next_event(&mut self) -> BoxFuture<'_, Result<Option<ServerEvent>>>;
}

pub use ws::WsTransport;
