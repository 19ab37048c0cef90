#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Voice spelling practice over the `OpenAI` Realtime API.
//!
//! The model calls `display_spelled_word` with what the user spelled and the
//! correct spelling; the panel judges it, records the word and asks the model
//! for spoken feedback. [`SpellingPanel`] is the synchronous core for hosts that
//! own their own event loop, [`SpellingSession`] drives it over a [`Transport`].

pub mod error;
pub mod protocol;
pub mod spelling;
pub mod transport;

pub use error::{Error, Result, ServerError};
pub use protocol::client_events::ClientEvent;
pub use protocol::models::{Item, Response, ResponseConfig, Session, SessionUpdate, Tool, ToolChoice};
pub use protocol::server_events::ServerEvent;
pub use spelling::{
    Action, DISPLAY_SPELLED_WORD, Effect, FeedbackScheduler, Outbound, PanelConfig, PanelSnapshot,
    PanelState, PracticeRecord, SessionPhase, SpelledWordArgs, SpellingOutput, SpellingPanel,
    SpellingSession, SpellingSessionBuilder, View, is_correct_spelling, reduce,
};
pub use transport::{Transport, WsTransport};
