//! Wire types for the subset of the Realtime protocol the spelling panel speaks.

pub mod client_events;
pub mod models;
pub mod server_events;
