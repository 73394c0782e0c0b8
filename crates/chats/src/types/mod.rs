//! Shared types for the chat services.

pub mod errors;
pub mod requests;

pub use errors::{ChatError, ChatResult};
pub use requests::{HistoryRequest, OpenRoomRequest, SendMessageRequest};
