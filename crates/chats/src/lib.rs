//! # AstroConsult Chats Crate
//!
//! Consultation chat between users and astrologers: room membership checks,
//! history retrieval with read tracking, sending, and unread counts.
//!
//! ## Architecture
//!
//! - **Entities**: client-facing `Message` and `ChatRoom`
//! - **Repositories**: the `ChatStore` seam and its SQLite implementation
//! - **Services**: `MessageService` and `ChatService`
//! - **Types**: request payloads and `ChatError`
//!
//! Services never resolve sessions themselves. Callers pass the already
//! authenticated [`astroconsult_auth::Caller`] (or `None`).

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{ChatRoom, Message};
pub use repositories::{ChatStore, SqliteChatStore};
pub use services::{ChatService, MessageService};
pub use types::{ChatError, ChatResult, HistoryRequest, OpenRoomRequest, SendMessageRequest};
