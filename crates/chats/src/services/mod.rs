//! Business logic services for consultation chat.

pub mod chat_service;
pub mod message_service;

pub use chat_service::ChatService;
pub use message_service::MessageService;
