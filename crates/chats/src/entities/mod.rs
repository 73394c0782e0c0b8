//! Domain entities returned by the chat services.
//!
//! These are the client-facing shapes; storage rows live in
//! `astroconsult-database`.

pub mod message;
pub mod room;

pub use message::Message;
pub use room::ChatRoom;
