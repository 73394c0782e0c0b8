//! Row types as stored in SQLite

pub mod message;
pub mod room;

pub use message::MessageRecord;
pub use room::ChatRoomRecord;
