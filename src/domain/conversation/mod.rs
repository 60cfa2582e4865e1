//! Conversation aggregate: lifecycle state machine and message history.

mod conversation;
mod message;
mod status;

pub use conversation::Conversation;
pub use message::{Message, Sender};
pub use status::ConversationStatus;
