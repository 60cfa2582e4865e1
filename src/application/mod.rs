//! Application layer - command handlers and orchestration.
//!
//! Coordinates domain operations across the ports: per-conversation
//! locking, the generative gateway, and one handler per external operation.

pub mod gateway;
pub mod handlers;
pub mod locks;

pub use gateway::{GenerativeGateway, GenerativeReply};
pub use handlers::{
    AssignAgentCommand, AssignAgentHandler, CreateConversationCommand, CreateConversationHandler,
    EscalateCommand, EscalateHandler, PostAgentMessageCommand, PostAgentMessageHandler,
    PostUserMessageCommand, PostUserMessageHandler, PostUserMessageResult, ResolveCommand,
    ResolveHandler,
};
pub use locks::ConversationLocks;
