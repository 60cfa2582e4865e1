//! Command handlers, one per external operation.

pub mod create_conversation;
pub mod lifecycle;
pub mod post_agent_message;
pub mod post_user_message;

pub use create_conversation::{CreateConversationCommand, CreateConversationHandler};
pub use lifecycle::{
    AssignAgentCommand, AssignAgentHandler, EscalateCommand, EscalateHandler, ResolveCommand,
    ResolveHandler,
};
pub use post_agent_message::{PostAgentMessageCommand, PostAgentMessageHandler};
pub use post_user_message::{
    PostUserMessageCommand, PostUserMessageHandler, PostUserMessageResult,
};
