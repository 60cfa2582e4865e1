//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AgentId, ConversationId, MessageId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
