//! Ports: trait seams between the domain/application core and the outside
//! world. Adapters implement these.

mod ai_provider;
mod conversation_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};
pub use conversation_repository::ConversationRepository;
