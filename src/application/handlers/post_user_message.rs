//! PostUserMessageHandler - the message-processing pipeline.
//!
//! Detection, classification, routing, and mutation form one unit of work
//! under the conversation's lock, persisted as a single aggregate update.

use std::sync::Arc;

use tracing::info;

use crate::application::gateway::GenerativeGateway;
use crate::application::locks::ConversationLocks;
use crate::domain::context::ContextWindowBuilder;
use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, ValidationError};
use crate::domain::intent::Intent;
use crate::domain::language::Language;
use crate::domain::routing::{route, ResponsePath};
use crate::domain::templates::{self, TemplateContext};
use crate::ports::ConversationRepository;

/// Command to post a customer message.
#[derive(Debug, Clone)]
pub struct PostUserMessageCommand {
    pub conversation_id: ConversationId,
    pub text: String,
}

/// Result of processing a customer message.
#[derive(Debug, Clone)]
pub struct PostUserMessageResult {
    /// The recorded customer message.
    pub message: Message,
    /// The automated reply, when the router produced one.
    pub automated_response: Option<Message>,
}

/// Handler for customer messages.
pub struct PostUserMessageHandler {
    repository: Arc<dyn ConversationRepository>,
    gateway: Arc<GenerativeGateway>,
    locks: ConversationLocks,
    context_builder: ContextWindowBuilder,
    default_language: Language,
}

impl PostUserMessageHandler {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        gateway: Arc<GenerativeGateway>,
        locks: ConversationLocks,
        context_builder: ContextWindowBuilder,
        default_language: Language,
    ) -> Self {
        Self {
            repository,
            gateway,
            locks,
            context_builder,
            default_language,
        }
    }

    pub async fn handle(
        &self,
        cmd: PostUserMessageCommand,
    ) -> Result<PostUserMessageResult, DomainError> {
        if cmd.text.trim().is_empty() {
            return Err(ValidationError::empty_field("text").into());
        }

        let _guard = self.locks.acquire(cmd.conversation_id).await;

        let mut conversation = self
            .repository
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or_else(|| DomainError::conversation_not_found(cmd.conversation_id))?;

        let detected = Language::detect(&cmd.text, self.default_language);
        conversation.apply_language_detection(detected, self.default_language);
        let response_language = conversation.response_language(detected, self.default_language);
        let intent = Intent::classify(&cmd.text, response_language);

        // The routing decision is taken on the status at receipt, before
        // any mutation from this message.
        let path = route(conversation.status(), intent);

        // History must not include the message being processed.
        let window = match path {
            ResponsePath::Generative => {
                Some(self.context_builder.build(Some(&conversation), &cmd.text))
            }
            _ => None,
        };

        let user_message = Message::user(cmd.text.clone(), detected, intent);
        conversation.record_user_message(user_message.clone())?;

        let automated_response = match path {
            ResponsePath::Escalate => {
                conversation.escalate(Some(cmd.text))?;
                None
            }
            ResponsePath::Deterministic => {
                let text = templates::render(intent, response_language, &TemplateContext::default());
                let reply = Message::deterministic(text, response_language, intent);
                conversation.record_automated_response(reply.clone())?;
                Some(reply)
            }
            ResponsePath::Generative => {
                let window = window.unwrap_or_else(|| {
                    self.context_builder.build(None, &user_message.text)
                });
                let generated = self.gateway.generate(&window, response_language).await;
                let reply =
                    Message::generative(generated.text, response_language, generated.confidence);
                conversation.record_automated_response(reply.clone())?;
                Some(reply)
            }
            ResponsePath::Suppressed => None,
        };

        self.repository.update(&conversation).await?;

        info!(
            conversation_id = %conversation.id(),
            intent = intent.code(),
            language = response_language.code(),
            status = %conversation.status(),
            responded = automated_response.is_some(),
            "user message processed"
        );

        Ok(PostUserMessageResult {
            message: user_message,
            automated_response,
        })
    }
}
