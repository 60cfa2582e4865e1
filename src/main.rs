//! Interactive console entrypoint.
//!
//! Opens a single conversation and runs the full message pipeline on each
//! line read from stdin. Useful for exercising the service against a real
//! or mock provider without a transport layer.
//!
//! Run with `SUPPORT_DESK__AI__PROVIDER=mock` for offline use.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use support_desk::adapters::ai::{
    AnthropicConfig, AnthropicProvider, MockAIProvider, OpenAIConfig, OpenAIProvider,
};
use support_desk::adapters::storage::InMemoryConversationRepository;
use support_desk::application::{
    ConversationLocks, CreateConversationCommand, CreateConversationHandler, GenerativeGateway,
    PostUserMessageCommand, PostUserMessageHandler,
};
use support_desk::config::{AiProvider, AppConfig};
use support_desk::domain::context::ContextWindowBuilder;
use support_desk::ports::AIProvider as AIProviderPort;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let provider = build_provider(&config);
    info!(provider = %provider.provider_info().name, "provider configured");

    let repository = Arc::new(InMemoryConversationRepository::new());
    let locks = ConversationLocks::new();
    let gateway = Arc::new(GenerativeGateway::new(
        provider,
        config.ai.timeout(),
        config.ai.max_tokens,
    ));
    let context_builder = ContextWindowBuilder::new(
        config.support.context_window_messages,
        config.support.context_token_budget,
    );

    let create = CreateConversationHandler::new(repository.clone());
    let post_user = PostUserMessageHandler::new(
        repository,
        gateway,
        locks,
        context_builder,
        config.support.language(),
    );

    let conversation = create
        .handle(CreateConversationCommand {
            user_id: support_desk::domain::foundation::UserId::new("console-user")?,
        })
        .await?;

    println!("Conversation {} opened. Empty line exits.", conversation.id());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }

        match post_user
            .handle(PostUserMessageCommand {
                conversation_id: conversation.id(),
                text: line.trim().to_string(),
            })
            .await
        {
            Ok(result) => match result.automated_response {
                Some(reply) => println!("[{:?}] {}", reply.sender, reply.text),
                None => println!("(no automated response)"),
            },
            Err(err) => println!("error: {}", err),
        }
    }

    Ok(())
}

fn build_provider(config: &AppConfig) -> Arc<dyn AIProviderPort> {
    let ai = &config.ai;
    match ai.provider {
        AiProvider::Anthropic => {
            let key = ai.anthropic_api_key.clone().unwrap_or_default();
            let mut provider_config = AnthropicConfig::new(key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = &ai.model {
                provider_config = provider_config.with_model(model.clone());
            }
            Arc::new(AnthropicProvider::new(provider_config))
        }
        AiProvider::OpenAI => {
            let key = ai.openai_api_key.clone().unwrap_or_default();
            let mut provider_config = OpenAIConfig::new(key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = &ai.model {
                provider_config = provider_config.with_model(model.clone());
            }
            Arc::new(OpenAIProvider::new(provider_config))
        }
        AiProvider::Mock => Arc::new(MockAIProvider::new()),
    }
}
