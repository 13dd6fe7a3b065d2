use medchat_core::config::LlmConfig;
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message};

/// Fixed framing for every conversation.
const SYSTEM_PROMPT: &str = "You are a helpful medical assistant that can analyze medical documents and answer questions about them.";

/// Instruction wrapped around document text when a file is in play.
const FILE_CONTEXT_PREFIX: &str =
    "I've uploaded a file with the following content. Please analyze it from a medical perspective:\n\n";

/// Assembles the prompt for one exchange and submits it to the
/// configured completion provider.
pub struct ChatGateway {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("No message or file content provided")]
    NoContentProvided,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl ChatGateway {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self { provider, temperature, max_tokens }
    }

    /// Wire up the configured provider with its sampling settings.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(config)?;
        Ok(Self::new(provider, config.temperature, config.max_tokens))
    }

    /// Run one exchange and return the model's reply text.
    pub async fn reply(
        &self,
        user_message: Option<&str>,
        file_content: Option<&str>,
    ) -> Result<String, ChatError> {
        let messages = build_messages(user_message, file_content)?;

        info!("Chat request with {} messages", messages.len());

        let response = self
            .provider
            .complete(&messages, self.temperature, self.max_tokens)
            .await?;

        debug!("Model replied with {} chars", response.len());
        Ok(response)
    }
}

/// Assemble the message sequence in fixed order: system prompt, then
/// the document context (when present), then the user's message (when
/// present). Empty strings count as absent; at least one of the two
/// optional parts must remain.
pub fn build_messages(
    user_message: Option<&str>,
    file_content: Option<&str>,
) -> Result<Vec<Message>, ChatError> {
    let user_message = user_message.filter(|s| !s.is_empty());
    let file_content = file_content.filter(|s| !s.is_empty());

    if user_message.is_none() && file_content.is_none() {
        return Err(ChatError::NoContentProvided);
    }

    let mut messages = vec![Message::system(SYSTEM_PROMPT)];
    if let Some(content) = file_content {
        messages.push(Message::user(format!("{FILE_CONTEXT_PREFIX}{content}")));
    }
    if let Some(text) = user_message {
        messages.push(Message::user(text));
    }
    Ok(messages)
}
