pub mod ollama;
pub mod openai;

use medchat_core::config::LlmConfig;

use crate::provider::{http_client, LlmError, LlmProvider};

/// Build the provider selected by `LLM_PROVIDER`.
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    let client = http_client(config.request_timeout_secs)?;

    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            let base_url = config
                .openai_base_url
                .as_deref()
                .unwrap_or("https://api.openai.com");
            Ok(Box::new(openai::OpenAiProvider::new(
                client,
                api_key.clone(),
                config.openai_model.clone(),
                base_url.trim_end_matches('/').to_string(),
            )))
        }
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            client,
            config.ollama_url.trim_end_matches('/').to_string(),
            config.ollama_model.clone(),
        ))),
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}
