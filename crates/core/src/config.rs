use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pull in a local `.env` file when one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub session: SessionConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Read all sections from the environment (after `load_dotenv()`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            uploads: UploadConfig::from_env(),
            session: SessionConfig::from_env()?,
            llm: LlmConfig::from_env(),
        })
    }

    /// Log the effective settings, with the session secret redacted.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  server:   {}:{} (static dir: {})",
            self.server.host,
            self.server.port,
            self.server.static_dir.display()
        );
        tracing::info!(
            "  uploads:  dir={}, max_bytes={}, base_url={}",
            self.uploads.dir.display(),
            self.uploads.max_bytes,
            self.uploads.public_base_url.as_deref().unwrap_or("(relative)")
        );
        tracing::info!("  session:  secret set ({} bytes)", self.session.secret.len());
        tracing::info!(
            "  llm:      provider={}, model={}, configured={}",
            self.llm.provider,
            self.llm.model_label(),
            self.llm.is_configured()
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8080),
            static_dir: PathBuf::from(env_or("STATIC_DIR", "static")),
        }
    }
}

// ── Uploads ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Hard ceiling on accepted upload size (default 16 MiB).
    pub max_bytes: u64,
    /// Absolute base for file URLs; when unset, URLs are host-relative.
    pub public_base_url: Option<String>,
}

impl UploadConfig {
    fn from_env() -> Self {
        Self {
            dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            max_bytes: env_u64("MAX_UPLOAD_BYTES", 16 * 1024 * 1024),
            public_base_url: env_opt("PUBLIC_BASE_URL"),
        }
    }
}

// ── Session ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HMAC key for session cookies. Required; startup fails when unset.
    pub secret: String,
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_opt("SESSION_SECRET").ok_or(ConfigError::MissingVar("SESSION_SECRET"))?;
        Ok(Self { secret })
    }
}

// ── LLM ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub ollama_url: String,
    pub ollama_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            provider: env_or("LLM_PROVIDER", "openai"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            openai_base_url: env_opt("OPENAI_BASE_URL"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama3.2"),
            temperature: env_or("LLM_TEMPERATURE", "0.7").parse().unwrap_or(0.7),
            max_tokens: env_u32("LLM_MAX_TOKENS", 500),
            request_timeout_secs: env_u64("LLM_REQUEST_TIMEOUT_SECS", 60),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }

    /// The model name in effect for the active provider.
    pub fn model_label(&self) -> &str {
        match self.provider.as_str() {
            "ollama" => &self.ollama_model,
            _ => &self.openai_model,
        }
    }
}
