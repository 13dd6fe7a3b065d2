use medchat_core::Config;
use medchat_llm::ChatGateway;
use tracing::{info, warn};

use crate::session::SessionStore;
use crate::uploads::UploadStore;

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub uploads: UploadStore,
    /// None when no provider is configured; chat answers 503 until then.
    pub chat: Option<ChatGateway>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let uploads = UploadStore::new(&config.uploads)?;
        info!("Upload store ready (dir: {})", config.uploads.dir.display());

        let chat = match ChatGateway::from_config(&config.llm) {
            Ok(gateway) => {
                info!(
                    "Chat gateway ready (provider: {}, model: {})",
                    config.llm.provider,
                    config.llm.model_label()
                );
                Some(gateway)
            }
            Err(e) => {
                warn!("Chat gateway not available: {}", e);
                None
            }
        };

        Ok(Self {
            config,
            sessions: SessionStore::new(),
            uploads,
            chat,
        })
    }
}
