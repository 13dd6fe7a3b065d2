mod api;
mod cookie;
mod router;
mod session;
mod state;
mod uploads;

use std::sync::Arc;

use tracing::{info, warn};

fn load_config() -> anyhow::Result<medchat_core::Config> {
    medchat_core::config::load_dotenv();
    Ok(medchat_core::Config::from_env()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = load_config()?;
    config.log_summary();

    let state = Arc::new(state::AppState::new(config)?);
    if state.chat.is_none() {
        warn!("LLM provider not available, POST /api/chat will return 503");
    }

    let app = router::build_router(state.clone());

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
