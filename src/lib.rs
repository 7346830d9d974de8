pub mod api; // HTTP router, endpoints and server lifecycle
pub mod chat; // One chat turn: symptoms → diagnosis or canned reply
pub mod config;
pub mod core_state; // Read-only inference context
pub mod diagnosis;
pub mod extraction;
pub mod intents;
pub mod model;
pub mod vocabulary;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Fatal startup failures. The server never binds when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Core(#[from] core_state::CoreError),
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Server(String),
}

/// Initialize logging, load the artifacts and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let paths = config::ArtifactPaths::from_env();
    let core = Arc::new(core_state::CoreState::load(&paths)?);
    let addr = config::bind_addr().map_err(StartupError::Config)?;

    let mut server = api::start_api_server(core, addr)
        .await
        .map_err(StartupError::Server)?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}
