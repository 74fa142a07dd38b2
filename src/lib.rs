pub mod config;
pub mod dramabox;
pub mod middleware;
pub mod netshort;
pub mod page;
pub mod playback;
pub mod render;
pub mod server;
pub mod upstream;
pub mod util;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config: config::Config) -> Result<(), ServerError> {
    info!("Netshort upstream: {}", config.upstream.netshort);
    info!("DramaBox upstream: {}", config.upstream.dramabox);

    let addr: SocketAddr = format!("{}:{}", config.listen.address, config.listen.port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let upstream = Arc::new(upstream::HttpUpstream::from_config(&config.upstream)?);
    let renderer = Arc::new(render::ShellRenderer);

    let state = server::AppState::new(config, upstream, renderer);
    let app = server::build_router(state);

    info!("Server is running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
