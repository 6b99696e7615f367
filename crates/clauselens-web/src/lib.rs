//! ClauseLens web front end
//!
//! Serves the contract upload form, runs analyses against the configured
//! completion provider and renders the structured report.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod render;

use clauselens_analyzer::Analyzer;
use clauselens_domain::CompletionProvider;
use config::ServerConfig;
use handlers::{create_router, AppState};
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG` and falls back to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Start the HTTP server
///
/// The caller keeps its own handle on `analyzer`, so a provider with a
/// blocking client is never dropped on a runtime thread.
pub async fn start_server<P>(
    config: &ServerConfig,
    analyzer: Arc<Analyzer<P>>,
) -> Result<(), ServerError>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    info!("Starting ClauseLens");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.analyzer.model);
    info!(
        "Chunk size: {} ({:?})",
        config.analyzer.chunk_size, config.analyzer.chunk_mode
    );

    let state = AppState {
        analyzer,
        max_upload_bytes: config.max_upload_bytes,
    };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ServerError::Server("boom".to_string());
        assert_eq!(err.to_string(), "Server error: boom");

        let err = ServerError::from(config::ConfigError::Invalid("bad".to_string()));
        assert_eq!(err.to_string(), "Configuration error: Invalid configuration: bad");
    }
}
