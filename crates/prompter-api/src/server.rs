//! Relay server implementation.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use prompter_config::{Config, ServerConfig};
use prompter_provider_gemini::{GeminiClient, GeminiSettings};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::http::routes::create_router;
use crate::state::AppState;

/// The relay server.
pub struct RelayServer {
    config: ServerConfig,
    app: Router,
}

impl RelayServer {
    /// Build the relay from configuration and the upstream API key.
    pub fn new(config: &Config, api_key: &str) -> Result<Self, ServerError> {
        let settings = GeminiSettings::from_config(&config.upstream, api_key);
        let upstream = GeminiClient::new(settings)?;
        let state = Arc::new(AppState::new(upstream, config.limits.clone()));

        Ok(Self {
            config: config.server.clone(),
            app: create_router(state, config.cors.mode),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes. In-flight requests are not drained.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!("Relay listening on {}", listener.local_addr()?);

        let service = self
            .app
            .into_make_service_with_connect_info::<SocketAddr>();

        tokio::select! {
            result = axum::serve(listener, service).into_future() => result?,
            _ = shutdown => info!("Relay stopped"),
        }

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
