//! HTTP server lifecycle

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use gasaware_config::AppConfig;

use crate::{routes::build_router, seed::seed_demo_data, state::AppState};

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// Configured server ready to bind
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Build state from `config`
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Shared state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Router with every route and middleware
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Seed when enabled, bind and serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.state.config.clone();

        if config.app.seed_demo_data {
            seed_demo_data(&self.state).await?;
        }

        let limiter = self.state.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
            loop {
                interval.tick().await;
                limiter.prune();
            }
        });

        let address = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&address).await?;
        info!("Server running on {address}");

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        info!("Server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
