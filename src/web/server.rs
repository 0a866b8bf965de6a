//! HTTP server for villadesk.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::auth::SessionManager;
use crate::config::Config;
use crate::db::Database;
use crate::{Result, VillaError};

use super::handlers::AppState;
use super::router::create_router;

/// HTTP server wiring: state construction, background maintenance, serving.
pub struct WebServer {
    /// Listen address.
    addr: SocketAddr,
    /// Application state.
    state: Arc<AppState>,
    /// Interval between expired-session purge runs.
    purge_interval: Duration,
}

impl WebServer {
    /// Create a new web server from configuration and an opened database.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| VillaError::Config(format!("invalid listen address: {e}")))?;

        Ok(Self {
            addr,
            state: Arc::new(AppState::new(config, db)?),
            purge_interval: Duration::from_secs(config.session.purge_interval_secs),
        })
    }

    /// Get the configured address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the expired-session purge background task.
    fn start_session_purge_task(sessions: SessionManager, interval_duration: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(interval_duration);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                match sessions.purge_expired().await {
                    Ok(count) if count > 0 => {
                        info!(deleted_count = count, "Purged expired sessions");
                    }
                    Ok(_) => debug!("No expired sessions to purge"),
                    Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
                }
            }
        });
    }

    /// Run the web server until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        let sessions = self.state.sessions.clone();
        let db = self.state.db.clone();
        let router = create_router(self.state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_purge_task(sessions, self.purge_interval);
        info!("villadesk listening on http://{}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        db.close().await;
        info!("Server stopped");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// Useful for binding to port 0 in integration tests.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let sessions = self.state.sessions.clone();
        let router = create_router(self.state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_purge_task(sessions, self.purge_interval);
        info!("villadesk listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install SIGINT handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
