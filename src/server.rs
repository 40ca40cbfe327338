//! HTTP server lifecycle: bind, serve until Ctrl+C or SIGTERM, then drain the
//! error log.

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::logger::ErrorLog;
use crate::repositories::Repositories;
use crate::state::AppState;

/// How long to wait for queued error log entries after shutdown
const ERROR_LOG_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Serves an empty product store until a shutdown signal arrives.
    ///
    /// # Errors
    /// Fails if the address cannot be bound or the server stops abnormally.
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            settings,
            environment,
        } = self;

        tracing::info!(
            version = crate::pkg_version(),
            environment = %environment,
            log_level = %settings.logger.level,
            "Starting product API"
        );

        let (error_log, error_log_task) = if settings.error_log.enabled {
            let (log, handle) = ErrorLog::spawn(&settings.error_log.path);
            tracing::info!(path = %settings.error_log.path.display(), "Error log enabled");
            (log, Some(handle))
        } else {
            tracing::info!("Error log disabled");
            (ErrorLog::disabled(), None)
        };

        let router = with_request_timeout(
            create_router(AppState::new(Repositories::new(), error_log)),
            settings.server.timeout(),
        );

        let address = settings.server.address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("cannot listen on {address}"))?;

        tracing::info!(
            address = %address,
            request_timeout_secs = settings.server.request_timeout,
            "Server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // The router and every ErrorLog handle are gone, so the writer drains and exits
        if let Some(handle) = error_log_task {
            match tokio::time::timeout(ERROR_LOG_DRAIN_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "Error log writer failed"),
                Err(_) => tracing::warn!("Timed out flushing the error log"),
            }
        }

        tracing::info!("Stopped");

        Ok(())
    }
}

/// Answers requests still running after `timeout` with 408.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        timeout,
    ))
}

/// Resolves on the first of Ctrl+C or, on Unix, SIGTERM. A handler that fails
/// to install is logged and never fires.
async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "Ctrl+C",
            Err(error) => {
                tracing::error!(%error, "Cannot listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(error) => {
                tracing::error!(%error, "Cannot listen for SIGTERM");
                std::future::pending().await
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    tracing::info!(signal = received, "Shutting down, draining in-flight requests");
}
