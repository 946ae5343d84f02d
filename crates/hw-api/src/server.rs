//! API server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::{HealthResponse, HookAcceptedResponse};
use crate::error::ErrorResponse;
use crate::middleware::{request_body_limit_layer, request_id, request_logging};
use crate::routes;
use crate::state::AppState;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind to.
    pub bind_address: SocketAddr,
    /// Enable Swagger UI.
    pub enable_swagger: bool,
    /// Directory served under `/static/`, if any.
    pub static_dir: Option<PathBuf>,
    /// Shutdown timeout for graceful shutdown.
    pub shutdown_timeout: Duration,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            enable_swagger: true,
            static_dir: None,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::health::readiness_check,
        crate::routes::health::liveness_check,
        crate::routes::hooks::receive_hook,
        crate::routes::metrics::prometheus_metrics,
    ),
    components(
        schemas(
            HealthResponse,
            HookAcceptedResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Hooks", description = "Webhook delivery ingestion"),
        (name = "Metrics", description = "System metrics"),
    ),
    info(
        title = "Hook Warden API",
        version = "0.1.0",
        description = "Webhook receiver with HMAC payload authentication",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// API server.
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a new API server.
    pub fn new(state: AppState, config: ApiServerConfig) -> Self {
        Self { config, state }
    }

    /// Creates a new API server with default configuration.
    pub fn with_state(state: AppState) -> Self {
        Self::new(state, ApiServerConfig::default())
    }

    /// Builds the router.
    pub fn router(&self) -> Router {
        // Initialize start time for uptime calculation
        routes::health::init_start_time();

        let mut app = routes::create_router(self.state.clone());

        if self.config.enable_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        if let Some(static_dir) = &self.config.static_dir {
            app = app.nest_service("/static", ServeDir::new(static_dir));
        }

        // Apply middleware (order matters: innermost first)
        app
            // Request logging
            .layer(middleware::from_fn(request_logging))
            // Request ID
            .layer(middleware::from_fn(request_id))
            // Tracing
            .layer(TraceLayer::new_for_http())
            // Body size limit
            .layer(request_body_limit_layer())
            // Catch panics and return 500
            .layer(CatchPanicLayer::new())
    }

    /// Runs the server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let app = self.router();
        let addr = self.config.bind_address;

        info!("Starting API server on {}", addr);

        let listener = TcpListener::bind(addr).await?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server shut down gracefully");
        Ok(())
    }

    /// Runs the server with a custom shutdown signal.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let addr = self.config.bind_address;

        info!("Starting API server on {}", addr);

        let listener = TcpListener::bind(addr).await?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server shut down gracefully");
        Ok(())
    }
}

/// Default shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WebhookSecret;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(WebhookSecret::from("test-secret"));
        let server = ApiServer::with_state(state);
        let _router = server.router();

        // Just verify router builds without error
    }

    #[test]
    fn test_default_config_binds_webhook_port() {
        let config = ApiServerConfig::default();
        assert_eq!(config.bind_address.port(), 8000);
        assert!(config.enable_swagger);
        assert!(config.static_dir.is_none());
    }
}
