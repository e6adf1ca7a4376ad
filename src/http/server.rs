//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with both endpoints and the static bundle
//! - Build the shared outbound client and the fallback chain
//! - Wire up middleware (tracing, permissive CORS)
//! - Serve with graceful shutdown
//!
//! The router is assembled inside `run` rather than at construction:
//! the self-proxy strategy needs the loopback URL of the *bound*
//! listener, and that port is only known once `bind` has happened
//! (tests bind port 0).

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use reqwest::redirect::Policy;
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ProbeConfig, UpstreamConfig};
use crate::error::Result;
use crate::http::{api, proxy};
use crate::probe::{FallbackChain, SelfProxy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared outbound client; carries the redirect cap.
    pub client: Client,
    pub upstream: UpstreamConfig,
    pub chain: Arc<FallbackChain>,
    /// Final explicit self-proxy re-attempt after chain exhaustion.
    pub last_resort: Arc<SelfProxy>,
}

/// HTTP server for the image probe.
pub struct HttpServer {
    config: ProbeConfig,
}

impl HttpServer {
    /// Create a new server with the given configuration. The config is
    /// taken by value and never mutated afterwards.
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        let self_base = format!("http://127.0.0.1:{}", addr.port());

        let client = Client::builder()
            .redirect(Policy::limited(self.config.upstream.max_redirects))
            .build()?;

        let chain = Arc::new(FallbackChain::from_config(
            &client,
            &self.config.upstream,
            &self_base,
        ));
        let last_resort = Arc::new(SelfProxy::new(
            client.clone(),
            &self.config.upstream,
            &self_base,
        ));

        let state = AppState {
            client,
            upstream: self.config.upstream.clone(),
            chain,
            last_resort,
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);

        let app = Router::new()
            .route("/api/test-image", post(api::test_image))
            .route("/proxy-image", get(proxy::proxy_image))
            .fallback_service(ServeDir::new(&self.config.static_files.dir))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors);

        tracing::info!(
            address = %addr,
            static_dir = %self.config.static_files.dir,
            "HTTP server starting"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // No signal handler means no graceful shutdown; keep
            // serving rather than stopping immediately.
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
