//! Credential-holding HTTP proxy in front of the upstream chat API

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use sakura_provider::{ChatTransport, Prompts};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;

pub use error::ProxyError;

/// Shared state for every route
pub struct ProxyState {
    /// `None` when no upstream credential is configured
    pub upstream: Option<Arc<dyn ChatTransport>>,
    /// Model used when a request names none
    pub default_model: String,
    pub prompts: Prompts,
}

impl ProxyState {
    pub fn upstream(&self) -> Result<Arc<dyn ChatTransport>, ProxyError> {
        self.upstream.clone().ok_or(ProxyError::NotConfigured)
    }
}

/// Build the router with all routes
pub fn router(state: Arc<ProxyState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    routes::router(state)
        .merge(routes::health::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    state: Arc<ProxyState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if state.upstream.is_none() {
        tracing::warn!("No upstream credential configured, every call will fail");
    }

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Proxy listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
