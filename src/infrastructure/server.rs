// Server module - Provides reusable HTTP server functionality
// Used by the binary (main.rs) and by tests that embed data planes

use axum::http::HeaderValue;
use axum::Router;
use std::net::{SocketAddr, TcpListener};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::domain::DomainError;
use crate::services::Dataplane;

/// Build the full router for one data plane: signaling API, health check, CORS and tracing
pub fn build_router(dataplane: Dataplane) -> Router {
    api::api_router(dataplane)
        .layer(cors_layer(&[]))
        .layer(TraceLayer::new_for_http())
}

/// CORS configuration. An empty list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let mut origins = Vec::new();
    for origin in allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    cors.allow_origin(origins)
}

/// Find an available port starting from the preferred port on a specific IP
pub fn find_available_port_on_ip(preferred_port: u16, ip: &str) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind((ip, preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    (preferred_port.saturating_add(1)..preferred_port.saturating_add(100))
        .find(|&port| TcpListener::bind((ip, port)).is_ok())
}

/// Find an available port starting from the preferred port (0.0.0.0)
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    find_available_port_on_ip(preferred_port, "0.0.0.0")
}

/// Handle to a server running on a background task
pub struct RunningServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Graceful shutdown: stop accepting, let in-flight requests finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            tracing::error!("HTTP server task failed: {}", e);
        }
    }
}

/// Start serving `app` on a background task.
/// Port 0 picks an ephemeral port; the bound address is on the returned handle.
pub async fn start_server(app: Router, addr: SocketAddr) -> Result<RunningServer, DomainError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let (shutdown, shutdown_rx) = oneshot::channel::<()>();

    tracing::info!("📡 Data plane HTTP server started on {}", addr);

    let handle = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
        if let Err(e) = result {
            tracing::error!("HTTP server error: {}", e);
        }
        tracing::info!("HTTP server on {} stopped", addr);
    });

    Ok(RunningServer {
        addr,
        shutdown,
        handle,
    })
}
