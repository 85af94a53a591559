//! HTTP surface for the dashboard.
//!
//! Every user action maps to one request handler; all UI state arrives as
//! request parameters. The rendering UI itself is an external collaborator;
//! this module only exposes the JSON contract it consumes.

pub mod routes;

use crate::ai::SqlTranslator;
use crate::auth::{PasswordGate, password_middleware};
use crate::db::{DataService, QueryExecutor};
use crate::error::{DashResult, DashboardError};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

/// Shared state for all request handlers.
#[derive(Debug)]
pub struct AppState {
    pub data: DataService,
    pub executor: QueryExecutor,
    pub translator: SqlTranslator,
}

impl AppState {
    /// Bundle the services a request handler needs.
    pub fn new(data: DataService, executor: QueryExecutor, translator: SqlTranslator) -> Self {
        Self {
            data,
            executor,
            translator,
        }
    }
}

/// Build the API router with the password gate applied to every route.
pub fn build_router(state: Arc<AppState>, gate: Arc<PasswordGate>) -> Router {
    let api = Router::new()
        .route("/customers", get(routes::list_customers))
        .route("/query", post(routes::run_report))
        .route("/ask", post(routes::ask))
        .layer(middleware::from_fn_with_state(gate, password_middleware))
        .with_state(state);

    Router::new().nest("/api", api)
}

/// Serve the router until SIGINT/SIGTERM.
pub async fn serve(app: Router, bind_addr: &str) -> DashResult<()> {
    let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
        DashboardError::connection(format!("Failed to bind to {}: {}", bind_addr, e))
    })?;

    info!(addr = %bind_addr, "Dashboard API ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await
        .map_err(|e| DashboardError::internal(format!("HTTP server error: {}", e)))?;

    info!("HTTP server stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = signal::ctrl_c();

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
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
