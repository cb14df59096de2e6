// src/server/mod.rs

//! HTTP trigger endpoint (`axum`).
//!
//! - `GET  /ready`   readiness check.
//! - `POST /execute` authenticated trigger, handed to the controller.
//!
//! Wrong methods get 405 from the router before any handler runs, so the
//! method check always comes before authentication. axum serves HEAD from a
//! GET route, so `/ready` registers an explicit HEAD rejection.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::engine::ExecutionController;
use crate::errors::Result;

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-secret";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ExecutionController>,
    pub secret: Arc<str>,
}

impl AppState {
    pub fn new(controller: Arc<ExecutionController>, secret: impl Into<Arc<str>>) -> Self {
        Self {
            controller,
            secret: secret.into(),
        }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/ready",
            get(handlers::ready).head(handlers::method_not_allowed),
        )
        .route("/execute", post(handlers::execute))
        .with_state(state)
}

/// Bind `0.0.0.0:<port>` and serve until Ctrl-C.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state).await
}

/// Serve on an already-bound listener until Ctrl-C.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
    let local = listener.local_addr()?;
    info!(addr = %local, mode = %state.controller.mode(), "Run Command Service listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        // Without a signal handler, keep serving.
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
