//! Holdout HTTP server
//!
//! The delivery surface for the Holdout session engine: an axum router over
//! [`SessionService`], which serializes all operations per survivor name.

use std::net::SocketAddr;

use tokio::net::TcpListener;

pub mod error;
pub mod routes;
pub mod service;

pub use error::ApiError;
pub use routes::{AppState, router};
pub use service::{ActionOutcome, SessionError, SessionService, StartOutcome};

/// Bind and serve the session API until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;
    log::info!("holdout backend listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to install ctrl-c handler: {err}");
    }
}
