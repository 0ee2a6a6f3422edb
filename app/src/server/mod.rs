pub mod api;
pub mod assets;
pub mod router;

use crate::app::SharedState;
use anyhow::Result;

/// Start the axum HTTP server; returns after Ctrl+C.
pub async fn start_server(state: SharedState) -> Result<()> {
    let port = state.server_port();
    let app = router::create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("QR generator listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
            }
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
