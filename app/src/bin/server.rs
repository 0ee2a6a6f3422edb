//! Server binary: hosts the generator screen on a local HTTP port.

use tracing_subscriber::EnvFilter;

use qr_generator::app::SharedState;
use qr_generator::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting QR generator");

    let config = qr_generator::init_foundation();
    let state = SharedState::new(config);

    server::start_server(state).await?;

    tracing::info!("Stopped");
    Ok(())
}
