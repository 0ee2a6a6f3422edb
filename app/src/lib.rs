pub mod app;
pub mod config;
pub mod screen;
pub mod server;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment and configuration.
pub fn init_foundation() -> AppConfig {
    load_dotenv();

    let config = AppConfig::load();
    tracing::info!(
        port = config.server_port,
        size = config.image_size,
        quiet_zone = config.quiet_zone,
        max_screens = config.max_screens,
        error_correction = config.error_correction.letter(),
        schemes = ?config.openable_schemes.schemes().collect::<Vec<_>>(),
        "Settings loaded"
    );
    config
}
