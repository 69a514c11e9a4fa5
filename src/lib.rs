pub mod config;
pub mod db;
pub mod fiscal_code;
pub mod models;
pub mod patients;
pub mod receipts;
pub mod revenue;
pub mod settings;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with RUST_LOG override and a sane default filter.
/// Call once from the embedding application before opening the database.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
