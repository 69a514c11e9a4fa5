use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Ambulatorio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Ambulatorio/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Ambulatorio")
}

/// Path of the practice database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("ambulatorio.db")
}

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
