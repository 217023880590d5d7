use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Vaidya Dhara";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "vaidya_dhara=info,tower_http=warn".to_string()
}

/// Get the application data directory
/// ~/VaidyaDhara/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("VaidyaDhara")
}

/// Runtime configuration, resolved from the environment with defaults
/// suitable for a local deployment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to.
    pub bind_addr: String,
    /// Base URL of the external answering engine.
    pub engine_url: String,
    /// Model served by the answering engine.
    pub engine_model: String,
    /// Timeout applied to every engine call.
    pub engine_timeout: Duration,
    /// SQLite database file.
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("VAIDYA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_data_dir());

        Self {
            bind_addr: std::env::var("VAIDYA_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            engine_url: std::env::var("VAIDYA_ENGINE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            engine_model: std::env::var("VAIDYA_MODEL")
                .unwrap_or_else(|_| "medgemma:latest".to_string()),
            engine_timeout: Duration::from_secs(
                std::env::var("VAIDYA_ENGINE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
            ),
            db_path: data_dir.join("vaidya_dhara.db"),
        }
    }
}
