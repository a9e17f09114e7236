use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once at startup from the environment
/// (`.env` is loaded by `main` before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the storefront backend.
    pub api_base_url: String,
    /// Directory for the cart and session snapshots.
    pub state_dir: PathBuf,
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("STOREFRONT_API_URL")
                .unwrap_or_else(|_| "http://localhost:3333".to_string()),
            state_dir: env::var("STOREFRONT_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".acai-storefront")),
            admin_email: env::var("STOREFRONT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@email.com".to_string()),
            admin_password: env::var("STOREFRONT_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}
