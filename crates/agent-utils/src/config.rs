//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Load a `.env` file from the working directory (or its parents) if present
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_env() -> Option<std::path::PathBuf> {
    dotenvy::dotenv().ok()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
}

impl Config {
    /// Build from `APP_ENV`, falling back to the defaults
    pub fn from_env(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "market-brief".to_string(),
            environment: "development".to_string(),
        }
    }
}
