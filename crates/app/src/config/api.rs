//! API Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the REST API
    #[arg(
        long,
        env = "API_URL",
        default_value = "http://localhost:5000/api",
        global = true
    )]
    pub api_url: String,

    /// Origin that relative image paths are served from
    #[arg(
        long,
        env = "BACKEND_URL",
        default_value = "http://localhost:5000",
        global = true
    )]
    pub backend_url: String,

    /// File holding the admin session token
    #[arg(long, env = "TOKEN_PATH", default_value = ".mesa/token", global = true)]
    pub token_path: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "API_TIMEOUT_SECONDS", default_value_t = 10_u64, global = true)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}
