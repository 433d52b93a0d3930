//! Messages Config

use std::time::Duration;

use clap::Args;

/// Transient message settings.
#[derive(Debug, Clone, Args)]
pub struct MessagesConfig {
    /// Seconds an error or success message stays visible
    #[arg(long, env = "MESSAGE_TTL_SECONDS", default_value_t = 5_u64, global = true)]
    pub message_ttl_seconds: u64,
}

impl MessagesConfig {
    /// Message lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_seconds)
    }
}
