//! Client configuration

use clap::Args;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::store::StoreConfig;

pub mod api;
pub mod checkout;
pub mod messages;
pub mod observability;

pub use api::ApiConfig;
pub use checkout::CheckoutConfig;
pub use messages::MessagesConfig;
pub use observability::{LogFormat, LoggingConfig};

/// Configuration Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured currency is not an ISO 4217 code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Mesa client configuration
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Backend connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Transient message settings.
    #[command(flatten)]
    pub messages: MessagesConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Store settings derived from this configuration.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend_url: self.api.backend_url.trim_end_matches('/').to_string(),
            message_ttl: self.messages.ttl(),
            checkout: self.checkout.policy(),
        }
    }

    /// Currency used to display prices.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownCurrency` if the code is not recognised.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.checkout.currency.to_uppercase())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.checkout.currency.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use mesa::prices::Price;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn defaults_describe_delivery_checkout() -> TestResult {
        let cli = TestCli::try_parse_from(["mesa"])?;
        let store = cli.config.store_config();

        assert_eq!(store.backend_url, "http://localhost:5000");
        assert_eq!(store.message_ttl, Duration::from_secs(5));
        assert!(store.checkout.require_address);
        assert_eq!(store.checkout.surcharge, Price::from(2));
        assert_eq!(cli.config.currency()?.iso_alpha_code, "ARS");

        Ok(())
    }

    #[test]
    fn pickup_checkout_from_flags() -> TestResult {
        let cli = TestCli::try_parse_from([
            "mesa",
            "--require-address",
            "false",
            "--surcharge",
            "0",
            "--backend-url",
            "https://menu.example/",
        ])?;
        let store = cli.config.store_config();

        assert!(!store.checkout.require_address);
        assert_eq!(store.checkout.surcharge, Price::ZERO);
        assert_eq!(store.backend_url, "https://menu.example");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() -> TestResult {
        let cli = TestCli::try_parse_from(["mesa", "--currency", "XXQ"])?;

        assert!(matches!(
            cli.config.currency(),
            Err(ConfigError::UnknownCurrency(code)) if code == "XXQ"
        ));

        Ok(())
    }
}
