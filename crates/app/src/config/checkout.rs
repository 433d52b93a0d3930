//! Checkout Config

use clap::{ArgAction, Args};
use mesa::{checkout::CheckoutPolicy, prices::Price};
use rust_decimal::Decimal;

/// Checkout variant settings.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Require a delivery address at checkout
    #[arg(
        long,
        env = "CHECKOUT_REQUIRE_ADDRESS",
        default_value_t = true,
        action = ArgAction::Set,
        global = true
    )]
    pub require_address: bool,

    /// Fixed amount added to every order total
    #[arg(long, env = "CHECKOUT_SURCHARGE", default_value = "2", global = true)]
    pub surcharge: Decimal,

    /// ISO 4217 code used to display prices
    #[arg(long, env = "CURRENCY", default_value = "ARS", global = true)]
    pub currency: String,
}

impl CheckoutConfig {
    /// Checkout policy built from these settings.
    #[must_use]
    pub fn policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            require_address: self.require_address,
            surcharge: Price::new(self.surcharge),
        }
    }
}
