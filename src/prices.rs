//! Prices

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    iter::Sum,
    ops::{Add, Deref},
};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Represents a menu price in the currency's major unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// A price of zero.
    pub const ZERO: Price = Price {
        value: Decimal::ZERO,
    };

    /// Creates a new Price
    pub fn new(value: Decimal) -> Self {
        Price { value }
    }

    /// Price of `quantity` units at this price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price::new(self.value * Decimal::from(quantity))
    }

    /// Format the price as money in the given currency, e.g. `$1.200,00`.
    pub fn format(self, currency: &'static Currency) -> String {
        Money::from_decimal(self.value, currency).to_string()
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Price::new(value)
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Price::new(Decimal::from(value))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Price::new(self.value + rhs.value)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value.normalize(), f)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(Decimal::from(1000));

        assert_eq!(price.value, Decimal::from(1000));
    }

    #[test]
    fn price_derefs_to_decimal() {
        let price = Price::from(100);

        assert_eq!(*price, Decimal::from(100));
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Price::from(1200).times(3), Price::from(3600));
        assert_eq!(Price::from(1200).times(0), Price::ZERO);
    }

    #[test]
    fn sums_prices() {
        let total: Price = [Price::from(1), Price::from(2), Price::from(3)]
            .into_iter()
            .sum();

        assert_eq!(total, Price::from(6));
    }

    #[test]
    fn displays_without_trailing_zeros() {
        assert_eq!(Price::new(Decimal::new(12_500, 2)).to_string(), "125");
        assert_eq!(Price::new(Decimal::new(1_250, 2)).to_string(), "12.5");
    }

    #[test]
    fn formats_with_currency() {
        let formatted = Price::from(2400).format(iso::USD);

        assert!(formatted.contains("2,400"), "unexpected format: {formatted}");
    }
}
