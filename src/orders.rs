//! Orders

use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    catalog::ProductId,
    ids::RecordId,
    prices::Price,
};

/// Order Id
pub type OrderId = RecordId<Order>;

/// How the customer pays on delivery or pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash
    #[default]
    Cash,

    /// Bank transfer
    Transfer,
}

/// Unknown payment method name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash" => Ok(Self::Cash),
            "transfer" => Ok(Self::Transfer),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
        })
    }
}

/// Lifecycle of an order on the kitchen side.
///
/// Statuses the server reports that are not known here are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Received, not yet started
    #[default]
    Pending,

    /// Being prepared
    Preparing,

    /// Ready for pickup or dispatch
    Ready,

    /// Handed to the customer
    Delivered,

    /// Any other status reported by the server
    Other(String),
}

impl OrderStatus {
    /// Statuses an admin can move an order through, in order.
    pub const KNOWN: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            "delivered" => Self::Delivered,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value.to_string()))
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Customer details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// First name
    #[serde(rename = "name")]
    pub first_name: String,

    /// Last name
    #[serde(default)]
    pub last_name: String,

    /// Phone number as entered
    #[serde(default)]
    pub phone: String,
}

/// Snapshot of a cart line inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product id
    #[serde(rename = "product")]
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Quantity
    pub quantity: u32,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity(),
        }
    }
}

/// An order ready to be submitted; the payload of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Customer details
    pub customer: Customer,

    /// Snapshot of the cart
    pub items: Vec<OrderLine>,

    /// Subtotal plus surcharge
    pub total: Price,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Delivery address, when collected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Initial status
    pub status: OrderStatus,
}

impl OrderDraft {
    /// Snapshot `cart` into a draft, adding `surcharge` to its total.
    pub fn assemble(
        cart: &Cart,
        customer: Customer,
        payment_method: PaymentMethod,
        address: Option<String>,
        surcharge: Price,
    ) -> Self {
        OrderDraft {
            customer,
            items: cart.lines().iter().map(OrderLine::from).collect(),
            total: cart.total() + surcharge,
            payment_method,
            address,
            status: OrderStatus::Pending,
        }
    }

    /// Sum of line prices, without surcharge.
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .map(|line| line.price.times(line.quantity))
            .sum()
    }
}

/// An order as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    #[serde(alias = "_id")]
    pub id: OrderId,

    /// Customer details
    pub customer: Customer,

    /// Ordered lines
    #[serde(default)]
    pub items: Vec<OrderLine>,

    /// Charged total
    pub total: Price,

    /// Payment method
    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// Delivery address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: OrderStatus,

    /// Creation timestamp as reported by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::catalog::Product;

    use super::*;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            description: None,
            price: Price::from(price),
            image: None,
            category_id: None,
            is_active: true,
            is_available: true,
        }
    }

    fn customer() -> Customer {
        Customer {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            phone: "11 5555-1234".to_string(),
        }
    }

    #[test]
    fn status_round_trips_known_names() {
        for status in OrderStatus::KNOWN {
            assert_eq!(OrderStatus::from(status.to_string()), status);
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = OrderStatus::from("cancelled".to_string());

        assert_eq!(status, OrderStatus::Other("cancelled".to_string()));
        assert_eq!(status.as_str(), "cancelled");
    }

    #[test]
    fn payment_method_parses() {
        assert_eq!("cash".parse(), Ok(PaymentMethod::Cash));
        assert_eq!("transfer".parse(), Ok(PaymentMethod::Transfer));
        assert_eq!(
            "card".parse::<PaymentMethod>(),
            Err(UnknownPaymentMethod("card".to_string()))
        );
    }

    #[test]
    fn payment_method_defaults_to_cash() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn assemble_snapshots_cart_and_adds_surcharge() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1200));
        cart.add_item(&product(1, 1200));
        cart.add_item(&product(2, 500));

        let draft = OrderDraft::assemble(
            &cart,
            customer(),
            PaymentMethod::Transfer,
            Some("Calle 123".to_string()),
            Price::from(2),
        );

        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.subtotal(), Price::from(2900));
        assert_eq!(draft.total, Price::from(2902));
        assert_eq!(draft.status, OrderStatus::Pending);
    }

    #[test]
    fn assemble_without_surcharge_matches_cart_total() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1200));

        let draft = OrderDraft::assemble(
            &cart,
            customer(),
            PaymentMethod::Cash,
            None,
            Price::ZERO,
        );

        assert_eq!(draft.total, cart.total());
        assert!(draft.address.is_none());
    }
}
