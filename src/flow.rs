//! Ordering Flow
//!
//! `Browsing → CartOpen → CheckoutOpen → OrderConfirmed`. The cart and
//! checkout can be cancelled back to browsing. A confirmed order stays
//! confirmed until the customer acknowledges it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::orders::Order;

/// Where the customer is in the ordering flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OrderFlow {
    /// Looking at the menu
    #[default]
    Browsing,

    /// Reviewing the cart
    CartOpen,

    /// Filling in the checkout form
    CheckoutOpen,

    /// Order accepted by the server
    OrderConfirmed(Box<Order>),
}

/// Customer action driving the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Open the cart
    OpenCart,

    /// Continue from the cart to checkout
    ProceedToCheckout,

    /// Go from checkout back to the cart
    BackToCart,

    /// Close the cart or checkout
    Cancel,

    /// The server accepted the order
    Confirm(Box<Order>),

    /// Customer dismissed the confirmation ("new order")
    Acknowledge,
}

/// Flow errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// The event is not valid in the current step
    #[error("cannot {event} while {step}")]
    InvalidTransition {
        /// Current step
        step: &'static str,

        /// Rejected event
        event: &'static str,
    },
}

impl OrderFlow {
    /// Step name, for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            OrderFlow::Browsing => "browsing",
            OrderFlow::CartOpen => "cart open",
            OrderFlow::CheckoutOpen => "checkout open",
            OrderFlow::OrderConfirmed(_) => "order confirmed",
        }
    }

    /// Apply `event`, returning the next step.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` if `event` is not allowed from
    /// the current step.
    pub fn transition(&self, event: FlowEvent) -> Result<OrderFlow, FlowError> {
        match (self, event) {
            (OrderFlow::Browsing, FlowEvent::OpenCart)
            | (OrderFlow::CheckoutOpen, FlowEvent::BackToCart) => Ok(OrderFlow::CartOpen),
            (OrderFlow::CartOpen, FlowEvent::ProceedToCheckout) => Ok(OrderFlow::CheckoutOpen),
            (OrderFlow::CartOpen | OrderFlow::CheckoutOpen, FlowEvent::Cancel)
            | (OrderFlow::OrderConfirmed(_), FlowEvent::Acknowledge) => Ok(OrderFlow::Browsing),
            (OrderFlow::CheckoutOpen, FlowEvent::Confirm(order)) => {
                Ok(OrderFlow::OrderConfirmed(order))
            }
            (step, event) => Err(FlowError::InvalidTransition {
                step: step.name(),
                event: event.name(),
            }),
        }
    }

    /// Check that an order can be placed from the current step.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless checkout is open.
    pub fn ready_to_confirm(&self) -> Result<(), FlowError> {
        match self {
            OrderFlow::CheckoutOpen => Ok(()),
            step => Err(FlowError::InvalidTransition {
                step: step.name(),
                event: "confirm order",
            }),
        }
    }

    /// The confirmed order, if the flow is in its terminal step.
    pub fn confirmed_order(&self) -> Option<&Order> {
        match self {
            OrderFlow::OrderConfirmed(order) => Some(order),
            _ => None,
        }
    }
}

impl FlowEvent {
    /// Event name, for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::OpenCart => "open cart",
            FlowEvent::ProceedToCheckout => "proceed to checkout",
            FlowEvent::BackToCart => "go back to cart",
            FlowEvent::Cancel => "cancel",
            FlowEvent::Confirm(_) => "confirm order",
            FlowEvent::Acknowledge => "acknowledge order",
        }
    }
}

impl Display for OrderFlow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}
