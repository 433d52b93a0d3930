//! Mesa prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    catalog::{
        Catalog, Category, CategoryId, Product, ProductId, Promotion, PromotionId,
        fixtures::FixtureError, resolve_image_url,
    },
    checkout::{CheckoutError, CheckoutErrors, CheckoutForm, CheckoutPolicy, Field, prepare},
    flow::{FlowError, FlowEvent, OrderFlow},
    ids::{IdValue, RecordId},
    orders::{Customer, Order, OrderDraft, OrderId, OrderLine, OrderStatus, PaymentMethod},
    prices::Price,
    state::{Admin, AdminId, AppState, AuthState, Intent, UiState, reduce},
};
