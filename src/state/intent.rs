//! Intents

use crate::{
    catalog::{Category, Product, ProductId, Promotion},
    flow::FlowEvent,
    orders::Order,
    state::Admin,
};

/// A named request to change application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Login request started
    LoginStart,

    /// Login or session check succeeded
    LoginSuccess(Admin),

    /// Login failed with a message
    LoginFailure(String),

    /// Session ended
    Logout,

    /// Replace the category list
    SetCategories(Vec<Category>),

    /// Replace the product list
    SetProducts(Vec<Product>),

    /// Replace the order list
    SetOrders(Vec<Order>),

    /// Replace the promotion list
    SetPromotions(Vec<Promotion>),

    /// Add one unit of a product to the cart
    AddToCart(Product),

    /// Drop a product from the cart
    RemoveFromCart(ProductId),

    /// Set a cart line's quantity; zero or less removes it
    UpdateCartItem {
        /// Product to update
        product_id: ProductId,

        /// New quantity
        quantity: i64,
    },

    /// Empty the cart
    ClearCart,

    /// Toggle the loading indicator
    SetLoading(bool),

    /// Show an error message
    SetError(String),

    /// Show a success message
    SetSuccess(String),

    /// Hide both messages
    ClearMessages,

    /// Advance the ordering flow
    Flow(FlowEvent),
}

impl Intent {
    /// Stable intent name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::LoginStart => "LOGIN_START",
            Intent::LoginSuccess(_) => "LOGIN_SUCCESS",
            Intent::LoginFailure(_) => "LOGIN_FAILURE",
            Intent::Logout => "LOGOUT",
            Intent::SetCategories(_) => "SET_CATEGORIES",
            Intent::SetProducts(_) => "SET_PRODUCTS",
            Intent::SetOrders(_) => "SET_ORDERS",
            Intent::SetPromotions(_) => "SET_PROMOTIONS",
            Intent::AddToCart(_) => "ADD_TO_CART",
            Intent::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Intent::UpdateCartItem { .. } => "UPDATE_CART_ITEM",
            Intent::ClearCart => "CLEAR_CART",
            Intent::SetLoading(_) => "SET_LOADING",
            Intent::SetError(_) => "SET_ERROR",
            Intent::SetSuccess(_) => "SET_SUCCESS",
            Intent::ClearMessages => "CLEAR_MESSAGES",
            Intent::Flow(_) => "FLOW",
        }
    }

    /// Whether applying this intent sets a transient message.
    pub fn sets_message(&self) -> bool {
        matches!(
            self,
            Intent::SetError(_) | Intent::SetSuccess(_) | Intent::LoginFailure(_)
        )
    }
}
