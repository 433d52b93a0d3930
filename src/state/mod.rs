//! Application State
//!
//! The whole front end reads from one [`AppState`] and changes it only through
//! [`reduce`]. The reducer is total and pure; asynchronous work happens in the
//! caller, which dispatches intents before and after it awaits.

use serde::{Deserialize, Serialize};

use crate::{
    cart::Cart,
    catalog::Catalog,
    flow::{FlowEvent, OrderFlow},
    ids::RecordId,
    orders::Order,
};

pub mod intent;

pub use intent::Intent;

/// Admin Id
pub type AdminId = RecordId<Admin>;

/// Authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    /// Admin id
    #[serde(alias = "_id")]
    pub id: AdminId,

    /// Login email
    pub email: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Authentication status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Whether an admin session is active
    pub is_authenticated: bool,

    /// The signed in admin
    pub admin: Option<Admin>,
}

/// Loading indicator and transient messages.
///
/// At most one of `error` and `success` is set at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    loading: bool,
    error: Option<String>,
    success: Option<String>,
}

impl UiState {
    /// Whether a request is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current success message.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.success = None;
    }

    fn set_success(&mut self, message: String) {
        self.success = Some(message);
        self.error = None;
    }

    fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }
}

/// Everything the front end shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Authentication
    pub auth: AuthState,

    /// Categories, products and promotions
    pub catalog: Catalog,

    /// Orders loaded for the admin view
    pub orders: Vec<Order>,

    /// Shopping cart, in memory only
    pub cart: Cart,

    /// Ordering flow step
    pub flow: OrderFlow,

    /// Loading indicator and messages
    pub ui: UiState,
}

impl AppState {
    /// Apply `intent` in place.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::LoginStart => {
                self.ui.loading = true;
                self.ui.error = None;
            }
            Intent::LoginSuccess(admin) => {
                self.auth = AuthState {
                    is_authenticated: true,
                    admin: Some(admin),
                };
                self.ui.loading = false;
                self.ui.error = None;
            }
            Intent::LoginFailure(message) => {
                self.auth = AuthState::default();
                self.ui.loading = false;
                self.ui.set_error(message);
            }
            Intent::Logout => {
                self.auth = AuthState::default();
                self.cart.clear();
                self.flow = OrderFlow::Browsing;
            }
            Intent::SetCategories(categories) => self.catalog.categories = categories,
            Intent::SetProducts(products) => self.catalog.products = products,
            Intent::SetOrders(orders) => self.orders = orders,
            Intent::SetPromotions(promotions) => self.catalog.promotions = promotions,
            Intent::AddToCart(product) => self.cart.add_item(&product),
            Intent::RemoveFromCart(product_id) => self.cart.remove_item(&product_id),
            Intent::UpdateCartItem {
                product_id,
                quantity,
            } => self.cart.update_quantity(&product_id, quantity),
            Intent::ClearCart => self.cart.clear(),
            Intent::SetLoading(loading) => self.ui.loading = loading,
            Intent::SetError(message) => self.ui.set_error(message),
            Intent::SetSuccess(message) => self.ui.set_success(message),
            Intent::ClearMessages => self.ui.clear_messages(),
            Intent::Flow(event) => {
                let acknowledged = event == FlowEvent::Acknowledge;

                if let Ok(next) = self.flow.transition(event) {
                    self.flow = next;

                    if acknowledged {
                        self.cart.clear();
                    }
                }
            }
        }
    }
}

/// Pure transition function: `(state, intent) → state'`.
#[must_use]
pub fn reduce(mut state: AppState, intent: Intent) -> AppState {
    state.apply(intent);
    state
}
