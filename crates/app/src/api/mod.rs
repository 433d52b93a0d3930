//! Ordering API
//!
//! [`Api`] is the seam between the store and the REST backend. [`HttpApi`]
//! talks to the real server; tests use the generated `MockApi`.

use async_trait::async_trait;
use mesa::{
    catalog::{Category, CategoryId, Product, ProductId, Promotion, PromotionId},
    orders::{Order, OrderDraft, OrderId, OrderStatus},
    state::Admin,
};
use mockall::automock;
use zeroize::Zeroizing;

mod errors;
mod http;
pub mod models;
pub mod token;

pub use errors::{ApiError, DEFAULT_FAILURE_MESSAGE};
pub use http::HttpApi;
pub use models::{
    CategoryInput, ImageUpload, LoginResponse, OrderFilter, Page, Pagination, ProductFilter,
    ProductInput, PromotionInput,
};
pub use token::{FileTokenStore, MemoryTokenStore, MockTokenStore, TokenStore, TokenStoreError};

/// REST operations used by the ordering client.
#[automock]
#[async_trait]
pub trait Api: Send + Sync {
    /// Attach or drop the bearer token sent with every request.
    fn set_token(&self, token: Option<Zeroizing<String>>);

    /// Exchange credentials for a session token.
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError>;

    /// Admin owning the current token.
    async fn me(&self) -> Result<Admin, ApiError>;

    /// List categories.
    async fn categories(&self, active: bool) -> Result<Vec<Category>, ApiError>;

    /// Create a category.
    async fn create_category(&self, input: CategoryInput) -> Result<Category, ApiError>;

    /// Replace a category.
    async fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Category, ApiError>;

    /// Delete a category.
    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError>;

    /// Flip a category's active flag; returns the server's message.
    async fn toggle_category(&self, id: CategoryId) -> Result<Option<String>, ApiError>;

    /// List products.
    async fn products(&self, filter: ProductFilter) -> Result<Vec<Product>, ApiError>;

    /// Fetch a single product.
    async fn product(&self, id: ProductId) -> Result<Product, ApiError>;

    /// Create a product.
    async fn create_product(&self, input: ProductInput) -> Result<Product, ApiError>;

    /// Replace a product.
    async fn update_product(&self, id: ProductId, input: ProductInput)
    -> Result<Product, ApiError>;

    /// Delete a product.
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    /// Flip a product's active flag; returns the server's message.
    async fn toggle_product(&self, id: ProductId) -> Result<Option<String>, ApiError>;

    /// List orders.
    async fn orders(&self, filter: OrderFilter) -> Result<Page<Order>, ApiError>;

    /// Fetch a single order.
    async fn order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Submit a new order.
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, ApiError>;

    /// Move an order to `status`.
    async fn update_order_status(&self, id: OrderId, status: OrderStatus)
    -> Result<Order, ApiError>;

    /// List promotions.
    async fn promotions(&self, active: bool) -> Result<Vec<Promotion>, ApiError>;

    /// The promotion currently featured, if any.
    async fn current_promotion(&self) -> Result<Option<Promotion>, ApiError>;

    /// Create a promotion.
    async fn create_promotion(&self, input: PromotionInput) -> Result<Promotion, ApiError>;

    /// Replace a promotion.
    async fn update_promotion(
        &self,
        id: PromotionId,
        input: PromotionInput,
    ) -> Result<Promotion, ApiError>;

    /// Delete a promotion.
    async fn delete_promotion(&self, id: PromotionId) -> Result<(), ApiError>;

    /// Flip a promotion's active flag; returns the server's message.
    async fn toggle_promotion(&self, id: PromotionId) -> Result<Option<String>, ApiError>;
}
