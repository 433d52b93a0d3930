//! Application Store
//!
//! [`Store`] owns the single [`AppState`] of the client. Every change goes
//! through [`Store::dispatch`], which runs the pure reducer and publishes the
//! new snapshot to subscribers. The async operations wrap API calls with the
//! intents a view needs: start, success (reload or local effect plus a success
//! message) and failure (error message, error returned to the caller).

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use mesa::{
    catalog::{Catalog, Category, CategoryId, Product, ProductId, Promotion, PromotionId},
    checkout::{CheckoutForm, CheckoutPolicy, prepare},
    flow::{FlowError, FlowEvent},
    orders::{Order, OrderDraft, OrderId, OrderStatus},
    state::{Admin, AppState, Intent},
};
use tokio::{runtime::Handle, sync::watch, time::sleep};
use tracing::{debug, info, warn};

use crate::api::{
    Api, ApiError, CategoryInput, OrderFilter, Page, ProductFilter, ProductInput, PromotionInput,
    TokenStore,
};

mod errors;
mod in_flight;
mod messages;
mod sequence;

pub use errors::StoreError;
pub use sequence::Collection;

use in_flight::{InFlight, OperationKey};
use messages::MessageExpiry;
use sequence::{Sequencer, Ticket};

/// How long error and success messages stay visible by default.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Origin that server-relative image paths are resolved against
    pub backend_url: String,

    /// Lifetime of transient messages
    pub message_ttl: Duration,

    /// Checkout variant
    pub checkout: CheckoutPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            message_ttl: DEFAULT_MESSAGE_TTL,
            checkout: CheckoutPolicy::default(),
        }
    }
}

struct Inner {
    api: Arc<dyn Api>,
    tokens: Arc<dyn TokenStore>,
    backend_url: String,
    checkout: CheckoutPolicy,
    state: watch::Sender<AppState>,
    sequences: Sequencer,
    in_flight: InFlight,
    messages: MessageExpiry,
}

impl Inner {
    /// Clear the messages if they were set by `generation`.
    ///
    /// The generation is checked while the state is locked, so a newer message
    /// written concurrently is never cleared.
    fn expire_messages(&self, generation: u64) -> bool {
        self.state.send_if_modified(|state| {
            if !self.messages.is_current(generation) {
                return false;
            }

            debug!(intent = Intent::ClearMessages.name(), "dispatch");
            state.apply(Intent::ClearMessages);

            true
        })
    }
}

/// Cloneable handle to the application state container.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Store")
            .field("backend_url", &self.inner.backend_url)
            .field("checkout", &self.inner.checkout)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new(api: Arc<dyn Api>, tokens: Arc<dyn TokenStore>, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(AppState::default());

        Self {
            inner: Arc::new(Inner {
                api,
                tokens,
                backend_url: config.backend_url,
                checkout: config.checkout,
                state,
                sequences: Sequencer::default(),
                in_flight: InFlight::default(),
                messages: MessageExpiry::new(config.message_ttl),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, read: impl FnOnce(&AppState) -> R) -> R {
        read(&self.inner.state.borrow())
    }

    /// Receiver notified after every dispatched intent.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    /// Checkout variant used by [`Store::place_order`].
    pub fn checkout_policy(&self) -> &CheckoutPolicy {
        &self.inner.checkout
    }

    /// Apply `intent` to the state and notify subscribers.
    pub fn dispatch(&self, intent: Intent) {
        debug!(intent = intent.name(), "dispatch");

        // Timers armed for earlier messages must already be stale once the
        // new message is visible.
        let generation = intent
            .sets_message()
            .then(|| self.inner.messages.next_generation());

        self.inner.state.send_modify(|state| state.apply(intent));

        if let Some(generation) = generation {
            self.arm_message_expiry(generation);
        }
    }

    fn arm_message_expiry(&self, generation: u64) {
        let Ok(runtime) = Handle::try_current() else {
            return;
        };

        let ttl = self.inner.messages.ttl();
        let inner = Arc::downgrade(&self.inner);

        let timer = runtime.spawn(async move {
            sleep(ttl).await;

            if let Some(inner) = inner.upgrade() {
                inner.expire_messages(generation);
            }
        });

        self.inner.messages.replace(timer);
    }

    fn fail(&self, error: impl Into<StoreError>) -> StoreError {
        let error = error.into();

        self.dispatch(Intent::SetError(error.to_string()));

        error
    }

    fn succeed(&self, message: impl Into<String>) {
        self.dispatch(Intent::SetSuccess(message.into()));
    }

    fn is_stale(&self, ticket: Ticket) -> bool {
        if self.inner.sequences.is_latest(ticket) {
            return false;
        }

        warn!(
            collection = %ticket.collection,
            sequence = ticket.sequence,
            "discarding stale response"
        );

        true
    }

    fn publish(&self, ticket: Ticket, intent: Intent) {
        if !self.is_stale(ticket) {
            self.dispatch(intent);
        }
    }

    /// Like [`Store::fail`], but a superseded reload never shows its error.
    fn fail_for(&self, ticket: Ticket, error: impl Into<StoreError>) -> StoreError {
        if self.is_stale(ticket) {
            return error.into();
        }

        self.fail(error)
    }

    fn resolve_products(&self, products: Vec<Product>) -> Vec<Product> {
        products
            .into_iter()
            .map(|product| product.with_resolved_image(&self.inner.backend_url))
            .collect()
    }

    fn resolve_promotions(&self, promotions: Vec<Promotion>) -> Vec<Promotion> {
        promotions
            .into_iter()
            .map(|promotion| promotion.with_resolved_image(&self.inner.backend_url))
            .collect()
    }

    /// Reload a server-backed collection with its default filter.
    ///
    /// Every mutation calls this instead of patching state in place.
    ///
    /// # Errors
    ///
    /// Returns the reload's error, which is also shown as the UI error.
    pub async fn refresh(&self, collection: Collection) -> Result<(), StoreError> {
        match collection {
            Collection::Categories => self.load_categories(true).await.map(drop),
            Collection::Products => self.load_products(ProductFilter::default()).await.map(drop),
            Collection::Orders => self.load_orders(OrderFilter::default()).await.map(drop),
            Collection::Promotions => self.load_promotions(true).await.map(drop),
        }
    }

    /// Restore a stored session and load the public catalog.
    ///
    /// Failures are logged, never shown; an empty catalog is a valid result.
    #[tracing::instrument(skip(self))]
    pub async fn bootstrap(&self) {
        if let Err(error) = self.verify_session().await {
            warn!(%error, "failed to check stored session");
        }

        self.dispatch(Intent::SetLoading(true));

        if let Err(error) = self.load_initial_catalog().await {
            warn!(%error, "failed to load initial catalog");
        }

        self.dispatch(Intent::SetLoading(false));
    }

    async fn load_initial_catalog(&self) -> Result<(), ApiError> {
        let ticket = self.inner.sequences.issue(Collection::Categories);
        let categories = self.inner.api.categories(true).await?;
        self.publish(ticket, Intent::SetCategories(categories));

        let ticket = self.inner.sequences.issue(Collection::Products);
        let products = self.inner.api.products(ProductFilter::default()).await?;
        self.publish(ticket, Intent::SetProducts(self.resolve_products(products)));

        let ticket = self.inner.sequences.issue(Collection::Promotions);

        if let Some(promotion) = self.inner.api.current_promotion().await? {
            let promotions = self.resolve_promotions(vec![promotion]);
            self.publish(ticket, Intent::SetPromotions(promotions));
        }

        Ok(())
    }

    /// Replace the catalog with a locally loaded menu.
    pub fn seed_catalog(&self, catalog: Catalog) {
        self.dispatch(Intent::SetCategories(catalog.categories));
        self.dispatch(Intent::SetProducts(self.resolve_products(catalog.products)));
        self.dispatch(Intent::SetPromotions(
            self.resolve_promotions(catalog.promotions),
        ));
    }

    /// Sign in and persist the session token.
    ///
    /// # Errors
    ///
    /// Returns the API error; its message is shown as the login failure.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Admin, StoreError> {
        let _guard = self.inner.in_flight.begin(OperationKey::new("login"))?;

        self.dispatch(Intent::LoginStart);

        let response = match self
            .inner
            .api
            .login(email.to_string(), password.to_string())
            .await
        {
            Ok(response) => response,
            Err(error) => {
                self.dispatch(Intent::LoginFailure(error.to_string()));
                return Err(error.into());
            }
        };

        if let Err(error) = self.inner.tokens.save(&response.token) {
            warn!(%error, "failed to persist session token");
        }

        self.inner.api.set_token(Some(response.token));

        info!(admin = %response.admin.email, "logged in");

        self.dispatch(Intent::LoginSuccess(response.admin.clone()));

        Ok(response.admin)
    }

    /// End the session, forget the token and empty the cart.
    #[tracing::instrument(skip(self))]
    pub fn logout(&self) {
        if let Err(error) = self.inner.tokens.clear() {
            warn!(%error, "failed to remove session token");
        }

        self.inner.api.set_token(None);
        self.dispatch(Intent::Logout);

        info!("logged out");
    }

    /// Check the stored token against the server.
    ///
    /// A rejected token logs the session out without showing an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the token store cannot be read.
    #[tracing::instrument(skip(self))]
    pub async fn verify_session(&self) -> Result<Option<Admin>, StoreError> {
        let Some(token) = self.inner.tokens.load()? else {
            return Ok(None);
        };

        self.inner.api.set_token(Some(token));
        self.dispatch(Intent::SetLoading(true));

        let admin = match self.inner.api.me().await {
            Ok(admin) => {
                self.dispatch(Intent::LoginSuccess(admin.clone()));
                Some(admin)
            }
            Err(error) => {
                warn!(%error, "stored session rejected");
                self.logout();
                None
            }
        };

        self.dispatch(Intent::SetLoading(false));

        Ok(admin)
    }

    /// Load categories.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn load_categories(&self, active: bool) -> Result<Vec<Category>, StoreError> {
        let ticket = self.inner.sequences.issue(Collection::Categories);

        let categories = self
            .inner
            .api
            .categories(active)
            .await
            .map_err(|error| self.fail_for(ticket, error))?;

        self.publish(ticket, Intent::SetCategories(categories.clone()));

        Ok(categories)
    }

    /// Create a category and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the same category is already being created or the
    /// API call fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_category(&self, input: CategoryInput) -> Result<Category, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("create_category", &input.name))?;

        let category = self
            .inner
            .api
            .create_category(input)
            .await
            .map_err(|error| self.fail(error))?;

        info!(category_id = %category.id, "created category");

        self.succeed("Category created");
        self.refresh(Collection::Categories).await?;

        Ok(category)
    }

    /// Update a category and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is already being updated or the API
    /// call fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Category, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("update_category", &id))?;

        let category = self
            .inner
            .api
            .update_category(id, input)
            .await
            .map_err(|error| self.fail(error))?;

        info!(category_id = %category.id, "updated category");

        self.succeed("Category updated");
        self.refresh(Collection::Categories).await?;

        Ok(category)
    }

    /// Delete a category and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is already being deleted or the API
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("delete_category", &id))?;

        self.inner
            .api
            .delete_category(id.clone())
            .await
            .map_err(|error| self.fail(error))?;

        info!(category_id = %id, "deleted category");

        self.succeed("Category deleted");
        self.refresh(Collection::Categories).await
    }

    /// Flip a category's active flag and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is already being toggled or the API
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_category(&self, id: CategoryId) -> Result<(), StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("toggle_category", &id))?;

        let message = self
            .inner
            .api
            .toggle_category(id)
            .await
            .map_err(|error| self.fail(error))?;

        self.succeed(message.unwrap_or_else(|| "Category updated".to_string()));
        self.refresh(Collection::Categories).await
    }

    /// Load products, resolving their image URLs.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn load_products(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError> {
        let ticket = self.inner.sequences.issue(Collection::Products);

        let products = self
            .inner
            .api
            .products(filter)
            .await
            .map_err(|error| self.fail_for(ticket, error))?;
        let products = self.resolve_products(products);

        self.publish(ticket, Intent::SetProducts(products.clone()));

        Ok(products)
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, StoreError> {
        let product = self
            .inner
            .api
            .product(id)
            .await
            .map_err(|error| self.fail(error))?;

        Ok(product.with_resolved_image(&self.inner.backend_url))
    }

    /// Create a product and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the same product is already being created or the
    /// API call fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> Result<Product, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("create_product", &input.name))?;

        let product = self
            .inner
            .api
            .create_product(input)
            .await
            .map_err(|error| self.fail(error))?;

        info!(product_id = %product.id, "created product");

        self.succeed("Product created");
        self.refresh(Collection::Products).await?;

        Ok(product)
    }

    /// Update a product and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is already being updated or the API
    /// call fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Product, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("update_product", &id))?;

        let product = self
            .inner
            .api
            .update_product(id, input)
            .await
            .map_err(|error| self.fail(error))?;

        info!(product_id = %product.id, "updated product");

        self.succeed("Product updated");
        self.refresh(Collection::Products).await?;

        Ok(product)
    }

    /// Delete a product and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is already being deleted or the API
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("delete_product", &id))?;

        self.inner
            .api
            .delete_product(id.clone())
            .await
            .map_err(|error| self.fail(error))?;

        info!(product_id = %id, "deleted product");

        self.succeed("Product deleted");
        self.refresh(Collection::Products).await
    }

    /// Flip a product's active flag and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is already being toggled or the API
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_product(&self, id: ProductId) -> Result<(), StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("toggle_product", &id))?;

        let message = self
            .inner
            .api
            .toggle_product(id)
            .await
            .map_err(|error| self.fail(error))?;

        self.succeed(message.unwrap_or_else(|| "Product updated".to_string()));
        self.refresh(Collection::Products).await
    }

    /// Load one page of orders.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn load_orders(&self, filter: OrderFilter) -> Result<Page<Order>, StoreError> {
        let ticket = self.inner.sequences.issue(Collection::Orders);

        let page = self
            .inner
            .api
            .orders(filter)
            .await
            .map_err(|error| self.fail_for(ticket, error))?;

        self.publish(ticket, Intent::SetOrders(page.items.clone()));

        Ok(page)
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, StoreError> {
        self.inner
            .api
            .order(id)
            .await
            .map_err(|error| self.fail(error))
    }

    /// Submit an order and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if an order is already being submitted or the API
    /// call fails; the cart is left untouched in that case.
    #[tracing::instrument(skip(self, draft), fields(total = %draft.total))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let _guard = self.inner.in_flight.begin(OperationKey::new("create_order"))?;

        let order = self
            .inner
            .api
            .create_order(draft)
            .await
            .map_err(|error| self.fail(error))?;

        info!(order_id = %order.id, "created order");

        self.succeed("Order placed");
        self.dispatch(Intent::ClearCart);

        Ok(order)
    }

    /// Move an order to `status` and reload the order list.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is already being updated or the API call
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("update_order_status", &id))?;

        let order = self
            .inner
            .api
            .update_order_status(id, status)
            .await
            .map_err(|error| self.fail(error))?;

        info!(order_id = %order.id, status = %order.status, "updated order status");

        self.succeed("Order status updated");
        self.refresh(Collection::Orders).await?;

        Ok(order)
    }

    /// Load promotions, resolving their image URLs.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn load_promotions(&self, active: bool) -> Result<Vec<Promotion>, StoreError> {
        let ticket = self.inner.sequences.issue(Collection::Promotions);

        let promotions = self
            .inner
            .api
            .promotions(active)
            .await
            .map_err(|error| self.fail_for(ticket, error))?;
        let promotions = self.resolve_promotions(promotions);

        self.publish(ticket, Intent::SetPromotions(promotions.clone()));

        Ok(promotions)
    }

    /// Load the featured promotion into the promotion list.
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also shown as the UI error.
    #[tracing::instrument(skip(self))]
    pub async fn load_current_promotion(&self) -> Result<Option<Promotion>, StoreError> {
        let ticket = self.inner.sequences.issue(Collection::Promotions);

        let promotion = self
            .inner
            .api
            .current_promotion()
            .await
            .map_err(|error| self.fail_for(ticket, error))?
            .map(|promotion| promotion.with_resolved_image(&self.inner.backend_url));

        let promotions = promotion.iter().cloned().collect();

        self.publish(ticket, Intent::SetPromotions(promotions));

        Ok(promotion)
    }

    /// Create a promotion and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the same promotion is already being created or the
    /// API call fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_promotion(&self, input: PromotionInput) -> Result<Promotion, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("create_promotion", &input.title))?;

        let promotion = self
            .inner
            .api
            .create_promotion(input)
            .await
            .map_err(|error| self.fail(error))?;

        info!(promotion_id = %promotion.id, "created promotion");

        self.succeed("Promotion created");
        self.refresh(Collection::Promotions).await?;

        Ok(promotion)
    }

    /// Update a promotion and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is already being updated or the API
    /// call fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_promotion(
        &self,
        id: PromotionId,
        input: PromotionInput,
    ) -> Result<Promotion, StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("update_promotion", &id))?;

        let promotion = self
            .inner
            .api
            .update_promotion(id, input)
            .await
            .map_err(|error| self.fail(error))?;

        info!(promotion_id = %promotion.id, "updated promotion");

        self.succeed("Promotion updated");
        self.refresh(Collection::Promotions).await?;

        Ok(promotion)
    }

    /// Delete a promotion and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is already being deleted or the API
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_promotion(&self, id: PromotionId) -> Result<(), StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("delete_promotion", &id))?;

        self.inner
            .api
            .delete_promotion(id.clone())
            .await
            .map_err(|error| self.fail(error))?;

        info!(promotion_id = %id, "deleted promotion");

        self.succeed("Promotion deleted");
        self.refresh(Collection::Promotions).await
    }

    /// Flip a promotion's active flag and reload the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is already being toggled or the API
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_promotion(&self, id: PromotionId) -> Result<(), StoreError> {
        let _guard = self
            .inner
            .in_flight
            .begin(OperationKey::on("toggle_promotion", &id))?;

        let message = self
            .inner
            .api
            .toggle_promotion(id)
            .await
            .map_err(|error| self.fail(error))?;

        self.succeed(message.unwrap_or_else(|| "Promotion updated".to_string()));
        self.refresh(Collection::Promotions).await
    }

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&self, product: Product) {
        self.dispatch(Intent::AddToCart(product));
    }

    /// Drop a product from the cart.
    pub fn remove_from_cart(&self, product_id: ProductId) {
        self.dispatch(Intent::RemoveFromCart(product_id));
    }

    /// Set a cart line's quantity; zero or less removes the line.
    pub fn update_cart_item(&self, product_id: ProductId, quantity: i64) {
        self.dispatch(Intent::UpdateCartItem {
            product_id,
            quantity,
        });
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.dispatch(Intent::ClearCart);
    }

    fn advance(&self, event: FlowEvent) -> Result<(), FlowError> {
        let next = self.with_state(|state| state.flow.transition(event.clone()))?;

        debug!(step = %next, "flow advanced");

        self.dispatch(Intent::Flow(event));

        Ok(())
    }

    /// Open the cart.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` unless the customer is browsing.
    pub fn open_cart(&self) -> Result<(), FlowError> {
        self.advance(FlowEvent::OpenCart)
    }

    /// Continue from the cart to checkout.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` unless the cart is open.
    pub fn proceed_to_checkout(&self) -> Result<(), FlowError> {
        self.advance(FlowEvent::ProceedToCheckout)
    }

    /// Go from checkout back to the cart.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` unless checkout is open.
    pub fn back_to_cart(&self) -> Result<(), FlowError> {
        self.advance(FlowEvent::BackToCart)
    }

    /// Close the cart or checkout.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` unless the cart or checkout is open.
    pub fn close(&self) -> Result<(), FlowError> {
        self.advance(FlowEvent::Cancel)
    }

    /// Validate the checkout form, submit the order and confirm it.
    ///
    /// Validation failures are returned without calling the API or touching
    /// the UI error message.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Flow` unless checkout is open,
    /// `StoreError::Checkout` if the form or cart is invalid, or the
    /// submission error.
    #[tracing::instrument(skip(self, form))]
    pub async fn place_order(&self, form: &CheckoutForm) -> Result<Order, StoreError> {
        let draft = self.with_state(|state| -> Result<OrderDraft, StoreError> {
            state.flow.ready_to_confirm()?;

            Ok(prepare(&state.cart, form, &self.inner.checkout)?)
        })?;

        let order = self.create_order(draft).await?;

        self.dispatch(Intent::Flow(FlowEvent::Confirm(Box::new(order.clone()))));

        Ok(order)
    }

    /// Dismiss the confirmation and start a new order.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` unless an order was confirmed.
    pub fn acknowledge_order(&self) -> Result<(), FlowError> {
        self.advance(FlowEvent::Acknowledge)
    }
}
