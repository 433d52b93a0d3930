//! reqwest implementation of [`Api`].

use std::{
    sync::{PoisonError, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use mesa::{
    catalog::{Category, CategoryId, Product, ProductId, Promotion, PromotionId},
    orders::{Order, OrderDraft, OrderId, OrderStatus},
    state::Admin,
};
use reqwest::{
    Client, Method, RequestBuilder, StatusCode,
    multipart::{Form, Part},
};
use serde::{Deserialize, de::DeserializeOwned, de::IgnoredAny};
use tracing::debug;
use zeroize::Zeroizing;

use crate::api::{
    Api, ApiError, DEFAULT_FAILURE_MESSAGE,
    models::{
        CategoryInput, Envelope, ImageUpload, LoginResponse, OrderFilter, Page, ProductFilter,
        ProductInput, PromotionInput, SessionResponse,
    },
};

/// HTTP client for the ordering REST API.
#[derive(Debug)]
pub struct HttpApi {
    base_url: String,
    http: Client,
    token: RwLock<Option<Zeroizing<String>>>,
}

impl HttpApi {
    /// Create a client for the API rooted at `base_url`, e.g.
    /// `"http://localhost:5000/api"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: RwLock::new(None),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);

        match token.as_ref() {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "api response");

        if !status.is_success() {
            return Err(failure(status, &body));
        }

        Ok(body)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(request).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.send::<Envelope<T>>(request).await?.into_data()
    }

    async fn message(&self, request: RequestBuilder) -> Result<Option<String>, ApiError> {
        let body = self.execute(request).await?;

        if body.is_empty() {
            return Ok(None);
        }

        Ok(serde_json::from_slice::<Envelope<IgnoredAny>>(&body)?.message)
    }
}

/// Error for a non-success response, using the body's `message` when present.
fn failure(status: StatusCode, body: &[u8]) -> ApiError {
    #[derive(Deserialize)]
    struct FailureBody {
        message: Option<String>,
    }

    let message = serde_json::from_slice::<FailureBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized(message);
    }

    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn multipart(fields: Vec<(&'static str, String)>, image: Option<ImageUpload>) -> Form {
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    match image {
        Some(image) => form.part("image", Part::bytes(image.bytes).file_name(image.file_name)),
        None => form,
    }
}

#[async_trait]
impl Api for HttpApi {
    fn set_token(&self, token: Option<Zeroizing<String>>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError> {
        let password = Zeroizing::new(password);
        let body = serde_json::json!({ "email": email, "password": password.as_str() });

        self.send(self.request(Method::POST, "/auth/login").json(&body))
            .await
    }

    async fn me(&self) -> Result<Admin, ApiError> {
        let session: SessionResponse = self.send(self.request(Method::GET, "/auth/me")).await?;

        Ok(session.admin)
    }

    async fn categories(&self, active: bool) -> Result<Vec<Category>, ApiError> {
        self.data(self.request(Method::GET, &format!("/categories?active={active}")))
            .await
    }

    async fn create_category(&self, input: CategoryInput) -> Result<Category, ApiError> {
        self.data(self.request(Method::POST, "/categories").json(&input))
            .await
    }

    async fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Category, ApiError> {
        self.data(
            self.request(Method::PUT, &format!("/categories/{id}"))
                .json(&input),
        )
        .await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/categories/{id}")))
            .await
            .map(drop)
    }

    async fn toggle_category(&self, id: CategoryId) -> Result<Option<String>, ApiError> {
        self.message(self.request(Method::PATCH, &format!("/categories/{id}/toggle")))
            .await
    }

    async fn products(&self, filter: ProductFilter) -> Result<Vec<Product>, ApiError> {
        self.data(self.request(Method::GET, &filter.path())).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.data(self.request(Method::GET, &format!("/products/{id}")))
            .await
    }

    async fn create_product(&self, input: ProductInput) -> Result<Product, ApiError> {
        let form = multipart(input.form_fields(), input.image);

        self.data(self.request(Method::POST, "/products").multipart(form))
            .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Product, ApiError> {
        let form = multipart(input.form_fields(), input.image);

        self.data(
            self.request(Method::PUT, &format!("/products/{id}"))
                .multipart(form),
        )
        .await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/products/{id}")))
            .await
            .map(drop)
    }

    async fn toggle_product(&self, id: ProductId) -> Result<Option<String>, ApiError> {
        self.message(self.request(Method::PATCH, &format!("/products/{id}/toggle")))
            .await
    }

    async fn orders(&self, filter: OrderFilter) -> Result<Page<Order>, ApiError> {
        let envelope: Envelope<Vec<Order>> =
            self.send(self.request(Method::GET, &filter.path())).await?;
        let pagination = envelope.pagination;

        Ok(Page {
            items: envelope.into_data()?,
            pagination,
        })
    }

    async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.data(self.request(Method::GET, &format!("/orders/{id}")))
            .await
    }

    async fn create_order(&self, draft: OrderDraft) -> Result<Order, ApiError> {
        self.data(self.request(Method::POST, "/orders").json(&draft))
            .await
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let body = serde_json::json!({ "status": status });

        self.data(
            self.request(Method::PUT, &format!("/orders/{id}/status"))
                .json(&body),
        )
        .await
    }

    async fn promotions(&self, active: bool) -> Result<Vec<Promotion>, ApiError> {
        self.data(self.request(Method::GET, &format!("/promotions?active={active}")))
            .await
    }

    async fn current_promotion(&self) -> Result<Option<Promotion>, ApiError> {
        let request = self.request(Method::GET, "/promotions/active/current");

        match self.send::<Envelope<Promotion>>(request).await {
            Ok(envelope) => Ok(envelope.data),
            Err(ApiError::Rejected { status: 404, .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn create_promotion(&self, input: PromotionInput) -> Result<Promotion, ApiError> {
        let form = multipart(input.form_fields(), input.image);

        self.data(self.request(Method::POST, "/promotions").multipart(form))
            .await
    }

    async fn update_promotion(
        &self,
        id: PromotionId,
        input: PromotionInput,
    ) -> Result<Promotion, ApiError> {
        let form = multipart(input.form_fields(), input.image);

        self.data(
            self.request(Method::PUT, &format!("/promotions/{id}"))
                .multipart(form),
        )
        .await
    }

    async fn delete_promotion(&self, id: PromotionId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/promotions/{id}")))
            .await
            .map(drop)
    }

    async fn toggle_promotion(&self, id: PromotionId) -> Result<Option<String>, ApiError> {
        self.message(self.request(Method::PATCH, &format!("/promotions/{id}/toggle")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_uses_server_message() {
        let error = failure(
            StatusCode::BAD_REQUEST,
            br#"{"success":false,"message":"Nombre requerido"}"#,
        );

        assert!(
            matches!(
                &error,
                ApiError::Rejected { status: 400, message } if message == "Nombre requerido"
            ),
            "expected Rejected, got {error:?}"
        );
    }

    #[test]
    fn failure_falls_back_without_message() {
        let error = failure(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");

        assert_eq!(error.to_string(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn unauthorized_status_is_distinguished() {
        let error = failure(
            StatusCode::UNAUTHORIZED,
            "{\"message\":\"Token inválido\"}".as_bytes(),
        );

        assert!(error.is_unauthorized());
        assert_eq!(error.to_string(), "Token inválido");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() -> Result<(), ApiError> {
        let api = HttpApi::new("http://localhost:5000/api/", Duration::from_secs(1))?;

        assert_eq!(api.base_url, "http://localhost:5000/api");

        Ok(())
    }
}
