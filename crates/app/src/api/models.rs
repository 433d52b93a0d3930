//! Request and response models for the ordering API.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::Path,
};

use mesa::{catalog::CategoryId, orders::OrderStatus, prices::Price, state::Admin};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::api::ApiError;

/// Standard response envelope: `{ data, message, pagination }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Payload
    pub data: Option<T>,

    /// Human readable status message
    #[serde(default)]
    pub message: Option<String>,

    /// Paging details for list endpoints
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Take the payload out of the envelope.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingData` if the server sent no `data`.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }
}

/// Paging details reported by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, starting at 1
    pub page: u32,

    /// Page size
    pub limit: u32,

    /// Total number of records
    pub total: u64,

    /// Number of pages
    #[serde(alias = "totalPages")]
    pub pages: u32,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,

    /// Paging details, when the server sent them
    pub pagination: Option<Pagination>,
}

/// `POST /auth/login` response.
#[derive(Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: Zeroizing<String>,

    /// The signed in admin
    pub admin: Admin,
}

impl Debug for LoginResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LoginResponse")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

/// `GET /auth/me` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionResponse {
    pub(crate) admin: Admin,
}

/// Image file attached to a product or promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the upload
    pub file_name: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Image` if the file cannot be read.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let file_name = path.file_name().map_or_else(
            || "image".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        Ok(Self { file_name, bytes })
    }
}

/// Category create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    /// Display name
    pub name: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the category is shown on the menu
    pub is_active: bool,
}

/// Product create/update payload, sent as a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    /// Display name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Unit price
    pub price: Price,

    /// Owning category
    pub category_id: CategoryId,

    /// Whether the product is listed
    pub is_active: bool,

    /// Whether the product can be ordered
    pub is_available: bool,

    /// New image, if one should be uploaded
    pub image: Option<ImageUpload>,
}

impl ProductInput {
    /// Text fields of the multipart form.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("price", self.price.to_string()),
            ("categoryId", self.category_id.to_string()),
            ("isActive", self.is_active.to_string()),
            ("isAvailable", self.is_available.to_string()),
        ];

        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }

        fields
    }
}

/// Promotion create/update payload, sent as a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromotionInput {
    /// Headline
    pub title: String,

    /// Secondary headline
    pub subtitle: Option<String>,

    /// Body text
    pub description: Option<String>,

    /// Last valid day (`YYYY-MM-DD`)
    pub valid_until: Option<String>,

    /// Call to action label
    pub button_text: Option<String>,

    /// Call to action target
    pub button_link: Option<String>,

    /// Whether the flyer is shown
    pub is_active: bool,

    /// New image, if one should be uploaded
    pub image: Option<ImageUpload>,
}

impl PromotionInput {
    /// Text fields of the multipart form.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("subtitle", &self.subtitle),
            ("description", &self.description),
            ("validUntil", &self.valid_until),
            ("buttonText", &self.button_text),
            ("buttonLink", &self.button_link),
        ];

        let mut fields = vec![
            ("title", self.title.clone()),
            ("isActive", self.is_active.to_string()),
        ];

        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.clone().map(|value| (name, value))),
        );

        fields
    }
}

/// Product list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to one category
    pub category: Option<CategoryId>,

    /// Only listed products
    pub active: bool,

    /// Only orderable products
    pub available: bool,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            active: true,
            available: true,
        }
    }
}

impl ProductFilter {
    /// Request path and query string for this filter.
    pub fn path(&self) -> String {
        let query = format!("active={}&available={}", self.active, self.available);

        match &self.category {
            Some(category) => format!("/products/category/{category}?{query}"),
            None => format!("/products?{query}"),
        }
    }
}

/// Order list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    /// Restrict to one status
    pub status: Option<OrderStatus>,

    /// Page size
    pub limit: u32,

    /// Page number, starting at 1
    pub page: u32,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: 50,
            page: 1,
        }
    }
}

impl OrderFilter {
    /// Request path and query string for this filter.
    pub fn path(&self) -> String {
        let mut path = format!("/orders?limit={}&page={}", self.limit, self.page);

        if let Some(status) = &self.status {
            path.push_str("&status=");
            path.push_str(status.as_str());
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_filter_builds_category_path() {
        let filter = ProductFilter {
            category: Some(CategoryId::from(3)),
            ..ProductFilter::default()
        };

        assert_eq!(
            filter.path(),
            "/products/category/3?active=true&available=true"
        );
        assert_eq!(
            ProductFilter::default().path(),
            "/products?active=true&available=true"
        );
    }

    #[test]
    fn order_filter_appends_status_only_when_set() {
        assert_eq!(OrderFilter::default().path(), "/orders?limit=50&page=1");

        let filter = OrderFilter {
            status: Some(OrderStatus::Ready),
            limit: 10,
            page: 2,
        };

        assert_eq!(filter.path(), "/orders?limit=10&page=2&status=ready");
    }

    #[test]
    fn envelope_without_data_is_an_error() -> TestResult {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(r#"{"message":"ok"}"#)?;

        assert!(matches!(envelope.into_data(), Err(ApiError::MissingData)));

        Ok(())
    }

    #[test]
    fn envelope_payload_need_not_have_a_default() -> TestResult {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Reply {
            id: u32,
        }

        let empty: Envelope<Reply> = serde_json::from_str(r#"{"message":"Not found"}"#)?;

        assert!(matches!(empty.into_data(), Err(ApiError::MissingData)));

        let full: Envelope<Reply> = serde_json::from_str(r#"{"data":{"id":4}}"#)?;

        assert_eq!(full.into_data()?, Reply { id: 4 });

        Ok(())
    }

    #[test]
    fn envelope_reads_pagination() -> TestResult {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{"data":[1,2],"pagination":{"page":2,"limit":2,"total":7,"totalPages":4}}"#,
        )?;

        assert_eq!(
            envelope.pagination,
            Some(Pagination {
                page: 2,
                limit: 2,
                total: 7,
                pages: 4,
            })
        );
        assert_eq!(envelope.into_data()?, vec![1, 2]);

        Ok(())
    }

    #[test]
    fn product_form_skips_missing_description() {
        let input = ProductInput {
            name: "Clásica".to_string(),
            description: None,
            price: Price::from(1200),
            category_id: CategoryId::from("burgers"),
            is_active: true,
            is_available: false,
            image: None,
        };

        assert_eq!(
            input.form_fields(),
            vec![
                ("name", "Clásica".to_string()),
                ("price", "1200".to_string()),
                ("categoryId", "burgers".to_string()),
                ("isActive", "true".to_string()),
                ("isAvailable", "false".to_string()),
            ]
        );
    }

    #[test]
    fn promotion_form_includes_only_set_fields() {
        let input = PromotionInput {
            title: "2x1".to_string(),
            valid_until: Some("2026-12-31".to_string()),
            is_active: true,
            ..PromotionInput::default()
        };

        assert_eq!(
            input.form_fields(),
            vec![
                ("title", "2x1".to_string()),
                ("isActive", "true".to_string()),
                ("validUntil", "2026-12-31".to_string()),
            ]
        );
    }
}
