//! Catalog
//!
//! Menu records as served by the ordering API, plus the combined snapshot the
//! state container holds. Snapshots are always replaced wholesale.

use serde::{Deserialize, Serialize};

use crate::{ids::RecordId, prices::Price};

pub mod fixtures;

/// Category Id
pub type CategoryId = RecordId<Category>;

/// Product Id
pub type ProductId = RecordId<Product>;

/// Promotion Id
pub type PromotionId = RecordId<Promotion>;

fn active_by_default() -> bool {
    true
}

/// Menu category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id
    #[serde(alias = "_id")]
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the category is shown on the menu
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

/// Menu product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price
    pub price: Price,

    /// Image URL or server-relative path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Owning category
    #[serde(default, alias = "category", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    /// Whether the product is listed
    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Whether the product can currently be ordered
    #[serde(default = "active_by_default")]
    pub is_available: bool,
}

/// Promotional flyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Promotion id
    #[serde(alias = "_id")]
    pub id: PromotionId,

    /// Headline
    pub title: String,

    /// Secondary headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image URL or server-relative path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Whether the flyer is shown
    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Last day the promotion is valid (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,

    /// Call to action label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    /// Call to action target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
}

/// Snapshot of everything the menu shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Categories
    pub categories: Vec<Category>,

    /// Products
    pub products: Vec<Product>,

    /// Promotions
    pub promotions: Vec<Promotion>,
}

impl Catalog {
    /// Look up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products belonging to the given category, in catalog order.
    pub fn products_in<'a>(
        &'a self,
        category: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |product| product.category_id.as_ref() == Some(category))
    }

    /// The first active promotion, if any.
    pub fn active_promotion(&self) -> Option<&Promotion> {
        self.promotions.iter().find(|promotion| promotion.is_active)
    }

    /// An empty catalog is a valid state, e.g. when the startup load failed.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.products.is_empty() && self.promotions.is_empty()
    }
}

/// Resolve an image reference against the backend origin.
///
/// Absolute `http(s)` URLs are returned unchanged, any other value is treated
/// as a server-relative path and prefixed with `backend_origin`.
pub fn resolve_image_url(backend_origin: &str, image: Option<&str>) -> Option<String> {
    let image = image?;

    if image.starts_with("http") {
        return Some(image.to_string());
    }

    Some(format!("{backend_origin}{image}"))
}

impl Product {
    /// Copy of the product with its image resolved against `backend_origin`.
    #[must_use]
    pub fn with_resolved_image(mut self, backend_origin: &str) -> Self {
        self.image = resolve_image_url(backend_origin, self.image.as_deref());
        self
    }
}

impl Promotion {
    /// Copy of the promotion with its image resolved against `backend_origin`.
    #[must_use]
    pub fn with_resolved_image(mut self, backend_origin: &str) -> Self {
        self.image = resolve_image_url(backend_origin, self.image.as_deref());
        self
    }
}
