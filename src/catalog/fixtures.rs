//! Menu Fixtures
//!
//! Static menus in YAML, used to seed a catalog without a backend.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, Category, Product, Promotion};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product references a category the fixture does not define
    #[error("Product {product} references unknown category {category}")]
    UnknownCategory {
        /// Offending product id
        product: String,

        /// Missing category id
        category: String,
    },

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),
}

/// Wrapper for a menu in YAML
#[derive(Debug, Default, Deserialize)]
pub struct MenuFixture {
    /// Menu categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Menu products
    #[serde(default)]
    pub products: Vec<Product>,

    /// Promotional flyers
    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

impl TryFrom<MenuFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: MenuFixture) -> Result<Self, Self::Error> {
        for (i, product) in fixture.products.iter().enumerate() {
            if fixture
                .products
                .iter()
                .skip(i + 1)
                .any(|other| other.id == product.id)
            {
                return Err(FixtureError::DuplicateProduct(product.id.to_string()));
            }

            let Some(category) = &product.category_id else {
                continue;
            };

            if !fixture.categories.iter().any(|c| &c.id == category) {
                return Err(FixtureError::UnknownCategory {
                    product: product.id.to_string(),
                    category: category.to_string(),
                });
            }
        }

        Ok(Catalog {
            categories: fixture.categories,
            products: fixture.products,
            promotions: fixture.promotions,
        })
    }
}

/// Parse a catalog from YAML source.
///
/// # Errors
///
/// Returns a `FixtureError` if the YAML is malformed or inconsistent.
pub fn from_yaml(contents: &str) -> Result<Catalog, FixtureError> {
    let fixture: MenuFixture = serde_norway::from_str(contents)?;

    Catalog::try_from(fixture)
}

/// Load a catalog from a YAML file.
///
/// # Errors
///
/// Returns a `FixtureError` if the file cannot be read or parsed.
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let contents = fs::read_to_string(path)?;

    from_yaml(&contents)
}
