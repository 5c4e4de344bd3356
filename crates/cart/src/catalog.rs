//! Product catalog.
//!
//! The storefront's products are fixed content. A built-in catalog ships with
//! the crate as YAML; a different one can be loaded from a file with the same
//! layout:
//!
//! ```yaml
//! - id: live-catfish
//!   name: Live catfish (table size)
//!   description: Fresh Clarias catfish.
//!   price: 1200
//!   unit: kg
//!   min_order: 10
//!   image: /static/img/live-catfish.jpg
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use aquafarm_core::{Price, ProductId};

use crate::item::LineItem;

const BUILTIN_CATALOG: &str = include_str!("../catalog.yaml");

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Catalog file path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not valid YAML of the expected shape.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Catalog content breaks a rule.
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// A product the farm sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (also the cart line id).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description for the product page.
    #[serde(default)]
    pub description: String,
    /// Unit price in whole Naira.
    pub price: Price,
    /// Pricing unit label.
    pub unit: String,
    /// Smallest quantity sold.
    pub min_order: u32,
    /// Product image path or URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Build a cart line for `quantity` units of this product.
    #[must_use]
    pub fn line_item(&self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity,
            unit: self.unit.clone(),
            min_order: self.min_order,
            image: self.image.clone(),
        }
    }
}

/// Ordered list of products, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The catalog that ships with the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded YAML is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, parsed, or validated.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&content)?;
        info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the text cannot be parsed or validated.
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_yaml::from_str(content)?;
        Self::new(products)
    }

    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` if an id is empty or repeated, or a
    /// minimum order is zero.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if product.id.as_str().trim().is_empty() {
                return Err(CatalogError::Invalid("product with empty id".to_string()));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
            if product.min_order == 0 {
                return Err(CatalogError::Invalid(format!(
                    "product '{}' has a minimum order of 0",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        let catfish = catalog.get(&ProductId::new("live-catfish")).unwrap();
        assert_eq!(catfish.unit, "kg");
        assert_eq!(catfish.min_order, 10);
    }

    #[test]
    fn test_image_and_description_optional() {
        let catalog = Catalog::from_yaml(
            "- id: eggs\n  name: Catfish eggs\n  price: 5\n  unit: piece\n  min_order: 1000\n",
        )
        .unwrap();
        let eggs = &catalog.products()[0];
        assert_eq!(eggs.image, None);
        assert_eq!(eggs.description, "");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = "- {id: a, name: A, price: 1, unit: kg, min_order: 1}\n- {id: a, name: B, price: 2, unit: kg, min_order: 1}\n";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_zero_minimum_rejected() {
        let yaml = "- {id: a, name: A, price: 1, unit: kg, min_order: 0}\n";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let yaml = "- {id: a, name: A, price: -1, unit: kg, min_order: 1}\n";
        assert!(matches!(Catalog::from_yaml(yaml), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_line_item_copies_product_fields() {
        let catalog = Catalog::builtin().unwrap();
        let product = catalog.get(&ProductId::new("smoked-catfish")).unwrap();
        let line = product.line_item(7);
        assert_eq!(line.id, product.id);
        assert_eq!(line.quantity, 7);
        assert_eq!(line.price, product.price);
        assert_eq!(line.min_order, product.min_order);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::from_path(&dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(
            &path,
            "- {id: tilapia, name: Tilapia, price: 1800, unit: kg, min_order: 5}\n",
        )
        .unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
