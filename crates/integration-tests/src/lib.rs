//! Integration tests for Aquafarm.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aquafarm-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenario` - End-to-end cart walkthrough against memory storage
//! - `cart_persistence` - Rehydration across store instances with file storage
//! - `cart_laws` - Property tests for the cart operations
//! - `checkout_flow` - Catalog to cart to order history
//!
//! This library holds the fixtures the test files share.

use aquafarm_cart::LineItem;
use aquafarm_core::{Price, ProductId};

/// A line item priced per kilogram with a minimum order of 1.
#[must_use]
pub fn line(id: &str, price: u64, quantity: u32) -> LineItem {
    LineItem {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Price::new(price),
        quantity,
        unit: "kg".to_string(),
        min_order: 1,
        image: None,
    }
}

/// Expected total of `lines`, computed independently of the cart.
#[must_use]
pub fn expected_total(lines: &[LineItem]) -> u64 {
    lines
        .iter()
        .map(|l| l.price.naira() * u64::from(l.quantity))
        .sum()
}
