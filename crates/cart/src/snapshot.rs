//! Cart snapshot encoding.
//!
//! A snapshot is a JSON object with the item list and the total:
//!
//! ```json
//! {"items":[{"id":"catfish","name":"Live catfish","price":1200,"quantity":10,"unit":"kg","minOrder":10}],"total":12000}
//! ```
//!
//! There is no version field. Both fields are required. The total is written
//! for readers of the raw snapshot but is recomputed from the items when
//! decoding.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use aquafarm_core::Price;

use crate::cart::Cart;
use crate::item::LineItem;

/// Why a stored snapshot could not be turned back into a cart.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not valid JSON, or not the expected shape.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two lines share an id.
    #[error("duplicate line item '{0}'")]
    DuplicateItem(String),

    /// A line has quantity zero.
    #[error("line item '{0}' has zero quantity")]
    ZeroQuantity(String),
}

#[derive(Deserialize)]
struct StoredCart {
    items: Vec<LineItem>,
    total: Price,
}

/// Serialize a cart to snapshot text.
///
/// # Errors
///
/// Returns `SnapshotError::Malformed` if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(cart)?)
}

/// Parse snapshot text back into a cart.
///
/// # Errors
///
/// Returns a `SnapshotError` if the text is not a well-formed snapshot or
/// breaks a cart invariant (duplicate ids, zero quantities).
pub fn decode(data: &str) -> Result<Cart, SnapshotError> {
    let stored: StoredCart = serde_json::from_str(data)?;

    let mut seen = HashSet::with_capacity(stored.items.len());
    for item in &stored.items {
        if item.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(item.id.to_string()));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(SnapshotError::DuplicateItem(item.id.to_string()));
        }
    }

    let cart = Cart::from_items(stored.items);
    if stored.total != cart.total() {
        debug!(
            stored = %stored.total,
            computed = %cart.total(),
            "Snapshot total differs from items, using computed total"
        );
    }
    Ok(cart)
}
