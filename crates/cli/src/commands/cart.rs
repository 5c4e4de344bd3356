//! `aquafarm cart` subcommands.
//!
//! The cart store accepts any quantity. This front end applies the
//! storefront's minimum-order rule before dispatching, the same way the
//! product page's quantity picker does.

use std::fmt::Write as _;

use tracing::info;

use aquafarm_cart::{Cart, CartConfig};
use aquafarm_core::ProductId;

use super::{CommandError, emit, load_catalog, open_store};

/// Print the cart.
///
/// # Errors
///
/// Returns an error if stdout cannot be written or JSON encoding fails.
pub fn show(config: &CartConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config);
    if json {
        emit(&format!("{}\n", serde_json::to_string_pretty(store.cart())?))?;
    } else {
        emit(&render(store.cart()))?;
    }
    Ok(())
}

/// Add a catalog product to the cart.
///
/// The minimum order applies to the line after merging with whatever is
/// already in the cart.
///
/// # Errors
///
/// Returns an error if the product is unknown, the resulting line is below
/// its minimum order, or the cart cannot be saved.
pub fn add(
    config: &CartConfig,
    product: &str,
    quantity: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(config)?;
    let id = ProductId::new(product);
    let product = catalog
        .get(&id)
        .ok_or_else(|| CommandError::UnknownProduct(id.clone()))?;

    let mut store = open_store(config);
    let quantity = quantity.unwrap_or(product.min_order);
    let in_cart = store.cart().get(&id).map_or(0, |line| line.quantity);
    if in_cart.saturating_add(quantity) < product.min_order {
        return Err(CommandError::BelowMinimum {
            id,
            minimum: product.min_order,
            unit: product.unit.clone(),
        }
        .into());
    }

    let total = store.add_item(product.line_item(quantity))?;
    info!(product = %product.id, quantity, total = %total, "Added to cart");
    emit(&render(store.cart()))?;
    Ok(())
}

/// Set a cart line's quantity. Zero removes the line.
///
/// # Errors
///
/// Returns an error if the quantity is between zero and the line's minimum
/// order, or the cart cannot be saved.
pub fn update(
    config: &CartConfig,
    product: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config);
    let id = ProductId::new(product);

    if let Some(line) = store.cart().get(&id)
        && quantity > 0
        && quantity < line.min_order
    {
        return Err(CommandError::BelowMinimum {
            id,
            minimum: line.min_order,
            unit: line.unit.clone(),
        }
        .into());
    }

    let total = store.update_quantity(&id, quantity)?;
    info!(product = %id, quantity, total = %total, "Cart quantity updated");
    emit(&render(store.cart()))?;
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(config: &CartConfig, product: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config);
    let id = ProductId::new(product);
    let total = store.remove_item(&id)?;
    info!(product = %id, total = %total, "Removed from cart");
    emit(&render(store.cart()))?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be deleted.
pub fn clear(config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config);
    store.clear()?;
    emit(&render(store.cart()))?;
    Ok(())
}

/// Text listing of a cart.
#[must_use]
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(
            out,
            "{:<24} {:>6} {:<6} x {:>10} = {:>12}",
            line.id.as_str(),
            line.quantity,
            line.unit,
            line.price.to_string(),
            line.line_total().to_string(),
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), total {}",
        cart.item_count(),
        cart.total()
    );
    out
}
