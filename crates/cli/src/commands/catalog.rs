//! `aquafarm catalog`.

use std::fmt::Write as _;

use aquafarm_cart::{CartConfig, Catalog};

use super::{emit, load_catalog};

/// Print every product with its price and minimum order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or stdout is closed.
pub fn list(config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(config)?;
    emit(&render(&catalog))?;
    Ok(())
}

/// Text listing of a catalog.
#[must_use]
pub fn render(catalog: &Catalog) -> String {
    let mut out = String::new();
    for product in catalog.products() {
        let _ = writeln!(
            out,
            "{:<24} {:<40} {:>10}/{:<6} min {}",
            product.id.as_str(),
            product.name,
            product.price.to_string(),
            product.unit,
            product.min_order,
        );
    }
    out
}
