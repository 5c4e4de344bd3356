//! CLI command implementations.
//!
//! Each command opens the store from configuration, performs one operation,
//! and writes a human-readable result to stdout. Logs go to stderr.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

use std::io::{self, Write};

use thiserror::Error;

use aquafarm_cart::{CartConfig, CartStore, Catalog, CatalogError, FileStorage};
use aquafarm_core::ProductId;

/// Errors from the CLI's own policies, on top of library errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Product is not in the catalog.
    #[error("unknown product '{0}' (see `aquafarm catalog`)")]
    UnknownProduct(ProductId),

    /// Quantity is below the product's minimum order.
    #[error("minimum order for {id} is {minimum} {unit}")]
    BelowMinimum {
        /// Product ID.
        id: ProductId,
        /// Minimum order quantity.
        minimum: u32,
        /// Pricing unit.
        unit: String,
    },

    /// Order reference is not a UUID.
    #[error("invalid order reference '{0}'")]
    InvalidReference(String),

    /// Status name is not recognized.
    #[error("{0}")]
    InvalidStatus(String),

    /// No order has the given reference.
    #[error("no order with reference {0}")]
    OrderNotFound(String),
}

/// Load the configured catalog, or the built-in one.
///
/// # Errors
///
/// Returns `CatalogError` if the catalog cannot be read or is invalid.
pub fn load_catalog(config: &CartConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    }
}

/// Open the file-backed cart store.
#[must_use]
pub fn open_store(config: &CartConfig) -> CartStore<FileStorage> {
    CartStore::open_with_key(config.file_storage(), config.cart_key.as_str())
}

/// Write `text` to stdout.
///
/// # Errors
///
/// Returns an I/O error if stdout is closed.
pub fn emit(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()
}
