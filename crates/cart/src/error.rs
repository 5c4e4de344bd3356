//! Errors surfaced by the cart store.
//!
//! Cart operations themselves cannot fail: unknown ids are no-ops and a bad
//! snapshot at startup is replaced by an empty cart. What remains is the
//! storage backend refusing a write.

use thiserror::Error;

use crate::snapshot::SnapshotError;
use crate::storage::StorageError;

/// Error returned from a cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The mutation was applied but the snapshot could not be written.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded.
    #[error("failed to encode cart: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
