//! The cart store: current cart plus the storage it is persisted to.
//!
//! A [`CartStore`] is constructed once per session and handed to whatever
//! needs the cart (page handlers, checkout, the CLI). Every mutation runs the
//! pure [`reduce`](crate::cart::reduce) function and then writes the full
//! snapshot back to storage.

use tracing::{debug, info, instrument, warn};

use aquafarm_core::{Price, ProductId};

use crate::cart::{Cart, CartAction, reduce};
use crate::error::Result;
use crate::item::LineItem;
use crate::snapshot;
use crate::storage::SnapshotStorage;

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "aquafarm-cart";

/// Owns the session's cart and keeps its snapshot up to date.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: SnapshotStorage> CartStore<S> {
    /// Open the store under [`DEFAULT_CART_KEY`], rehydrating any saved cart.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_CART_KEY)
    }

    /// Open the store under `key`, rehydrating any saved cart.
    ///
    /// A missing snapshot starts an empty cart. An unreadable or corrupt
    /// snapshot is logged and also starts an empty cart; it is never reported
    /// to the caller.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match storage.read(&key) {
            Ok(Some(data)) => match snapshot::decode(&data) {
                Ok(cart) => {
                    info!(
                        key = %key,
                        items = cart.item_count(),
                        total = %cart.total(),
                        "Cart rehydrated"
                    );
                    cart
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unreadable cart snapshot");
                    Cart::new()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No saved cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cart storage unreadable, starting empty");
                Cart::new()
            }
        };

        Self { cart, storage, key }
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current line items.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    /// Current total.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.cart.total()
    }

    /// Storage key the snapshot is written under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add `item`, merging its quantity into an existing line with the same id.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot cannot be written. The in-memory
    /// cart keeps the change either way.
    pub fn add_item(&mut self, item: LineItem) -> Result<Price> {
        self.dispatch(CartAction::AddItem(item))
    }

    /// Remove the line with `id`. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot cannot be written.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<Price> {
        self.dispatch(CartAction::RemoveItem(id.clone()))
    }

    /// Set the quantity of the line with `id`. Zero removes the line.
    ///
    /// The product's minimum order quantity is not applied here; callers that
    /// want a floor must clamp before calling.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot cannot be written.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<Price> {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        })
    }

    /// Empty the cart and delete its snapshot.
    ///
    /// If the backend refuses the delete, an empty snapshot is written in its
    /// place so the old cart is not rehydrated next session.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot can be neither deleted nor
    /// overwritten.
    pub fn clear(&mut self) -> Result<Price> {
        self.dispatch(CartAction::Clear)
    }

    /// Apply any cart action and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot cannot be written.
    #[instrument(skip(self, action), fields(action = action.name(), key = %self.key))]
    pub fn dispatch(&mut self, action: CartAction) -> Result<Price> {
        let clearing = matches!(action, CartAction::Clear);
        let cart = std::mem::take(&mut self.cart);
        self.cart = reduce(cart, action);

        debug!(
            items = self.cart.item_count(),
            total = %self.cart.total(),
            "Cart updated"
        );

        self.persist(clearing)?;
        Ok(self.cart.total())
    }

    fn persist(&mut self, clearing: bool) -> Result<()> {
        let outcome = if clearing {
            info!(key = %self.key, "Cart cleared");
            match self.storage.delete(&self.key) {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Snapshot delete failed, writing empty cart");
                    self.write_snapshot()
                }
            }
        } else {
            self.write_snapshot()
        };

        if let Err(e) = &outcome {
            warn!(key = %self.key, error = %e, "Cart snapshot not persisted");
        }
        outcome
    }

    fn write_snapshot(&mut self) -> Result<()> {
        let data = snapshot::encode(&self.cart)?;
        self.storage.write(&self.key, &data)?;
        Ok(())
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the storage backend, e.g. to share it with order history.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Drop the in-memory cart and hand back the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
