//! Placed orders and the local order history.
//!
//! The history is a JSON array of [`Order`] records kept under its own
//! storage key, next to (but independent of) the cart snapshot. The admin
//! order list reads it and moves orders through their statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use aquafarm_core::{OrderRef, OrderStatus, Price};

use crate::checkout::CustomerDetails;
use crate::item::LineItem;
use crate::storage::{SnapshotStorage, StorageError};

/// Storage key used when none is configured.
pub const DEFAULT_ORDERS_KEY: &str = "aquafarm-orders";

/// Errors saving the order history.
#[derive(Debug, Error)]
pub enum OrderHistoryError {
    /// Storage backend failed.
    #[error("order history storage error: {0}")]
    Storage(#[from] StorageError),

    /// History could not be encoded.
    #[error("failed to encode order history: {0}")]
    Encode(#[from] serde_json::Error),

    /// Delivered and cancelled orders keep their status.
    #[error("order {reference} is already {status}")]
    Finalized {
        /// Order that was asked to change.
        reference: OrderRef,
        /// Its final status.
        status: OrderStatus,
    },
}

/// A checked-out cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order reference given to the customer.
    pub reference: OrderRef,
    /// Who placed the order.
    pub customer: CustomerDetails,
    /// Lines as they were in the cart.
    pub items: Vec<LineItem>,
    /// Cart total at checkout.
    pub total: Price,
    /// Delivery status.
    pub status: OrderStatus,
    /// When checkout completed.
    pub placed_at: DateTime<Utc>,
}

/// Orders placed from this storage, oldest first.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    orders: Vec<Order>,
    key: String,
}

impl OrderHistory {
    /// Load the history under [`DEFAULT_ORDERS_KEY`].
    pub fn load(storage: &impl SnapshotStorage) -> Self {
        Self::load_with_key(storage, DEFAULT_ORDERS_KEY)
    }

    /// Load the history under `key`. A missing or unreadable history is empty.
    pub fn load_with_key(storage: &impl SnapshotStorage, key: impl Into<String>) -> Self {
        let key = key.into();
        let orders = match storage.read(&key) {
            Ok(Some(data)) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Discarding unreadable order history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Order history unreadable, starting empty");
                Vec::new()
            }
        };
        Self { orders, key }
    }

    /// All orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Find an order by reference.
    #[must_use]
    pub fn find(&self, reference: &OrderRef) -> Option<&Order> {
        self.orders.iter().find(|order| &order.reference == reference)
    }

    /// Append `order` and persist the history.
    ///
    /// The in-memory history only changes if the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns `OrderHistoryError` if the history cannot be written.
    pub fn record(
        &mut self,
        order: Order,
        storage: &mut impl SnapshotStorage,
    ) -> Result<(), OrderHistoryError> {
        self.orders.push(order);
        if let Err(e) = self.save(storage) {
            self.orders.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Change the status of the order with `reference` and persist.
    ///
    /// Returns `false` if no such order exists. The in-memory status only
    /// changes if the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns `OrderHistoryError::Finalized` if the order is delivered or
    /// cancelled and `status` differs, or another `OrderHistoryError` if the
    /// history cannot be written.
    pub fn set_status(
        &mut self,
        reference: &OrderRef,
        status: OrderStatus,
        storage: &mut impl SnapshotStorage,
    ) -> Result<bool, OrderHistoryError> {
        let Some(order) = self
            .orders
            .iter_mut()
            .find(|order| &order.reference == reference)
        else {
            return Ok(false);
        };

        let previous = order.status;
        if previous == status {
            return Ok(true);
        }
        if previous.is_final() {
            return Err(OrderHistoryError::Finalized {
                reference: *reference,
                status: previous,
            });
        }

        order.status = status;
        if let Err(e) = self.save(storage) {
            if let Some(order) = self
                .orders
                .iter_mut()
                .find(|order| &order.reference == reference)
            {
                order.status = previous;
            }
            return Err(e);
        }
        info!(reference = %reference, from = %previous, to = %status, "Order status changed");
        Ok(true)
    }

    fn save(&self, storage: &mut impl SnapshotStorage) -> Result<(), OrderHistoryError> {
        let data = serde_json::to_string(&self.orders)?;
        storage.write(&self.key, &data)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::checkout::tests::customer;
    use crate::item::tests::item;
    use crate::storage::{FlakyStorage, MemoryStorage};

    fn order(total: u64) -> Order {
        Order {
            reference: OrderRef::generate(),
            customer: customer(),
            items: vec![item("a", total, 1)],
            total: Price::new(total),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn test_load_empty() {
        let history = OrderHistory::load(&MemoryStorage::new());
        assert!(history.orders().is_empty());
    }

    #[test]
    fn test_record_persists() {
        let mut storage = MemoryStorage::new();
        let mut history = OrderHistory::load(&storage);
        let placed = order(12_000);
        history.record(placed.clone(), &mut storage).unwrap();

        let reloaded = OrderHistory::load(&storage);
        assert_eq!(reloaded.orders(), [placed]);
    }

    #[test]
    fn test_set_status() {
        let mut storage = MemoryStorage::new();
        let mut history = OrderHistory::load(&storage);
        let placed = order(500);
        history.record(placed.clone(), &mut storage).unwrap();

        assert!(
            history
                .set_status(&placed.reference, OrderStatus::Delivered, &mut storage)
                .unwrap()
        );
        let reloaded = OrderHistory::load(&storage);
        assert_eq!(
            reloaded.find(&placed.reference).unwrap().status,
            OrderStatus::Delivered
        );
    }

    #[test]
    fn test_set_status_unknown_reference() {
        let mut storage = MemoryStorage::new();
        let mut history = OrderHistory::load(&storage);
        assert!(
            !history
                .set_status(&OrderRef::generate(), OrderStatus::Cancelled, &mut storage)
                .unwrap()
        );
    }

    #[test]
    fn test_corrupt_history_is_empty() {
        let storage = MemoryStorage::with_entry(DEFAULT_ORDERS_KEY, "[{\"broken\":");
        assert!(OrderHistory::load(&storage).orders().is_empty());
    }

    #[test]
    fn test_independent_of_cart_key() {
        let mut storage = MemoryStorage::new();
        let mut history = OrderHistory::load(&storage);
        history.record(order(1), &mut storage).unwrap();
        assert!(storage.get(crate::store::DEFAULT_CART_KEY).is_none());
        assert!(storage.get(DEFAULT_ORDERS_KEY).is_some());
    }

    #[test]
    fn test_failed_status_save_keeps_previous_status() {
        let mut storage = FlakyStorage::default();
        let mut history = OrderHistory::load(&storage);
        let placed = order(500);
        history.record(placed.clone(), &mut storage).unwrap();

        storage.read_only_key = Some(DEFAULT_ORDERS_KEY.to_string());
        assert!(
            history
                .set_status(&placed.reference, OrderStatus::Delivered, &mut storage)
                .is_err()
        );
        assert_eq!(
            history.find(&placed.reference).unwrap().status,
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_final_status_cannot_change() {
        let mut storage = MemoryStorage::new();
        let mut history = OrderHistory::load(&storage);
        let placed = order(500);
        history.record(placed.clone(), &mut storage).unwrap();
        history
            .set_status(&placed.reference, OrderStatus::Delivered, &mut storage)
            .unwrap();

        let err = history
            .set_status(&placed.reference, OrderStatus::Pending, &mut storage)
            .unwrap_err();
        assert!(matches!(
            err,
            OrderHistoryError::Finalized {
                status: OrderStatus::Delivered,
                ..
            }
        ));
        // Re-applying the same final status is a no-op.
        assert!(
            history
                .set_status(&placed.reference, OrderStatus::Delivered, &mut storage)
                .unwrap()
        );
        let reloaded = OrderHistory::load(&storage);
        assert_eq!(
            reloaded.find(&placed.reference).unwrap().status,
            OrderStatus::Delivered
        );
    }
}
