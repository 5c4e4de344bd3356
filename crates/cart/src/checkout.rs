//! Checkout: turn the cart into an order.
//!
//! Checkout owns two policies the cart store leaves out:
//! validating the customer's contact details, and refusing lines below their
//! product's minimum order quantity. There is no payment step; a successful
//! checkout records a pending order and clears the cart.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use aquafarm_core::{Email, EmailError, OrderRef, OrderStatus, PhoneError, PhoneNumber, ProductId};

use crate::orders::{Order, OrderHistory, OrderHistoryError};
use crate::storage::SnapshotStorage;
use crate::store::CartStore;

/// Errors that stop a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A line is below its product's minimum order quantity.
    #[error("{id}: minimum order is {minimum}, cart has {quantity}")]
    BelowMinimum {
        /// Offending product.
        id: ProductId,
        /// Quantity in the cart.
        quantity: u32,
        /// Product minimum.
        minimum: u32,
    },

    /// A required contact field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Phone number failed validation.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// Order could not be saved.
    #[error(transparent)]
    History(#[from] OrderHistoryError),
}

/// Raw contact fields as entered on the checkout form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    /// Customer's full name.
    pub name: String,
    /// Customer's email address.
    pub email: String,
    /// Customer's phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
}

impl CheckoutForm {
    /// Validate the form into [`CustomerDetails`].
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` for a blank name or address,
    /// `InvalidEmail` or `InvalidPhone` for contact fields that do not parse.
    pub fn validate(&self) -> Result<CustomerDetails, CheckoutError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CheckoutError::MissingField("name"));
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err(CheckoutError::MissingField("address"));
        }

        Ok(CustomerDetails {
            name: name.to_owned(),
            email: Email::parse(&self.email)?,
            phone: PhoneNumber::parse(&self.phone)?,
            address: address.to_owned(),
        })
    }
}

/// Validated customer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// Phone number.
    pub phone: PhoneNumber,
    /// Delivery address.
    pub address: String,
}

/// Check out the store's cart for `customer`.
///
/// On success the order is appended to `history` (persisted through the
/// store's storage backend) and the cart is cleared. If the order cannot be
/// saved the cart is left as it was. Once the order is saved the checkout
/// has succeeded; a cart snapshot that cannot be cleared is only logged.
///
/// # Errors
///
/// Returns `CheckoutError` if the cart is empty, a line is below its minimum
/// order quantity, or the order history cannot be written.
pub fn place_order<S: SnapshotStorage>(
    store: &mut CartStore<S>,
    history: &mut OrderHistory,
    customer: CustomerDetails,
) -> Result<Order, CheckoutError> {
    let cart = store.cart();
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if let Some(line) = cart.items().iter().find(|line| !line.meets_minimum()) {
        return Err(CheckoutError::BelowMinimum {
            id: line.id.clone(),
            quantity: line.quantity,
            minimum: line.min_order,
        });
    }

    let order = Order {
        reference: OrderRef::generate(),
        customer,
        items: cart.items().to_vec(),
        total: cart.total(),
        status: OrderStatus::Pending,
        placed_at: Utc::now(),
    };

    history.record(order.clone(), store.storage_mut())?;
    if let Err(e) = store.clear() {
        warn!(reference = %order.reference, error = %e, "Order placed but cart snapshot not cleared");
    }

    info!(
        reference = %order.reference,
        items = order.items.len(),
        total = %order.total,
        "Order placed"
    );
    Ok(order)
}
