//! `aquafarm orders` subcommands for the admin order list.

use std::fmt::Write as _;

use aquafarm_cart::{CartConfig, Order, OrderHistory};
use aquafarm_core::{OrderRef, OrderStatus};

use super::{CommandError, emit};

/// Print every placed order, newest first.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn list(config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.file_storage();
    let history = OrderHistory::load_with_key(&storage, config.orders_key.as_str());
    emit(&render(history.orders()))?;
    Ok(())
}

/// Change an order's status.
///
/// # Errors
///
/// Returns an error if the reference or status cannot be parsed, the order
/// does not exist, or the history cannot be saved.
pub fn set_status(
    config: &CartConfig,
    reference: &str,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let order_ref: OrderRef = reference
        .parse()
        .map_err(|_| CommandError::InvalidReference(reference.to_string()))?;
    let status: OrderStatus = status.parse().map_err(CommandError::InvalidStatus)?;

    let mut storage = config.file_storage();
    let mut history = OrderHistory::load_with_key(&storage, config.orders_key.as_str());
    if !history.set_status(&order_ref, status, &mut storage)? {
        return Err(CommandError::OrderNotFound(reference.to_string()).into());
    }

    emit(&format!("Order {} is now {status}\n", order_ref.short()))?;
    Ok(())
}

/// Text listing of orders, newest first.
#[must_use]
pub fn render(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.\n".to_string();
    }

    let mut out = String::new();
    for order in orders.iter().rev() {
        let _ = writeln!(
            out,
            "{}  {}  {:<10} {:>12}  {} <{}>",
            order.reference.short(),
            order.placed_at.format("%Y-%m-%d %H:%M"),
            order.status.to_string(),
            order.total.to_string(),
            order.customer.name,
            order.customer.email,
        );
    }
    out
}
