//! `aquafarm checkout`.

use tracing::info;

use aquafarm_cart::{CartConfig, CheckoutForm, OrderHistory, place_order};

use super::{emit, open_store};

/// Validate the form, place the order, and print its reference.
///
/// # Errors
///
/// Returns an error if the form is invalid, the cart cannot be checked out,
/// or storage fails.
pub fn run(config: &CartConfig, form: &CheckoutForm) -> Result<(), Box<dyn std::error::Error>> {
    let customer = form.validate()?;

    let mut store = open_store(config);
    let mut history = OrderHistory::load_with_key(store.storage(), config.orders_key.as_str());
    let order = place_order(&mut store, &mut history, customer)?;

    info!(reference = %order.reference, "Checkout complete");
    emit(&format!(
        "Order {} placed ({})\nTotal: {}\nWe will call {} to arrange delivery.\n",
        order.reference.short(),
        order.reference,
        order.total,
        order.customer.phone,
    ))?;
    Ok(())
}
