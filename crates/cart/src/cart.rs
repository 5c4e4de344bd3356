//! Cart state and its transition function.
//!
//! [`reduce`] is the only way a [`Cart`] changes. It takes the prior cart by
//! value and returns the next one, so it can be exercised without any storage
//! or front end attached. The total is recomputed from the items at the end
//! of every transition.

use serde::Serialize;

use aquafarm_core::{Price, ProductId};

use crate::item::LineItem;

/// The line items of the current session plus their derived total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
    total: Price,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            total: Price::ZERO,
        }
    }

    /// Build a cart from items, computing the total.
    ///
    /// The caller is responsible for ids being unique and quantities being at
    /// least 1; the snapshot reader checks both before calling this.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self {
            items,
            total: Price::ZERO,
        };
        cart.recalculate();
        cart
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    fn recalculate(&mut self) {
        self.total = self.items.iter().map(LineItem::line_total).sum();
    }
}

/// A cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Merge into the line with the same id, or append a new line.
    AddItem(LineItem),
    /// Drop the line with this id.
    RemoveItem(ProductId),
    /// Replace a line's quantity. Zero removes the line.
    UpdateQuantity {
        /// Line to change.
        id: ProductId,
        /// New quantity.
        quantity: u32,
    },
    /// Drop every line.
    Clear,
}

impl CartAction {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem(_) => "remove_item",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::Clear => "clear",
        }
    }
}

/// Apply `action` to `cart` and return the resulting cart.
///
/// Unknown ids are ignored. Adding a zero quantity of a product that is not
/// in the cart leaves the cart unchanged, so every line keeps a quantity of
/// at least 1. The minimum order quantity is never consulted here.
#[must_use]
pub fn reduce(mut cart: Cart, action: CartAction) -> Cart {
    match action {
        CartAction::AddItem(item) => {
            if let Some(existing) = cart.get_mut(&item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else if item.quantity > 0 {
                cart.items.push(item);
            }
        }
        CartAction::RemoveItem(id) => {
            cart.items.retain(|item| item.id != id);
        }
        CartAction::UpdateQuantity { id, quantity } => {
            if quantity == 0 {
                cart.items.retain(|item| item.id != id);
            } else if let Some(existing) = cart.get_mut(&id) {
                existing.quantity = quantity;
            }
        }
        CartAction::Clear => {
            cart.items.clear();
        }
    }
    cart.recalculate();
    cart
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::item::tests::item;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_add_appends_new_item() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Price::new(12_000));
    }

    #[test]
    fn test_add_merges_quantity_only() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let mut again = item("a", 9999, 3);
        again.name = "Renamed".to_string();
        let cart = reduce(cart, CartAction::AddItem(again));

        assert_eq!(cart.item_count(), 1);
        let line = cart.get(&id("a")).unwrap();
        assert_eq!(line.quantity, 13);
        assert_eq!(line.price, Price::new(1200));
        assert_eq!(line.name, "Product a");
        assert_eq!(cart.total(), Price::new(15_600));
    }

    #[test]
    fn test_add_zero_quantity_new_item_is_ignored() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let cart = [item("c", 1, 1), item("a", 1, 1), item("b", 1, 1)]
            .into_iter()
            .fold(Cart::new(), |cart, line| reduce(cart, CartAction::AddItem(line)));
        let ids: Vec<&str> = cart.items().iter().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let after = reduce(cart.clone(), CartAction::RemoveItem(id("zzz")));
        assert_eq!(after, cart);
    }

    #[test]
    fn test_update_replaces_quantity() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let cart = reduce(
            cart,
            CartAction::UpdateQuantity {
                id: id("a"),
                quantity: 4,
            },
        );
        assert_eq!(cart.get(&id("a")).unwrap().quantity, 4);
        assert_eq!(cart.total(), Price::new(4800));
    }

    #[test]
    fn test_update_ignores_minimum_order() {
        let mut line = item("fingerlings", 50, 100);
        line.min_order = 100;
        let cart = reduce(Cart::new(), CartAction::AddItem(line));
        let cart = reduce(
            cart,
            CartAction::UpdateQuantity {
                id: id("fingerlings"),
                quantity: 3,
            },
        );
        assert_eq!(cart.get(&id("fingerlings")).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let cart = reduce(
            cart,
            CartAction::UpdateQuantity {
                id: id("a"),
                quantity: 0,
            },
        );
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let after = reduce(
            cart.clone(),
            CartAction::UpdateQuantity {
                id: id("b"),
                quantity: 7,
            },
        );
        assert_eq!(after, cart);
    }

    #[test]
    fn test_clear() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let cart = reduce(cart, CartAction::Clear);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_total_quantity() {
        let cart = reduce(Cart::new(), CartAction::AddItem(item("a", 1200, 10)));
        let cart = reduce(cart, CartAction::AddItem(item("b", 2500, 5)));
        assert_eq!(cart.total_quantity(), 15);
    }

    #[test]
    fn test_from_items_computes_total() {
        let cart = Cart::from_items(vec![item("a", 1200, 20), item("b", 2500, 5)]);
        assert_eq!(cart.total(), Price::new(36_500));
    }
}
