//! Cart line items.

use serde::{Deserialize, Serialize};

use aquafarm_core::{Price, ProductId};

/// One product selection in the cart.
///
/// Identity is the `id` alone; two items with the same id are the same line
/// regardless of name or price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in whole Naira.
    pub price: Price,
    /// Number of units. At least 1 while the item is in a cart.
    pub quantity: u32,
    /// Pricing unit label, e.g. `kg` or `piece`.
    pub unit: String,
    /// Smallest quantity the farm sells. Checked at checkout, not by the cart.
    pub min_order: u32,
    /// Optional product image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Price of this line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Whether the quantity reaches the product's minimum order.
    #[must_use]
    pub const fn meets_minimum(&self) -> bool {
        self.quantity >= self.min_order
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Build a line item with sensible defaults for tests.
    pub fn item(id: &str, price: u64, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::new(price),
            quantity,
            unit: "kg".to_string(),
            min_order: 1,
            image: None,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item("a", 1200, 10).line_total(), Price::new(12_000));
    }

    #[test]
    fn test_meets_minimum() {
        let mut line = item("fingerlings", 50, 99);
        line.min_order = 100;
        assert!(!line.meets_minimum());
        line.quantity = 100;
        assert!(line.meets_minimum());
    }

    #[test]
    fn test_json_field_names() {
        let mut line = item("a", 1200, 10);
        line.image = Some("/static/img/catfish.jpg".to_string());
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["minOrder"], 1);
        assert_eq!(value["image"], "/static/img/catfish.jpg");
        assert_eq!(value["price"], 1200);
    }

    #[test]
    fn test_image_is_optional_on_read() {
        let line: LineItem = serde_json::from_str(
            r#"{"id":"b","name":"Smoked catfish","price":2500,"quantity":5,"unit":"kg","minOrder":2}"#,
        )
        .unwrap();
        assert_eq!(line.image, None);
        assert_eq!(line.min_order, 2);
    }
}
