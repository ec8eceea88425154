//! Cart line type.

use crate::cart::CartItem;
use crate::customization::Customization;
use crate::ids::{LineItemId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One row in the cart: a product configured a specific way, with an
/// aggregated quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Store-issued identifier, unique per line.
    pub id: LineItemId,
    /// Product name.
    pub name: String,
    /// Selected options.
    pub customization: Customization,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Unit price (not the line total).
    pub unit_price: Money,
    /// Pass-through display fields, never interpreted by the store.
    pub product_id: Option<ProductId>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub display_key: Option<String>,
}

impl CartLine {
    pub(crate) fn from_item(item: CartItem) -> Self {
        Self {
            id: LineItemId::generate(),
            name: item.name,
            customization: item.customization,
            quantity: item.quantity,
            unit_price: item.unit_price,
            product_id: item.product_id,
            size: item.size,
            image: item.image,
            display_key: item.display_key,
        }
    }

    /// The cart identity rule: equal names, the same selected size and
    /// structurally equal customizations.
    pub fn is_same_configuration(
        &self,
        name: &str,
        size: Option<&str>,
        customization: &Customization,
    ) -> bool {
        self.name == name
            && self.size.as_deref() == size
            && self.customization.matches(customization)
    }

    /// `unit_price * quantity`, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_identity_rule() {
        let item = CartItem::new("Navy Suit", Money::new(29900, Currency::USD))
            .with_customization(Customization::new().with("lapel", "peak").with("vents", 2));
        let line = CartLine::from_item(item);

        let reordered = Customization::new().with("vents", 2).with("lapel", "peak");
        assert!(line.is_same_configuration("Navy Suit", None, &reordered));
        assert!(!line.is_same_configuration("Charcoal Suit", None, &reordered));
        assert!(!line.is_same_configuration("Navy Suit", None, &Customization::new()));
    }

    #[test]
    fn test_size_is_part_of_identity() {
        let item = CartItem::new("Kente Cloth", Money::new(8900, Currency::USD)).with_size("2yd");
        let line = CartLine::from_item(item);

        assert!(line.is_same_configuration("Kente Cloth", Some("2yd"), &Customization::new()));
        assert!(!line.is_same_configuration("Kente Cloth", Some("6yd"), &Customization::new()));
        assert!(!line.is_same_configuration("Kente Cloth", None, &Customization::new()));
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::from_item(
            CartItem::new("Agbada", Money::new(4999, Currency::USD)).with_quantity(3),
        );
        assert_eq!(line.line_total().unwrap().amount_cents, 14997);
    }
}
