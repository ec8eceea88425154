//! Cart pricing breakdown.

use crate::cart::CartLine;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing for the whole cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Per-line breakdown, in cart order.
    pub line_items: Vec<LinePricing>,
    /// Sum of quantities.
    pub item_count: i64,
    /// Sum of line subtotals.
    pub total: Money,
}

impl CartPricing {
    /// Build a breakdown from committed cart lines.
    ///
    /// Committed lines have already passed the store's overflow check, so the
    /// saturating arithmetic here never clamps in practice.
    pub(crate) fn from_lines(lines: &[CartLine], currency: Currency) -> Self {
        let line_items: Vec<LinePricing> = lines
            .iter()
            .map(|line| LinePricing {
                line_item_id: line.id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.unit_price.saturating_mul(line.quantity),
            })
            .collect();

        let total = line_items
            .iter()
            .fold(Money::zero(currency), |acc, l| acc.saturating_add(&l.subtotal));

        Self {
            item_count: lines.iter().map(|l| l.quantity).sum(),
            line_items,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Pricing for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub line_item_id: LineItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub subtotal: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;

    #[test]
    fn test_breakdown() {
        let lines = vec![
            CartLine::from_item(
                CartItem::new("Navy Suit", Money::new(10000, Currency::USD)).with_quantity(2),
            ),
            CartLine::from_item(CartItem::new("Dashiki", Money::new(4999, Currency::USD))),
        ];

        let pricing = CartPricing::from_lines(&lines, Currency::USD);
        assert_eq!(pricing.line_items.len(), 2);
        assert_eq!(pricing.line_items[0].subtotal.amount_cents, 20000);
        assert_eq!(pricing.item_count, 3);
        assert_eq!(pricing.total.display_amount(), "249.99");
    }

    #[test]
    fn test_empty() {
        let pricing = CartPricing::from_lines(&[], Currency::GHS);
        assert!(pricing.is_empty());
        assert_eq!(pricing.total, Money::zero(Currency::GHS));
    }
}
