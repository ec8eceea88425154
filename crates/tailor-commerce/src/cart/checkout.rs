//! Checkout summary.

use crate::cart::CartLine;
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the cart held at the moment it was checked out.
///
/// There is no payment step; producing this summary empties the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSummary {
    /// Order number assigned at checkout.
    pub order_id: OrderId,
    /// The lines, in cart order.
    pub lines: Vec<CartLine>,
    /// Sum of quantities.
    pub item_count: i64,
    /// Amount due.
    pub total: Money,
    /// When checkout happened.
    pub placed_at: DateTime<Utc>,
}

impl CheckoutSummary {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Order numbers follow the tracking table's `MT<year><suffix>` shape.
    pub(crate) fn order_number(placed_at: &DateTime<Utc>) -> OrderId {
        let random = OrderId::generate().into_inner();
        OrderId::new(format!(
            "MT{}{}",
            placed_at.format("%Y"),
            random[..6].to_uppercase()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_order_number_shape() {
        let placed_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let id = CheckoutSummary::order_number(&placed_at);
        assert!(id.as_str().starts_with("MT2024"));
        assert_eq!(id.as_str().len(), 12);
        assert_eq!(id.as_str(), id.as_str().to_uppercase());
    }
}
