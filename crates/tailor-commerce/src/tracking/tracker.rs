//! Order lookup.

use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::tracking::{OrderStage, StageState, ORDER_STAGES};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Normalize free-text input into the table's key form.
pub fn normalize_order_number(input: &str) -> String {
    input.trim().to_uppercase()
}

/// A tracked order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedOrder {
    pub order_number: OrderId,
    pub customer: String,
    pub items: Vec<String>,
    pub placed_on: NaiveDate,
    pub estimated_delivery: NaiveDate,
    /// Index into [`ORDER_STAGES`].
    pub current_status: usize,
}

impl TrackedOrder {
    /// The stage the order is at, if the index is in range.
    pub fn current_stage(&self) -> Option<&'static OrderStage> {
        ORDER_STAGES.get(self.current_status)
    }

    /// Every stage paired with how it should render.
    pub fn stages(&self) -> Vec<(&'static OrderStage, StageState)> {
        ORDER_STAGES
            .iter()
            .enumerate()
            .map(|(i, stage)| (stage, StageState::for_index(i, self.current_status)))
            .collect()
    }

    pub fn is_delivered(&self) -> bool {
        self.current_status + 1 >= ORDER_STAGES.len()
    }
}

/// Read-only order table.
#[derive(Debug, Clone, Default)]
pub struct OrderTracker {
    orders: HashMap<String, TrackedOrder>,
}

impl OrderTracker {
    /// Build a tracker from records, keyed by normalized order number.
    pub fn new(orders: impl IntoIterator<Item = TrackedOrder>) -> Self {
        let orders = orders
            .into_iter()
            .map(|order| (normalize_order_number(order.order_number.as_str()), order))
            .collect();
        Self { orders }
    }

    /// The storefront's fixed order table.
    pub fn sample() -> Self {
        Self::new([
            TrackedOrder {
                order_number: OrderId::new("MT2024001"),
                customer: "Adebayo Okafor".to_string(),
                items: vec!["Navy Suit (peak lapel)".to_string(), "Oxford Shirt".to_string()],
                placed_on: date(2024, 3, 4),
                estimated_delivery: date(2024, 3, 25),
                current_status: 3,
            },
            TrackedOrder {
                order_number: OrderId::new("MT2024002"),
                customer: "Grace Mensah".to_string(),
                items: vec!["Agbada Set (aso oke)".to_string()],
                placed_on: date(2024, 2, 19),
                estimated_delivery: date(2024, 3, 11),
                current_status: 5,
            },
            TrackedOrder {
                order_number: OrderId::new("MT2024003"),
                customer: "Daniel Wright".to_string(),
                items: vec!["Charcoal Suit".to_string(), "Wool Trousers".to_string()],
                placed_on: date(2024, 1, 8),
                estimated_delivery: date(2024, 1, 29),
                current_status: 6,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Look up an order by free-text number.
    pub fn lookup(&self, input: &str) -> Result<&TrackedOrder, CommerceError> {
        let key = normalize_order_number(input);
        if key.is_empty() {
            return Err(CommerceError::ValidationError(
                "order number is required".to_string(),
            ));
        }
        match self.orders.get(&key) {
            Some(order) => Ok(order),
            None => {
                debug!(order_number = %key, "Order lookup miss");
                Err(CommerceError::OrderNotFound(key))
            }
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes_input() {
        let tracker = OrderTracker::sample();
        let order = tracker.lookup(" mt2024001 ").unwrap();
        assert_eq!(order.order_number.as_str(), "MT2024001");
        assert_eq!(order.current_stage().unwrap().title, "Tailoring");
    }

    #[test]
    fn test_lookup_miss_and_blank() {
        let tracker = OrderTracker::sample();
        assert_eq!(
            tracker.lookup("mt9999999").unwrap_err(),
            CommerceError::OrderNotFound("MT9999999".to_string())
        );
        assert!(matches!(
            tracker.lookup("   "),
            Err(CommerceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_stage_coloring() {
        let tracker = OrderTracker::sample();
        let order = tracker.lookup("MT2024002").unwrap();
        let states: Vec<StageState> = order.stages().into_iter().map(|(_, s)| s).collect();
        assert_eq!(states.len(), ORDER_STAGES.len());
        assert!(states[..5].iter().all(|s| *s == StageState::Completed));
        assert_eq!(states[5], StageState::Current);
        assert_eq!(states[6], StageState::Pending);
        assert!(!order.is_delivered());
        assert!(tracker.lookup("mt2024003").unwrap().is_delivered());
    }
}
