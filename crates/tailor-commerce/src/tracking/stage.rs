//! Fulfillment stages.

use serde::Serialize;

/// One step of the tailoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderStage {
    pub title: &'static str,
    pub description: &'static str,
}

/// Every order moves through these stages in order.
pub static ORDER_STAGES: [OrderStage; 7] = [
    OrderStage {
        title: "Order Placed",
        description: "We have received your order.",
    },
    OrderStage {
        title: "Measurements Confirmed",
        description: "Your measurements have been reviewed by a tailor.",
    },
    OrderStage {
        title: "Fabric Cutting",
        description: "Your fabric is being cut to pattern.",
    },
    OrderStage {
        title: "Tailoring",
        description: "Your garment is being sewn.",
    },
    OrderStage {
        title: "Quality Check",
        description: "Final inspection and pressing.",
    },
    OrderStage {
        title: "Shipped",
        description: "Your order is on its way.",
    },
    OrderStage {
        title: "Delivered",
        description: "Your order has been delivered.",
    },
];

/// How a stage renders relative to an order's current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Completed,
    Current,
    Pending,
}

impl StageState {
    /// State of stage `index` for an order currently at `current`.
    pub fn for_index(index: usize, current: usize) -> Self {
        use std::cmp::Ordering;
        match index.cmp(&current) {
            Ordering::Less => StageState::Completed,
            Ordering::Equal => StageState::Current,
            Ordering::Greater => StageState::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StageState::Completed => "completed",
            StageState::Current => "current",
            StageState::Pending => "pending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_state() {
        assert_eq!(StageState::for_index(0, 2), StageState::Completed);
        assert_eq!(StageState::for_index(2, 2), StageState::Current);
        assert_eq!(StageState::for_index(5, 2), StageState::Pending);
    }
}
