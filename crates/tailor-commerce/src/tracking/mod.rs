//! Order tracking.
//!
//! A read-only lookup of order numbers against a fixed table. Each order
//! sits at one stage of a fixed pipeline; stages before it render as
//! completed, after it as pending.

mod stage;
mod tracker;

pub use stage::{OrderStage, StageState, ORDER_STAGES};
pub use tracker::{normalize_order_number, OrderTracker, TrackedOrder};
