//! Shopping cart module.
//!
//! The [`CartStore`] owns the ordered list of [`CartLine`]s and the merge
//! policy that keeps at most one line per (name, customization) pair.

mod checkout;
mod config;
mod item;
mod line;
mod pricing;
mod store;

pub use checkout::CheckoutSummary;
pub use config::{CartConfig, PriceMergePolicy, MAX_QUANTITY_PER_ITEM};
pub use item::CartItem;
pub use line::CartLine;
pub use pricing::{CartPricing, LinePricing};
pub use store::{AddOutcome, CartSnapshot, CartStore};
