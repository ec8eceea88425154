//! Cart store settings.

use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Default maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// What happens to a line's unit price when the same configuration is
/// added again at a different price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceMergePolicy {
    /// Only the quantity changes; the first price sticks.
    #[default]
    KeepOriginal,
    /// The line is repriced to the most recently added unit price.
    TakeLatest,
}

impl PriceMergePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceMergePolicy::KeepOriginal => "keep_original",
            PriceMergePolicy::TakeLatest => "take_latest",
        }
    }
}

/// Settings for a [`CartStore`](super::CartStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Currency every line must be priced in.
    pub currency: Currency,
    /// Upper bound on a single line's quantity.
    pub max_quantity_per_line: i64,
    /// Price handling on merge.
    pub price_on_merge: PriceMergePolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            max_quantity_per_line: MAX_QUANTITY_PER_ITEM,
            price_on_merge: PriceMergePolicy::KeepOriginal,
        }
    }
}

impl CartConfig {
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_price_on_merge(mut self, policy: PriceMergePolicy) -> Self {
        self.price_on_merge = policy;
        self
    }
}
