//! The cart store.
//!
//! All cart state lives behind one mutex, so concurrent callers still see
//! at most one line per (name, size, customization) triple. After every mutation the
//! store publishes an immutable [`CartSnapshot`] on a `watch` channel while
//! the lock is still held, which keeps snapshot versions in commit order.

use crate::cart::{
    CartConfig, CartItem, CartLine, CartPricing, CheckoutSummary, PriceMergePolicy,
    MAX_QUANTITY_PER_ITEM,
};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Result of a successful [`CartStore::add_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new line was appended.
    Added { line_id: LineItemId },
    /// An existing line absorbed the quantity.
    Merged { line_id: LineItemId, quantity: i64 },
}

impl AddOutcome {
    pub fn line_id(&self) -> &LineItemId {
        match self {
            AddOutcome::Added { line_id } | AddOutcome::Merged { line_id, .. } => line_id,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, AddOutcome::Merged { .. })
    }
}

/// Read-only view of the cart published after each mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    /// Incremented on every published change.
    pub version: u64,
    /// Lines in cart order.
    pub lines: Arc<[CartLine]>,
    /// Sum of `unit_price * quantity`.
    pub total: Money,
}

impl CartSnapshot {
    fn empty(currency: Currency) -> Self {
        Self {
            version: 0,
            lines: Arc::from(Vec::new()),
            total: Money::zero(currency),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[derive(Debug, Default)]
struct CartState {
    lines: Vec<CartLine>,
    version: u64,
}

/// Authoritative in-memory cart.
///
/// Create one per app session and share it by reference (or `Arc`). It is
/// `Send + Sync`.
#[derive(Debug)]
pub struct CartStore {
    config: CartConfig,
    state: Mutex<CartState>,
    publisher: watch::Sender<CartSnapshot>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart with default settings.
    pub fn new() -> Self {
        Self::with_config(CartConfig::default())
    }

    /// Create an empty cart with the given settings.
    ///
    /// A per-line quantity limit below 1 would reject every item, so it falls
    /// back to [`MAX_QUANTITY_PER_ITEM`].
    pub fn with_config(mut config: CartConfig) -> Self {
        if config.max_quantity_per_line < 1 {
            warn!(
                limit = config.max_quantity_per_line,
                fallback = MAX_QUANTITY_PER_ITEM,
                "Ignoring per-line quantity limit below 1"
            );
            config.max_quantity_per_line = MAX_QUANTITY_PER_ITEM;
        }
        let (publisher, _) = watch::channel(CartSnapshot::empty(config.currency));
        Self {
            config,
            state: Mutex::new(CartState::default()),
            publisher,
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Add a configured item.
    ///
    /// If a line with the same name, the same size and a structurally equal
    /// customization exists, its quantity grows by `item.quantity` and it keeps its
    /// position. Otherwise the item is appended as a new line.
    ///
    /// Returns an error, leaving the cart untouched, if:
    /// - the item fails boundary validation (name, quantity, price, currency)
    /// - the merged quantity would exceed the per-line maximum
    /// - the cart total would overflow
    pub fn add_item(&self, item: CartItem) -> Result<AddOutcome, CommerceError> {
        if let Err(err) = item.validate(&self.config) {
            warn!(name = %item.name, error = %err, "Rejected cart item");
            return Err(err);
        }

        let mut state = self.state.lock();
        let mut lines = state.lines.clone();

        let existing = lines
            .iter()
            .position(|line| {
                line.is_same_configuration(&item.name, item.size.as_deref(), &item.customization)
            });

        let outcome = match existing {
            Some(index) => {
                let line = &mut lines[index];
                let quantity = line
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(CommerceError::Overflow)?;

                if quantity > self.config.max_quantity_per_line {
                    return Err(CommerceError::QuantityExceedsLimit(
                        quantity,
                        self.config.max_quantity_per_line,
                    ));
                }

                if line.unit_price != item.unit_price {
                    match self.config.price_on_merge {
                        PriceMergePolicy::KeepOriginal => debug!(
                            line_id = %line.id,
                            kept = %line.unit_price,
                            offered = %item.unit_price,
                            "Keeping original unit price on merge"
                        ),
                        PriceMergePolicy::TakeLatest => line.unit_price = item.unit_price,
                    }
                }

                line.quantity = quantity;
                debug!(
                    line_id = %line.id,
                    name = %line.name,
                    quantity,
                    "Merged into existing cart line"
                );
                AddOutcome::Merged {
                    line_id: line.id.clone(),
                    quantity,
                }
            }
            None => {
                let line = CartLine::from_item(item);
                debug!(
                    line_id = %line.id,
                    name = %line.name,
                    customization = %line.customization.fingerprint(),
                    quantity = line.quantity,
                    "Appended cart line"
                );
                let outcome = AddOutcome::Added {
                    line_id: line.id.clone(),
                };
                lines.push(line);
                outcome
            }
        };

        checked_total(&lines, self.config.currency).ok_or(CommerceError::Overflow)?;
        state.lines = lines;
        self.publish(&mut state);
        Ok(outcome)
    }

    /// Remove the line with the given id.
    ///
    /// Returns `false` (and publishes nothing) if no line matches.
    pub fn remove_item(&self, line_id: &LineItemId) -> bool {
        let mut state = self.state.lock();
        match state.lines.iter().position(|l| &l.id == line_id) {
            Some(index) => {
                let removed = state.lines.remove(index);
                debug!(line_id = %removed.id, name = %removed.name, "Removed cart line");
                self.publish(&mut state);
                true
            }
            None => {
                debug!(line_id = %line_id, "Remove ignored, no such cart line");
                false
            }
        }
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// was found.
    pub fn update_quantity(
        &self,
        line_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_id));
        }

        if quantity > self.config.max_quantity_per_line {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                self.config.max_quantity_per_line,
            ));
        }

        let mut state = self.state.lock();
        let Some(index) = state.lines.iter().position(|l| &l.id == line_id) else {
            return Ok(false);
        };

        let mut lines = state.lines.clone();
        lines[index].quantity = quantity;
        checked_total(&lines, self.config.currency).ok_or(CommerceError::Overflow)?;

        state.lines = lines;
        debug!(line_id = %line_id, quantity, "Updated cart line quantity");
        self.publish(&mut state);
        Ok(true)
    }

    /// Empty the cart. Calling it on an empty cart changes nothing.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        if state.lines.is_empty() {
            return;
        }
        let removed = state.lines.len();
        state.lines.clear();
        debug!(removed, "Cleared cart");
        self.publish(&mut state);
    }

    /// Sum over all lines of `unit_price * quantity`.
    pub fn compute_total(&self) -> Money {
        let state = self.state.lock();
        total_of(&state.lines, self.config.currency)
    }

    /// Per-line pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        let state = self.state.lock();
        CartPricing::from_lines(&state.lines, self.config.currency)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.publisher.borrow().clone()
    }

    /// Current lines, read-only.
    pub fn lines(&self) -> Arc<[CartLine]> {
        self.snapshot().lines
    }

    /// Subscribe to snapshots. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.publisher.subscribe()
    }

    pub fn get_line(&self, line_id: &LineItemId) -> Option<CartLine> {
        let state = self.state.lock();
        state.lines.iter().find(|l| &l.id == line_id).cloned()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.state.lock().lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.state.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().lines.is_empty()
    }

    /// Capture the cart as an order summary and empty it.
    pub fn checkout(&self) -> Result<CheckoutSummary, CommerceError> {
        let mut state = self.state.lock();
        if state.lines.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let placed_at = Utc::now();
        let lines = std::mem::take(&mut state.lines);
        let summary = CheckoutSummary {
            order_id: CheckoutSummary::order_number(&placed_at),
            item_count: lines.iter().map(|l| l.quantity).sum(),
            total: total_of(&lines, self.config.currency),
            lines,
            placed_at,
        };

        info!(
            order_id = %summary.order_id,
            lines = summary.lines.len(),
            total = %summary.total,
            "Checked out cart"
        );
        self.publish(&mut state);
        Ok(summary)
    }

    fn publish(&self, state: &mut CartState) {
        state.version += 1;
        let snapshot = CartSnapshot {
            version: state.version,
            lines: Arc::from(state.lines.clone()),
            total: total_of(&state.lines, self.config.currency),
        };
        self.publisher.send_replace(snapshot);
    }
}

/// Total of committed lines.
///
/// Every committed line set has passed [`checked_total`], so saturation
/// never engages here.
fn total_of(lines: &[CartLine], currency: Currency) -> Money {
    lines.iter().fold(Money::zero(currency), |acc, line| {
        acc.saturating_add(&line.unit_price.saturating_mul(line.quantity))
    })
}

fn checked_total(lines: &[CartLine], currency: Currency) -> Option<Money> {
    let line_totals = lines
        .iter()
        .map(CartLine::line_total)
        .collect::<Option<Vec<_>>>()?;
    Money::checked_sum(line_totals.iter(), currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customization::Customization;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn suit(lapel: i32) -> CartItem {
        CartItem::new("Navy Suit", usd(29900))
            .with_customization(Customization::new().with("lapel", lapel))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert_eq!(store.compute_total(), usd(0));
        assert_eq!(store.snapshot().version, 0);
    }

    #[test]
    fn test_add_merge_scenario() {
        let store = CartStore::new();
        let first = store.add_item(suit(4)).unwrap();
        let second = store.add_item(suit(4).with_quantity(2)).unwrap();

        assert!(!first.is_merge());
        assert_eq!(
            second,
            AddOutcome::Merged {
                line_id: first.line_id().clone(),
                quantity: 3
            }
        );

        let lines = store.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].unit_price, usd(29900));
    }

    #[test]
    fn test_distinct_customizations_make_distinct_lines() {
        let store = CartStore::new();
        store.add_item(suit(4)).unwrap();
        store.add_item(suit(3)).unwrap();
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_merge_keeps_position() {
        let store = CartStore::new();
        let a = store.add_item(suit(1)).unwrap();
        store.add_item(suit(2)).unwrap();
        store.add_item(suit(1)).unwrap();
        let c = store.add_item(suit(3)).unwrap();

        let lines = store.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(&lines[0].id, a.line_id());
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(&lines[2].id, c.line_id());
    }

    #[test]
    fn test_keep_original_price_on_merge() {
        let store = CartStore::new();
        store.add_item(suit(4)).unwrap();
        store
            .add_item(CartItem {
                unit_price: usd(24900),
                ..suit(4)
            })
            .unwrap();
        assert_eq!(store.lines()[0].unit_price, usd(29900));
        assert_eq!(store.compute_total(), usd(59800));
    }

    #[test]
    fn test_take_latest_price_on_merge() {
        let store = CartStore::with_config(
            CartConfig::default().with_price_on_merge(PriceMergePolicy::TakeLatest),
        );
        store.add_item(suit(4)).unwrap();
        store
            .add_item(CartItem {
                unit_price: usd(24900),
                ..suit(4)
            })
            .unwrap();
        assert_eq!(store.lines()[0].unit_price, usd(24900));
        assert_eq!(store.compute_total(), usd(49800));
    }

    #[test]
    fn test_rejected_item_leaves_cart_untouched() {
        let store = CartStore::new();
        store.add_item(suit(4)).unwrap();
        let version = store.snapshot().version;

        assert!(store.add_item(suit(4).with_quantity(0)).is_err());
        assert!(store.add_item(suit(4).with_quantity(9999)).is_err());
        assert!(store
            .add_item(CartItem::new("Navy Suit", Money::new(100, Currency::EUR)))
            .is_err());

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.snapshot().version, version);
    }

    #[test]
    fn test_unusable_quantity_limit_falls_back() {
        for limit in [0, -5] {
            let store = CartStore::with_config(CartConfig {
                max_quantity_per_line: limit,
                ..CartConfig::default()
            });
            assert_eq!(store.config().max_quantity_per_line, MAX_QUANTITY_PER_ITEM);
            assert!(store.add_item(suit(4).with_quantity(2)).is_ok());
        }

        let tight = CartStore::with_config(CartConfig {
            max_quantity_per_line: 1,
            ..CartConfig::default()
        });
        tight.add_item(suit(4)).unwrap();
        assert!(matches!(
            tight.add_item(suit(4)),
            Err(CommerceError::QuantityExceedsLimit(2, 1))
        ));
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let store = CartStore::new();
        store
            .add_item(CartItem::new("Gold Agbada", usd(i64::MAX / 2)))
            .unwrap();
        let err = store
            .add_item(CartItem::new("Gold Kaftan", usd(i64::MAX / 2 + 2)))
            .unwrap_err();
        assert_eq!(err, CommerceError::Overflow);
        assert_eq!(store.line_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let store = CartStore::new();
        let keep = store.add_item(suit(1)).unwrap();
        let drop = store.add_item(suit(2)).unwrap();
        let before = store.get_line(keep.line_id()).unwrap();

        assert!(store.remove_item(drop.line_id()));
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.get_line(keep.line_id()).unwrap(), before);

        assert!(!store.remove_item(drop.line_id()));
        assert!(!store.remove_item(&LineItemId::new("missing")));
        assert_eq!(store.line_count(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let store = CartStore::new();
        let added = store.add_item(suit(4)).unwrap();

        assert!(store.update_quantity(added.line_id(), 5).unwrap());
        assert_eq!(store.item_count(), 5);

        assert!(store.update_quantity(added.line_id(), 10_000).is_err());
        assert!(!store.update_quantity(&LineItemId::new("missing"), 2).unwrap());

        assert!(store.update_quantity(added.line_id(), 0).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = CartStore::new();
        store.add_item(suit(4)).unwrap();
        store.clear();
        let first = store.snapshot();
        store.clear();
        let second = store.snapshot();

        assert!(first.is_empty());
        assert!(second.is_empty());
        assert_eq!(first.version, second.version);
    }

    #[test]
    fn test_compute_total() {
        let store = CartStore::new();
        store
            .add_item(CartItem::new("Shirt", usd(10000)).with_quantity(2))
            .unwrap();
        store.add_item(CartItem::new("Tie", usd(4999))).unwrap();
        assert_eq!(store.compute_total().display_amount(), "249.99");
        assert_eq!(store.pricing().total, store.compute_total());
    }

    #[test]
    fn test_subscribers_see_updates() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_item(suit(4)).unwrap();
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.total, usd(29900));

        store.remove_item(&LineItemId::new("missing"));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_checkout() {
        let store = CartStore::new();
        assert_eq!(store.checkout().unwrap_err(), CommerceError::EmptyCart);

        store.add_item(suit(4).with_quantity(2)).unwrap();
        let summary = store.checkout().unwrap();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total, usd(59800));
        assert!(summary.order_id.as_str().starts_with("MT"));
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
