//! Candidate items handed to the cart store.

use crate::cart::CartConfig;
use crate::customization::Customization;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A fully-formed "add to cart" request.
///
/// Built by the detail screen (see [`Product::configure`]) or directly by a
/// caller. Nothing here is trusted until [`CartStore::add_item`] validates it.
///
/// [`Product::configure`]: crate::catalog::Product::configure
/// [`CartStore::add_item`]: crate::cart::CartStore::add_item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product name. Part of the line identity.
    pub name: String,
    /// Selected options. Part of the line identity.
    #[serde(default)]
    pub customization: Customization,
    /// Quantity to add.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Catalog product this came from.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    /// Selected size label.
    #[serde(default)]
    pub size: Option<String>,
    /// Image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Legacy "product id + size" key used by older list renderers.
    #[serde(default)]
    pub display_key: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

impl CartItem {
    /// A standard (uncustomized) item with quantity 1.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            customization: Customization::new(),
            quantity: default_quantity(),
            unit_price,
            product_id: None,
            size: None,
            image: None,
            display_key: None,
        }
    }

    /// Like [`CartItem::new`] but from a decimal price, which may be malformed.
    pub fn with_decimal_price(
        name: impl Into<String>,
        price: f64,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let unit_price = Money::from_decimal(price, currency)?;
        Ok(Self::new(name, unit_price))
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = customization;
        self
    }

    pub fn with_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_display_key(mut self, key: impl Into<String>) -> Self {
        self.display_key = Some(key.into());
        self
    }

    /// Boundary checks run before any cart state is touched.
    pub(crate) fn validate(&self, config: &CartConfig) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::InvalidCartItem(
                "product name is required".to_string(),
            ));
        }

        if self.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }

        if self.quantity > config.max_quantity_per_line {
            return Err(CommerceError::QuantityExceedsLimit(
                self.quantity,
                config.max_quantity_per_line,
            ));
        }

        if self.unit_price.is_negative() {
            return Err(CommerceError::InvalidCartItem(format!(
                "price must not be negative: {}",
                self.unit_price
            )));
        }

        if self.unit_price.currency != config.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: config.currency.code().to_string(),
                got: self.unit_price.currency.code().to_string(),
            });
        }

        self.unit_price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CartConfig {
        CartConfig::default()
    }

    #[test]
    fn test_defaults() {
        let item = CartItem::new("Kente Shirt", Money::new(8500, Currency::USD));
        assert_eq!(item.quantity, 1);
        assert!(item.customization.is_empty());
        assert!(item.validate(&config()).is_ok());
    }

    #[test]
    fn test_rejects_bad_quantity() {
        let item = CartItem::new("Kente Shirt", Money::new(8500, Currency::USD));
        assert_eq!(
            item.clone().with_quantity(0).validate(&config()),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            item.with_quantity(10_000).validate(&config()),
            Err(CommerceError::QuantityExceedsLimit(10_000, 9999))
        );
    }

    #[test]
    fn test_rejects_bad_price() {
        assert!(CartItem::with_decimal_price("Suit", f64::NAN, Currency::USD).is_err());

        let negative = CartItem::new("Suit", Money::new(-1, Currency::USD));
        assert!(matches!(
            negative.validate(&config()),
            Err(CommerceError::InvalidCartItem(_))
        ));

        let euro = CartItem::new("Suit", Money::new(100, Currency::EUR));
        assert!(matches!(
            euro.validate(&config()),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_blank_name() {
        let item = CartItem::new("  ", Money::new(100, Currency::USD));
        assert!(matches!(
            item.validate(&config()),
            Err(CommerceError::InvalidCartItem(_))
        ));
    }

    #[test]
    fn test_deserialize_defaults_quantity() {
        let item: CartItem = serde_json::from_str(
            r#"{"name": "Navy Suit", "customization": {"lapel": 4},
                "unit_price": {"amount_cents": 29900, "currency": "USD"}}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.customization.get("lapel").is_some());
    }
}
