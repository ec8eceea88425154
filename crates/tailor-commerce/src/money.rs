//! Money type for representing monetary values.
//!
//! Amounts are integer minor units so that line totals and the cart total
//! are exact; rounding to two places only happens when a caller hands in a
//! decimal price.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every supported currency has a two-digit minor unit.
const CENTS_PER_UNIT: i64 = 100;

/// Currencies the storefront prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    NGN,
    GHS,
    KES,
    ZAR,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::NGN => "NGN",
            Currency::GHS => "GHS",
            Currency::KES => "KES",
            Currency::ZAR => "ZAR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::NGN => "\u{20a6}",
            Currency::GHS => "GH\u{20b5}",
            Currency::KES => "KSh",
            Currency::ZAR => "R",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "NGN" => Some(Currency::NGN),
            "GHS" => Some(Currency::GHS),
            "KES" => Some(Currency::KES),
            "ZAR" => Some(Currency::ZAR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounded to the minor unit.
    ///
    /// NaN, infinities and amounts outside the `i64` cent range are rejected
    /// instead of leaking into totals.
    ///
    /// ```
    /// use tailor_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::USD).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// assert!(Money::from_decimal(f64::NAN, Currency::USD).is_err());
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Result<Self, CommerceError> {
        if !amount.is_finite() {
            return Err(CommerceError::InvalidCartItem(format!(
                "price is not a number: {}",
                amount
            )));
        }
        let scaled = (amount * CENTS_PER_UNIT as f64).round();
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    ///
    /// Formatting works on the integer amount so large totals do not pick up
    /// float noise.
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.amount_cents.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        format!("{}{}.{:02}", sign, magnitude / per_unit, magnitude % per_unit)
    }

    /// Add another Money value; `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity; `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, clamping at the `i64` bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Add, clamping at the `i64` bounds. Currencies are assumed equal.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }

    /// Sum an iterator of Money values; `None` on mismatch or overflow.
    pub fn checked_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD).unwrap();
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(299.0, Currency::NGN).unwrap();
        assert_eq!(m.amount_cents, 29900);
    }

    #[test]
    fn test_money_from_decimal_rejects_non_finite() {
        assert!(matches!(
            Money::from_decimal(f64::NAN, Currency::USD),
            Err(CommerceError::InvalidCartItem(_))
        ));
        assert!(Money::from_decimal(f64::INFINITY, Currency::USD).is_err());
        assert_eq!(
            Money::from_decimal(1e30, Currency::USD),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(24999, Currency::USD).display(), "$249.99");
        assert_eq!(Money::new(5, Currency::USD).display_amount(), "0.05");
        assert_eq!(Money::new(-150, Currency::GBP).display(), "\u{00a3}-1.50");
        assert_eq!(Money::new(1_000_000, Currency::NGN).display(), "\u{20a6}10000.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount_cents, 1500);
        assert_eq!(a.checked_mul(3).unwrap().amount_cents, 3000);

        let eur = Money::new(500, Currency::EUR);
        assert!(a.checked_add(&eur).is_none());
        assert!(Money::new(i64::MAX, Currency::USD).checked_mul(2).is_none());
    }

    #[test]
    fn test_checked_sum() {
        let items = [
            Money::new(20000, Currency::USD),
            Money::new(4999, Currency::USD),
        ];
        let total = Money::checked_sum(items.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 24999);

        let empty: [Money; 0] = [];
        assert!(Money::checked_sum(empty.iter(), Currency::USD).unwrap().is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code(" ngn "), Some(Currency::NGN));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
