//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as a [`Decimal`] amount in the currency's standard unit
//! (dollars, not cents) so that `$5.50 * 3` is exact. The remote catalog
//! ships prices as display strings such as `"$12.00"`; turning those into a
//! [`Price`] is a parsing concern handled by [`Price::parse_display`].
//!
//! Arithmetic saturates instead of overflowing, and parsed amounts are capped
//! at [`Price::MAX_AMOUNT`], so no cart built from catalog prices can panic
//! when it is totalled.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use super::Quantity;

/// Errors from parsing a display price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error("empty price")]
    Empty,
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
    #[error("negative price: {0}")]
    Negative(String),
    #[error("price too large: {0}")]
    TooLarge(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Largest amount a catalog price may carry.
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in minor units (cents).
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Parse a dollar display string like `"$12.00"` or `"1,299.99"`.
    ///
    /// The catalog is priced in US dollars: a leading `$` is optional and
    /// any other currency symbol is rejected. Thousands separators are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `PriceParseError` if the string is empty, the amount is not a
    /// decimal number, or it is negative or above [`Self::MAX_AMOUNT`].
    pub fn parse_display(input: &str) -> Result<Self, PriceParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceParseError::Empty);
        }

        let rest = trimmed.strip_prefix(CurrencyCode::USD.symbol()).unwrap_or(trimmed);
        let digits: String = rest.trim().chars().filter(|c| *c != ',').collect();

        let amount = Decimal::from_str(&digits)
            .map_err(|_| PriceParseError::InvalidAmount(input.to_string()))?;
        Self::checked_amount(amount, input)
    }

    /// Validate an amount that came from outside as a USD price.
    ///
    /// # Errors
    ///
    /// Returns `PriceParseError` if `amount` is negative or above
    /// [`Self::MAX_AMOUNT`]. `raw` is the original text, for the message.
    pub fn checked_amount(amount: Decimal, raw: &str) -> Result<Self, PriceParseError> {
        if amount.is_sign_negative() {
            return Err(PriceParseError::Negative(raw.to_string()));
        }
        if amount > Self::MAX_AMOUNT {
            return Err(PriceParseError::TooLarge(raw.to_string()));
        }
        Ok(Self::new(amount, CurrencyCode::USD))
    }

    /// The price of `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity.get())),
            self.currency_code,
        )
    }
}

/// Renders as `$25.50`: currency symbol plus two decimal places.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_display(s)
    }
}

/// Saturating addition.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut iter = iter.peekable();
        let currency = iter
            .peek()
            .map_or_else(CurrencyCode::default, |p| p.currency_code);
        iter.fold(Self::zero(currency), Add::add)
    }
}

/// ISO 4217 currency codes. The catalog is priced in a single currency, so
/// sums never mix currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::from_cents(cents, CurrencyCode::USD)
    }

    #[test]
    fn test_parse_display_with_symbol() {
        assert_eq!(Price::parse_display("$12.00").unwrap(), usd(1200));
        assert!(matches!(
            Price::parse_display("€8"),
            Err(PriceParseError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_display_without_symbol() {
        assert_eq!(Price::parse_display("12.5").unwrap(), usd(1250));
        assert_eq!(Price::parse_display(" 1,299.99 ").unwrap(), usd(129_999));
    }

    #[test]
    fn test_parse_display_rejects_garbage() {
        assert_eq!(Price::parse_display(""), Err(PriceParseError::Empty));
        assert!(matches!(
            Price::parse_display("abc"),
            Err(PriceParseError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse_display("$-3"),
            Err(PriceParseError::Negative(_))
        ));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(usd(2550).to_string(), "$25.50");
        assert_eq!(Price::parse_display("$899").unwrap().to_string(), "$899.00");
        assert_eq!(Price::zero(CurrencyCode::USD).to_string(), "$0.00");
    }

    #[test]
    fn test_times_and_sum() {
        let two_tens = usd(1000).times(Quantity::new(2).unwrap());
        let total: Price = [two_tens, usd(550)].into_iter().sum();
        assert_eq!(total, usd(2550));
    }

    #[test]
    fn test_parse_display_caps_amount() {
        assert_eq!(
            Price::parse_display("$1,000,000,000").unwrap().amount,
            Price::MAX_AMOUNT
        );
        assert_eq!(
            Price::parse_display("$40000000000000000000000000000"),
            Err(PriceParseError::TooLarge(
                "$40000000000000000000000000000".to_string()
            ))
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Price::new(Decimal::MAX, CurrencyCode::USD);
        assert_eq!(huge.times(Quantity::new(2).unwrap()).amount, Decimal::MAX);
        assert_eq!((huge + usd(100)).amount, Decimal::MAX);
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert_eq!(total, Price::zero(CurrencyCode::USD));
    }
}
