//! Validated line-item quantities.

use std::num::NonZeroU32;

use thiserror::Error;

/// Quantity validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity must be at least 1")]
    Zero,
    #[error("quantity must be at most {max}")]
    TooLarge { max: u32 },
}

/// A number of units between 1 and [`Quantity::MAX`].
///
/// Zero is unrepresentable, which is what keeps a cart line from ever
/// holding zero units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Most units a single cart line can hold.
    pub const MAX: Self = Self(NonZeroU32::MIN.saturating_add(9_998));

    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Zero` for 0 and `QuantityError::TooLarge`
    /// above [`Self::MAX`].
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value > Self::MAX.get() {
            return Err(QuantityError::TooLarge {
                max: Self::MAX.get(),
            });
        }
        match NonZeroU32::new(value) {
            Some(n) => Ok(Self(n)),
            None => Err(QuantityError::Zero),
        }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add `other` units, saturating at [`Self::MAX`].
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        let sum = self.0.saturating_add(other.get());
        if sum.get() > Self::MAX.get() {
            Self::MAX
        } else {
            Self(sum)
        }
    }

    /// One fewer unit, or `None` when this is the last one.
    #[must_use]
    pub const fn decremented(self) -> Option<Self> {
        match NonZeroU32::new(self.get() - 1) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
