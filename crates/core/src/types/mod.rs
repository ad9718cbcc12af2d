//! Core types for VoltCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceParseError};
pub use product::{Category, Product};
pub use quantity::{Quantity, QuantityError};
pub use status::ProductStatus;
