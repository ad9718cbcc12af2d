//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of line items, at most one per product,
//! kept in the order products were first added. Totals are derived on every
//! read and never stored.
//!
//! # Example
//!
//! ```rust
//! # use voltcart_core::cart::{Cart, RemoveOutcome};
//! # use voltcart_core::{CurrencyCode, Price, Product, ProductId, ProductStatus, Quantity};
//! let product = Product {
//!     id: ProductId::new("1"),
//!     name: "Headphones".to_string(),
//!     description: String::new(),
//!     price: Price::from_cents(1000, CurrencyCode::USD),
//!     image: String::new(),
//!     category_id: None,
//!     status: ProductStatus::Popular,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(product.clone(), Quantity::ONE);
//! cart.add(product, Quantity::ONE);
//! assert_eq!(cart.total().to_string(), "$20.00");
//!
//! assert_eq!(cart.remove_one(&ProductId::new("1")), RemoveOutcome::Decremented(Quantity::ONE));
//! assert_eq!(cart.remove_one(&ProductId::new("1")), RemoveOutcome::Removed);
//! assert!(cart.is_empty());
//! ```

use crate::types::{CurrencyCode, Price, Product, ProductId, Quantity};

/// One product in the cart with how many units of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// What `Cart::remove_one` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line lost one unit and now holds this many.
    Decremented(Quantity),
    /// The last unit was removed, so the line is gone.
    Removed,
    /// No line for that product; nothing changed.
    NotInCart,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// at the end. Returns the line's quantity afterwards.
    pub fn add(&mut self, product: Product, quantity: Quantity) -> Quantity {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return line.quantity;
        }

        self.lines.push(CartLineItem { product, quantity });
        quantity
    }

    /// Take one unit of a product out of the cart.
    ///
    /// The line is deleted when its last unit goes; an unknown product is a
    /// no-op.
    pub fn remove_one(&mut self, product_id: &ProductId) -> RemoveOutcome {
        let Some(index) = self.position(product_id) else {
            return RemoveOutcome::NotInCart;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return RemoveOutcome::NotInCart;
        };

        if let Some(quantity) = line.quantity.decremented() {
            line.quantity = quantity;
            RemoveOutcome::Decremented(quantity)
        } else {
            self.lines.remove(index);
            RemoveOutcome::Removed
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order their products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// The line for a product, if it is in the cart.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.product.id == product_id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        if self.lines.is_empty() {
            return Price::zero(CurrencyCode::default());
        }
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| &line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }
}
