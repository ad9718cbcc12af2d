//! Shared cart handle.
//!
//! Both the catalog and cart screens read and mutate the same [`Cart`]
//! through a [`CartStore`] injected via application state. Mutations take
//! the write lock for their whole duration, so every change is visible to
//! the next reader.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;
use voltcart_core::cart::{Cart, RemoveOutcome};
use voltcart_core::{Product, ProductId, Quantity};

/// Cheaply cloneable handle to the shopper's cart.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<Cart>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add units of a product. Returns the line's new quantity.
    pub fn add(&self, product: Product, quantity: Quantity) -> Quantity {
        let product_id = product.id.clone();
        let now = self.write().add(product, quantity);
        debug!(product_id = %product_id, added = %quantity, quantity = %now, "Added to cart");
        now
    }

    /// Take one unit of a product out of the cart.
    pub fn remove_one(&self, product_id: &ProductId) -> RemoveOutcome {
        let outcome = self.write().remove_one(product_id);
        debug!(product_id = %product_id, ?outcome, "Removed from cart");
        outcome
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.write().clear();
        debug!("Cart cleared");
    }

    /// Run `f` against the current cart.
    pub fn read<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        let cart = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// A copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.read(Clone::clone)
    }

    /// Quantity of a product in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> Option<Quantity> {
        self.read(|cart| cart.line(product_id).map(|line| line.quantity))
    }

    /// Total units across all lines, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.read(Cart::item_count)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Cart> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
