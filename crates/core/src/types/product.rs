//! Catalog entities.

use super::{CategoryId, Price, ProductId, ProductStatus};

/// A product offered in the catalog.
///
/// Immutable once fetched; the cart keeps its own copy per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
    pub category_id: Option<CategoryId>,
    pub status: ProductStatus,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Icon URL.
    pub icon: String,
}
