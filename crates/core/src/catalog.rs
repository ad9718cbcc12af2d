//! Fetched catalog data and product filtering.
//!
//! The catalog is fetched once and then filtered locally. Filtering is a pure
//! function: it never reorders, it only drops products that fail an active
//! facet, and an empty facet lets everything through.
//!
//! # Category matching
//!
//! The storefront historically matched a selected category against the
//! product's *name* (a product named "Laptops" belongs to category
//! "Laptops"). That behaviour is kept as [`CategoryMatchMode::Name`]; the
//! stricter [`CategoryMatchMode::Id`] compares the product's category
//! reference instead.

use std::str::FromStr;

use crate::types::{Category, CategoryId, Product, ProductId, ProductStatus};

/// Categories and products as fetched from the remote source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from fetched collections.
    #[must_use]
    pub const fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.products.is_empty()
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products passing every facet of `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter_products(&self.products, filter)
    }

    /// Up to `limit` other products sharing `product`'s category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        let Some(category_id) = &product.category_id else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.id != product.id && p.category_id.as_ref() == Some(category_id))
            .take(limit)
            .collect()
    }
}

/// How a selected category is compared against products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryMatchMode {
    /// Product name equals the category name.
    #[default]
    Name,
    /// Product category reference equals the category id.
    Id,
}

impl FromStr for CategoryMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "id" => Ok(Self::Id),
            _ => Err(format!("invalid category match mode: {s} (expected name or id)")),
        }
    }
}

/// The category facet of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryMatch {
    /// Keep products whose name equals this category name.
    ByName(String),
    /// Keep products whose category reference is this id.
    ById(CategoryId),
}

impl CategoryMatch {
    /// Build the facet for a selected category under the given mode.
    #[must_use]
    pub fn for_category(category: &Category, mode: CategoryMatchMode) -> Self {
        match mode {
            CategoryMatchMode::Name => Self::ByName(category.name.clone()),
            CategoryMatchMode::Id => Self::ById(category.id.clone()),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::ByName(name) => &product.name == name,
            Self::ById(id) => product.category_id.as_ref() == Some(id),
        }
    }
}

/// Active filter facets. The default filter selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<CategoryMatch>,
    pub status: Option<ProductStatus>,
    /// Free-text search on the product name; empty matches all.
    pub search: String,
}

impl ProductFilter {
    #[must_use]
    pub fn with_category(mut self, category: CategoryMatch) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Whether `product` passes every active facet.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.as_ref().is_none_or(|c| c.matches(product))
            && self.status.is_none_or(|s| product.status == s)
            && name_contains(&product.name, &self.search)
    }
}

/// Keep the products that pass `filter`, preserving their order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Case-insensitive substring match. Whitespace in the needle is significant.
fn name_contains(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
}
