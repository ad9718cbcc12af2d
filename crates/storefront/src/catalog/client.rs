//! HTTP client for the remote catalog.
//!
//! The remote source is a read-only mock API exposing two JSON arrays: the
//! category list and the product list. Records are decoded into wire types
//! here and converted into core domain types before leaving the module.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;
use voltcart_core::catalog::Catalog;
use voltcart_core::{
    Category, CategoryId, Price, PriceParseError, Product, ProductId, ProductStatus,
};

use super::CatalogError;
use crate::config::CatalogConfig;

// =============================================================================
// Wire Types
// =============================================================================

/// A category as served by the remote catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// A product as served by the remote catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: PriceField,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub status: ProductStatus,
}

/// Prices arrive either as display strings (`"$899"`) or as bare numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(serde_json::Number),
}

impl PriceField {
    fn parse(&self) -> Result<Price, PriceParseError> {
        match self {
            Self::Text(text) => Price::parse_display(text),
            Self::Number(number) => {
                let raw = number.to_string();
                let amount = Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map_err(|_| PriceParseError::InvalidAmount(raw.clone()))?;
                Price::checked_amount(amount, &raw)
            }
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            icon: record.icon,
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = PriceParseError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = record.price.parse()?;
        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price,
            image: record.image,
            category_id: record.category_id,
            status: record.status,
        })
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    categories_url: Url,
    products_url: Url,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("categories_url", &self.inner.categories_url.as_str())
            .field("products_url", &self.inner.products_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a client for the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                categories_url: config.categories_url()?,
                products_url: config.products_url()?,
            }),
        })
    }

    /// Fetch both lists concurrently.
    ///
    /// Either both succeed or the whole fetch fails; a half-loaded catalog
    /// is never returned.
    ///
    /// # Errors
    ///
    /// Returns the first error from either request.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        let (categories, products) =
            tokio::try_join!(self.fetch_categories(), self.fetch_products())?;
        Ok(Catalog::new(categories, products))
    }

    /// Fetch the category list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or
    /// malformed JSON.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let records: Vec<CategoryRecord> = self.get_json(&self.inner.categories_url).await?;
        debug!(count = records.len(), "Fetched categories");
        Ok(records.into_iter().map(Category::from).collect())
    }

    /// Fetch the product list.
    ///
    /// Records that do not decode, or whose price cannot be parsed, are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or when
    /// the body is not a JSON array.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let records: Vec<serde_json::Value> = self.get_json(&self.inner.products_url).await?;
        debug!(count = records.len(), "Fetched products");
        Ok(convert_products(records))
    }

    /// GET a URL and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                url = %url,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                url = %url,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

/// Decode and convert raw product records one by one, dropping the ones
/// that are malformed or carry unusable prices.
fn convert_products(records: Vec<serde_json::Value>) -> Vec<Product> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let record = match serde_json::from_value::<ProductRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed product record");
                    return None;
                }
            };

            let id = record.id.clone();
            match Product::try_from(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(product_id = %id, error = %e, "Skipping product with invalid price");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use voltcart_core::CurrencyCode;

    #[test]
    fn test_product_record_from_mock_api_shape() {
        let json = r#"{
            "id": "3",
            "name": "Laptops",
            "description": "14 inch, 16GB",
            "price": "$1,299.50",
            "image": "https://img.example/laptop.png",
            "categoryId": "2",
            "status": "Popular"
        }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        let product = Product::try_from(record).unwrap();

        assert_eq!(product.id, ProductId::new("3"));
        assert_eq!(product.price, Price::from_cents(129_950, CurrencyCode::USD));
        assert_eq!(product.category_id, Some(CategoryId::new("2")));
        assert_eq!(product.status, ProductStatus::Popular);
    }

    #[test]
    fn test_product_record_minimal_fields() {
        let json = r#"{"id": 7, "name": "Cable", "price": 4.5}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        let product = Product::try_from(record).unwrap();

        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price.to_string(), "$4.50");
        assert!(product.category_id.is_none());
        assert_eq!(product.status, ProductStatus::Other);
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_category_record() {
        let json = r#"[{"id": "1", "name": "Smartphone", "icon": "https://img.example/phone.png"}]"#;
        let records: Vec<CategoryRecord> = serde_json::from_str(json).unwrap();
        let category = Category::from(records[0].clone());
        assert_eq!(category.name, "Smartphone");
        assert_eq!(category.id, CategoryId::new("1"));
    }

    #[test]
    fn test_convert_products_skips_bad_prices() {
        let json = r#"[
            {"id": "1", "name": "Good", "price": "$10"},
            {"id": "2", "name": "Bad", "price": "call us"},
            {"id": "3", "name": "Negative", "price": -1},
            {"id": "4", "name": "Null", "price": null},
            {"id": "5", "name": "Missing"},
            {"id": "6", "price": "$5"},
            {"id": "7", "name": "Huge", "price": 1e30},
            "not a product",
            {"id": "8", "name": "Also Good", "price": 2}
        ]"#;
        let records: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
        let products = convert_products(records);

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Good", "Also Good"]);
    }
}
