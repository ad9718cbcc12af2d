//! Display data shared by the screen templates.

use voltcart_core::Product;
use voltcart_core::cart::CartLineItem;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub status: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            status: product.status.label().to_string(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLineItem> for CartLineView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product: ProductView::from(&line.product),
            quantity: line.quantity.get(),
            line_total: line.line_total().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use voltcart_core::{CurrencyCode, Price, ProductId, ProductStatus, Quantity};

    use super::*;

    #[test]
    fn test_cart_line_view_formats_money() {
        let line = CartLineItem {
            product: Product {
                id: ProductId::new("5"),
                name: "Tablet".to_string(),
                description: "10 inch".to_string(),
                price: Price::from_cents(550, CurrencyCode::USD),
                image: String::new(),
                category_id: None,
                status: ProductStatus::BestMatched,
            },
            quantity: Quantity::ONE.saturating_add(Quantity::ONE),
        };

        let view = CartLineView::from(&line);
        assert_eq!(view.product.price, "$5.50");
        assert_eq!(view.product.status, "Best Matched");
        assert_eq!(view.quantity, 2);
        assert_eq!(view.line_total, "$11.00");
    }
}
