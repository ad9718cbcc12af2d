//! Catalog screen and product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use url::form_urlencoded;
use voltcart_core::catalog::{CategoryMatch, ProductFilter};
use voltcart_core::navigation::Screen;
use voltcart_core::{CategoryId, Product, ProductId, ProductStatus};

use crate::catalog::{CatalogError, CatalogSnapshot, CatalogStatus};
use crate::error::{AppError, Result};
use crate::routes::views::ProductView;
use crate::state::AppState;

/// Related products shown under a product.
const RELATED_LIMIT: usize = 4;

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub all: bool,
}

/// Category chip display data.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub icon: String,
    pub href: String,
    pub selected: bool,
}

/// Status tab display data.
#[derive(Clone)]
pub struct TabView {
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub cart_count: u64,
    pub can_go_back: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub categories: Vec<CategoryView>,
    pub tabs: Vec<TabView>,
    pub search: String,
    pub selected_category: Option<String>,
    pub selected_status: Option<String>,
    pub products: Vec<ProductView>,
    /// Number of products hidden by the preview limit.
    pub hidden_count: usize,
    pub toggle_href: String,
    pub show_all: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/product.html")]
pub struct ProductTemplate {
    pub cart_count: u64,
    pub can_go_back: bool,
    pub product: ProductView,
    pub in_cart: u32,
    pub related: Vec<ProductView>,
}

/// The facets a catalog page was asked for, after validation.
struct Selection {
    category: Option<CategoryId>,
    status: Option<ProductStatus>,
    search: String,
    all: bool,
}

impl Selection {
    /// Build the catalog URL for this selection.
    fn href(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = &self.category {
            query.append_pair("category", category.as_str());
        }
        if let Some(status) = self.status {
            query.append_pair("status", status.slug());
        }
        if !self.search.is_empty() {
            query.append_pair("q", &self.search);
        }
        if self.all {
            query.append_pair("all", "true");
        }

        let query = query.finish();
        if query.is_empty() {
            Screen::Catalog.path()
        } else {
            format!("{}?{query}", Screen::Catalog.path())
        }
    }

    /// Href selecting `category`, or clearing it if it is already selected.
    fn toggle_category(&self, category: &CategoryId) -> String {
        let next = if self.category.as_ref() == Some(category) {
            None
        } else {
            Some(category.clone())
        };
        Self {
            category: next,
            search: self.search.clone(),
            ..*self
        }
        .href()
    }

    fn with_status(&self, status: ProductStatus) -> String {
        let next = if self.status == Some(status) {
            None
        } else {
            Some(status)
        };
        Self {
            category: self.category.clone(),
            status: next,
            search: self.search.clone(),
            ..*self
        }
        .href()
    }

    fn toggle_all(&self) -> String {
        Self {
            category: self.category.clone(),
            search: self.search.clone(),
            all: !self.all,
            ..*self
        }
        .href()
    }
}

/// Display the catalog screen.
///
/// Unknown categories are ignored; an unrecognised status tab is a bad
/// request.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Response> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<ProductStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    if let Err(e) = state.shell().navigate(Screen::Catalog) {
        tracing::debug!(error = %e, "Catalog not reachable, staying put");
        return Ok(Redirect::to(&state.shell().current().path()).into_response());
    }

    let snapshot = state.catalog().snapshot();
    let catalog = &snapshot.catalog;
    let config = &state.config().catalog;

    let category = query
        .category
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|id| catalog.category(&CategoryId::new(id)));

    let selection = Selection {
        category: category.map(|c| c.id.clone()),
        status,
        search: query.q.unwrap_or_default(),
        all: query.all,
    };

    let mut filter = ProductFilter::default().with_search(selection.search.clone());
    if let Some(category) = category {
        filter = filter.with_category(CategoryMatch::for_category(category, config.category_match));
    }
    if let Some(status) = status {
        filter = filter.with_status(status);
    }

    let matched = catalog.filter(&filter);
    let shown = if selection.all {
        matched.len()
    } else {
        matched.len().min(config.preview_limit)
    };

    let categories = catalog
        .categories
        .iter()
        .map(|c| CategoryView {
            name: c.name.clone(),
            icon: c.icon.clone(),
            href: selection.toggle_category(&c.id),
            selected: selection.category.as_ref() == Some(&c.id),
        })
        .collect();

    let tabs = ProductStatus::TABS
        .iter()
        .map(|&tab| TabView {
            label: tab.label(),
            href: selection.with_status(tab),
            selected: status == Some(tab),
        })
        .collect();

    Ok(CatalogTemplate {
        cart_count: state.cart().item_count(),
        can_go_back: state.shell().can_go_back(),
        loading: matches!(snapshot.status, CatalogStatus::Idle | CatalogStatus::Loading),
        error: snapshot.status.error().map(str::to_string),
        categories,
        tabs,
        search: selection.search.clone(),
        selected_category: category.map(|c| c.name.clone()),
        selected_status: status.map(|s| s.label().to_string()),
        products: matched.iter().take(shown).map(|&p| ProductView::from(p)).collect(),
        hidden_count: matched.len() - shown,
        toggle_href: selection.toggle_all(),
        show_all: selection.all,
    }
    .into_response())
}

/// Start a fresh catalog load, then return to the catalog.
#[instrument(skip(state))]
pub async fn reload(State(state): State<AppState>) -> Redirect {
    state.start_catalog_load();
    Redirect::to(&Screen::Catalog.path())
}

/// Look up a product, telling a missing product apart from a failed load.
pub(super) fn find_product<'a>(
    snapshot: &'a CatalogSnapshot,
    product_id: &ProductId,
) -> Result<&'a Product> {
    if let Some(product) = snapshot.catalog.product(product_id) {
        return Ok(product);
    }

    match &snapshot.status {
        CatalogStatus::Failed(message) => Err(CatalogError::Unavailable(message.clone()).into()),
        _ => Err(AppError::NotFound(format!("Product {product_id}"))),
    }
}

/// Display a product with related products from its category.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let product_id = ProductId::new(id);
    let snapshot = state.catalog().snapshot();
    let catalog = &snapshot.catalog;

    let product = find_product(&snapshot, &product_id)?;

    if let Err(e) = state.shell().navigate(Screen::ProductDetail(product_id.clone())) {
        tracing::debug!(error = %e, "Product detail not reachable, staying put");
        return Ok(Redirect::to(&state.shell().current().path()).into_response());
    }

    let related = catalog
        .related(product, RELATED_LIMIT)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductTemplate {
        cart_count: state.cart().item_count(),
        can_go_back: state.shell().can_go_back(),
        product: ProductView::from(product),
        in_cart: state.cart().quantity_of(&product_id).map_or(0, |q| q.get()),
        related,
    }
    .into_response())
}
