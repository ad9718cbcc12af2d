//! Integration tests for VoltCart.
//!
//! Each test spawns a mock catalog API and a storefront on ephemeral ports
//! and drives the storefront over HTTP, exactly as a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p voltcart-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use voltcart_storefront::catalog::{CatalogClient, CatalogStatus};
use voltcart_storefront::config::StorefrontConfig;
use voltcart_storefront::state::AppState;

/// What the mock catalog API answers with.
#[derive(Debug, Clone)]
pub enum MockCatalog {
    /// Serve these category and product arrays.
    Serve { categories: Value, products: Value },
    /// Answer every request with 500.
    Broken,
    /// Serve [`MockCatalog::electronics`] after holding each request for a while.
    Slow(Duration),
    /// Answer 500 until the flag is set, then serve [`MockCatalog::electronics`].
    Switchable(Arc<AtomicBool>),
}

impl MockCatalog {
    /// Two categories and six products across every status tab.
    #[must_use]
    pub fn electronics() -> Self {
        Self::Serve {
            categories: json!([
                { "id": "1", "name": "Smartphone", "icon": "https://cdn.example.com/phone.png" },
                { "id": "2", "name": "Headphones", "icon": "https://cdn.example.com/audio.png" }
            ]),
            products: json!([
                {
                    "id": "1", "name": "Smartphone", "description": "6.1 inch display",
                    "price": "$899.00", "image": "", "status": "Best Sales", "categoryId": "1"
                },
                {
                    "id": "2", "name": "Headphones", "description": "Noise cancelling",
                    "price": "$12.00", "image": "", "status": "Popular", "categoryId": "2"
                },
                {
                    "id": "3", "name": "Smartphone Mini", "description": "5.4 inch display",
                    "price": "$5.50", "image": "", "status": "Best Matched", "categoryId": "1"
                },
                {
                    "id": "4", "name": "Earbuds", "description": "Wireless",
                    "price": 49.5, "image": "", "status": "Popular", "categoryId": "2"
                },
                {
                    "id": "5", "name": "Smartphone", "description": "Refurbished",
                    "price": "$399.00", "image": "", "status": "Popular", "categoryId": "1"
                },
                {
                    "id": "6", "name": "Cable", "description": "USB-C",
                    "price": "$3.00", "image": "", "status": "Best Sales", "categoryId": "2"
                }
            ]),
        }
    }

    /// A reachable API with nothing in it.
    #[must_use]
    pub fn empty() -> Self {
        Self::Serve {
            categories: json!([]),
            products: json!([]),
        }
    }

    fn router(self) -> Router {
        match self {
            Self::Serve {
                categories,
                products,
            } => Router::new()
                .route(
                    "/categoriesOfElectronic",
                    get(move || async move { Json(categories) }),
                )
                .route(
                    "/productsOfElectronics",
                    get(move || async move { Json(products) }),
                ),
            Self::Broken => Router::new().fallback(broken),
            Self::Slow(delay) => Self::electronics().router().layer(middleware::from_fn(
                move |req: Request, next: Next| async move {
                    tokio::time::sleep(delay).await;
                    next.run(req).await
                },
            )),
            Self::Switchable(healthy) => Self::electronics().router().layer(middleware::from_fn(
                move |req: Request, next: Next| {
                    let healthy = Arc::clone(&healthy);
                    async move {
                        if healthy.load(Ordering::SeqCst) {
                            next.run(req).await
                        } else {
                            broken().await
                        }
                    }
                },
            )),
        }
    }

    /// Serve this mock on an ephemeral port and return a storefront
    /// configuration pointing at it.
    pub async fn spawn(self) -> StorefrontConfig {
        let catalog_addr = serve(self.router()).await;
        let catalog_url = format!("http://{catalog_addr}/");

        StorefrontConfig::from_lookup(|key| match key {
            "CATALOG_API_URL" => Some(catalog_url.clone()),
            "CATALOG_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .expect("Failed to build test configuration")
    }

    /// Serve this mock and return a catalog client for it.
    pub async fn client(self) -> CatalogClient {
        let config = self.spawn().await;
        CatalogClient::new(&config.catalog).expect("Failed to build catalog client")
    }
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response()
}

/// A running storefront plus clients to talk to it.
///
/// The storefront serves a single shopper, so no cookies are involved.
pub struct TestContext {
    pub state: AppState,
    pub base_url: String,
    /// Follows redirects, like a browser.
    pub client: Client,
    /// Returns redirects as-is.
    pub raw: Client,
}

impl TestContext {
    /// Spawn a mock catalog and a storefront, and wait for the catalog load.
    pub async fn start(mock: MockCatalog) -> Self {
        let config = mock.spawn().await;
        let state = AppState::new(config).expect("Failed to build application state");
        state.start_catalog_load();
        let status = state
            .take_catalog_load()
            .expect("Catalog load was not started")
            .wait()
            .await;
        assert_ne!(status, CatalogStatus::Loading);

        let addr = serve(voltcart_storefront::app(state.clone())).await;

        Self {
            state,
            base_url: format!("http://{addr}"),
            client: Client::new(),
            raw: Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page and return its status and body.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read response"))
    }

    /// POST a form, following the redirect, and return status and body.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read response"))
    }

    /// POST a form without following redirects.
    pub async fn post_raw(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.raw
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Request failed")
    }

    /// Sign in and land on the catalog.
    pub async fn login(&self) {
        let (status, body) = self.post("/login", &[("email", "shopper@example.com")]).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert!(body.contains("Catalog"));
    }
}

/// Serve `router` on an ephemeral local port.
async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });
    addr
}
