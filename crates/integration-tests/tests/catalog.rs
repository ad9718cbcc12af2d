//! Integration tests for the catalog screens.

use reqwest::StatusCode;
use serde_json::json;
use voltcart_core::navigation::Screen;
use voltcart_integration_tests::{MockCatalog, TestContext};
use voltcart_storefront::catalog::CatalogStatus;

#[tokio::test]
async fn test_health_and_readiness() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_catalog_shows_preview_then_all() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;
    ctx.login().await;

    let (status, body) = ctx.get("/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Smartphone"));
    assert!(body.contains("Best Sales"));
    assert!(body.contains("See all (2 more)"));
    assert!(!body.contains("Cable"));

    let (_, body) = ctx.get("/catalog?all=true").await;
    assert!(body.contains("Cable"));
    assert!(body.contains("See less"));
}

#[tokio::test]
async fn test_category_matches_product_names() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let (status, body) = ctx.get("/catalog?category=1&all=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$899.00"));
    assert!(body.contains("$399.00"));
    assert!(!body.contains("Smartphone Mini"));
    assert!(!body.contains("Earbuds"));
}

#[tokio::test]
async fn test_unknown_category_is_ignored() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let (status, body) = ctx.get("/catalog?category=99&all=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Earbuds"));
    assert!(body.contains("Cable"));
}

#[tokio::test]
async fn test_status_and_search_facets() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let (_, body) = ctx.get("/catalog?status=popular&all=true").await;
    assert!(body.contains("Earbuds"));
    assert!(body.contains("$399.00"));
    assert!(!body.contains("Cable"));
    assert!(!body.contains("Smartphone Mini"));

    let (_, body) = ctx.get("/catalog?q=SMART&all=true").await;
    assert!(body.contains("Smartphone Mini"));
    assert!(!body.contains("Earbuds"));

    let (_, body) = ctx.get("/catalog?status=popular&q=ear").await;
    assert!(body.contains("Earbuds"));
    assert!(!body.contains("$12.00"));
}

#[tokio::test]
async fn test_invalid_status_is_bad_request() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let (status, _) = ctx.get("/catalog?status=clearance").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.state.shell().current(), Screen::Login);
}

#[tokio::test]
async fn test_search_keeps_whitespace() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let (_, body) = ctx.get("/catalog?q=+Mini&all=true").await;
    assert!(body.contains("Smartphone Mini"));
    assert!(!body.contains("Earbuds"));

    let (_, body) = ctx.get("/catalog?q=Mini+&all=true").await;
    assert!(body.contains("No products found"));
}

#[tokio::test]
async fn test_empty_catalog_shows_no_products() {
    let ctx = TestContext::start(MockCatalog::empty()).await;
    assert_eq!(ctx.state.catalog().status(), CatalogStatus::Ready);

    let (status, body) = ctx.get("/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found"));
    assert!(!body.contains("chip"));
}

#[tokio::test]
async fn test_failed_load_offers_retry() {
    let ctx = TestContext::start(MockCatalog::Broken).await;
    assert!(ctx.state.catalog().status().error().is_some());

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = ctx.get("/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Could not load the catalog"));
    assert!(body.contains("Retry"));
    assert!(body.contains("No products found"));

    let (status, _) = ctx.post("/catalog/reload", &[]).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unparseable_prices_are_skipped() {
    let ctx = TestContext::start(MockCatalog::Serve {
        categories: json!([]),
        products: json!([
            { "id": "1", "name": "Radio", "price": "$20.00", "status": "Popular" },
            { "id": "2", "name": "Mystery Box", "price": "call us", "status": "Popular" }
        ]),
    })
    .await;

    assert!(ctx.state.catalog().is_ready());
    let (_, body) = ctx.get("/catalog").await;
    assert!(body.contains("Radio"));
    assert!(!body.contains("Mystery Box"));
}

#[tokio::test]
async fn test_product_detail_lists_related() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;
    ctx.login().await;

    let (status, body) = ctx.get("/catalog/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("6.1 inch display"));
    assert!(body.contains("You may also like"));
    assert!(body.contains("Smartphone Mini"));
    assert!(!body.contains("Earbuds"));

    let (status, _) = ctx.get("/catalog/products/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
