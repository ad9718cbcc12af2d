//! Integration tests for background catalog loads against a live mock API.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use voltcart_integration_tests::{MockCatalog, TestContext};
use voltcart_storefront::catalog::{CatalogStatus, CatalogStore};

#[tokio::test]
async fn test_dropping_load_cancels_fetch() {
    let client = MockCatalog::Slow(Duration::from_secs(10)).client().await;
    let store = CatalogStore::new();

    let load = store.load_in_background(client);
    assert_eq!(store.status(), CatalogStatus::Loading);

    drop(load);
    assert_eq!(
        store.status(),
        CatalogStatus::Failed("catalog load cancelled".to_string())
    );
    assert!(store.snapshot().catalog.is_empty());
}

#[tokio::test]
async fn test_newer_load_supersedes_slower_one() {
    let slow = MockCatalog::Slow(Duration::from_millis(300)).client().await;
    let fast = MockCatalog::empty().client().await;
    let store = CatalogStore::new();

    let stale = store.load_in_background(slow);
    let fresh = store.load_in_background(fast);

    assert_eq!(fresh.wait().await, CatalogStatus::Ready);
    assert!(store.snapshot().catalog.is_empty());

    // The slow fetch still completes, but its result must not land.
    assert_eq!(stale.wait().await, CatalogStatus::Ready);
    assert!(store.snapshot().catalog.is_empty());
}

#[tokio::test]
async fn test_restarting_load_aborts_previous() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    ctx.state.start_catalog_load();
    ctx.state.start_catalog_load();

    let status = ctx
        .state
        .take_catalog_load()
        .expect("Catalog load was not started")
        .wait()
        .await;
    assert_eq!(status, CatalogStatus::Ready);
    assert_eq!(ctx.state.catalog().snapshot().catalog.products.len(), 6);
}

#[tokio::test]
async fn test_reload_recovers_from_failed_load() {
    let healthy = Arc::new(AtomicBool::new(false));
    let ctx = TestContext::start(MockCatalog::Switchable(Arc::clone(&healthy))).await;
    ctx.login().await;

    let (_, body) = ctx.get("/catalog").await;
    assert!(body.contains("Could not load the catalog"));

    healthy.store(true, Ordering::SeqCst);
    let resp = ctx.post_raw("/catalog/reload", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let status = ctx
        .state
        .take_catalog_load()
        .expect("Reload did not start a catalog load")
        .wait()
        .await;
    assert_eq!(status, CatalogStatus::Ready);

    let (status, body) = ctx.get("/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Could not load the catalog"));
    assert!(body.contains("Headphones"));
}

#[tokio::test]
async fn test_failed_load_is_a_gateway_error_for_products() {
    let ctx = TestContext::start(MockCatalog::Broken).await;
    ctx.login().await;

    let (status, _) = ctx.get("/catalog/products/1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let resp = ctx.post_raw("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(ctx.state.cart().snapshot().is_empty());
}
