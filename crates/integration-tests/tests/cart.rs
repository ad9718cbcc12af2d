//! Integration tests for the cart screen and checkout.

use reqwest::StatusCode;
use voltcart_core::navigation::Screen;
use voltcart_core::{ProductId, Quantity};
use voltcart_integration_tests::{MockCatalog, TestContext};

async fn logged_in() -> TestContext {
    let ctx = TestContext::start(MockCatalog::electronics()).await;
    ctx.login().await;
    ctx
}

#[tokio::test]
async fn test_add_merges_lines_and_totals() {
    let ctx = logged_in().await;

    let (status, body) = ctx.post("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("My Cart"));
    assert!(body.contains("Total: $12.00"));

    ctx.post("/cart/add", &[("product_id", "3"), ("quantity", "3")])
        .await;
    let (_, body) = ctx.post("/cart/add", &[("product_id", "2")]).await;

    assert!(body.contains("Total: $40.50"));
    let cart = ctx.state.cart().snapshot();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 5);
    assert_eq!(
        cart.lines().first().map(|line| &line.product.id),
        Some(&ProductId::new("2"))
    );
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let ctx = logged_in().await;

    let resp = ctx
        .post_raw("/cart/add", &[("product_id", "2"), ("quantity", "0")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ctx.post_raw("/cart/add", &[("product_id", "404")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert!(ctx.state.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_add_before_login_is_refused() {
    let ctx = TestContext::start(MockCatalog::electronics()).await;

    let resp = ctx.post_raw("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(ctx.state.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_increment_and_decrement() {
    let ctx = logged_in().await;
    let id = ProductId::new("2");
    ctx.post("/cart/add", &[("product_id", "2"), ("quantity", "2")])
        .await;

    ctx.post("/cart/increment", &[("product_id", "2")]).await;
    assert_eq!(ctx.state.cart().quantity_of(&id), Quantity::new(3).ok());

    ctx.post("/cart/decrement", &[("product_id", "2")]).await;
    ctx.post("/cart/decrement", &[("product_id", "2")]).await;
    assert_eq!(ctx.state.cart().quantity_of(&id), Some(Quantity::ONE));

    let resp = ctx.post_raw("/cart/increment", &[("product_id", "3")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (status, _) = ctx.post("/cart/decrement", &[("product_id", "3")]).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_last_unit_needs_confirmation() {
    let ctx = logged_in().await;
    let id = ProductId::new("2");
    ctx.post("/cart/add", &[("product_id", "2")]).await;

    let (_, body) = ctx.post("/cart/decrement", &[("product_id", "2")]).await;
    assert!(body.contains("Remove Headphones from the cart?"));
    assert_eq!(ctx.state.cart().quantity_of(&id), Some(Quantity::ONE));

    let (_, body) = ctx.post("/cart/removal/cancel", &[]).await;
    assert!(!body.contains("from the cart?"));
    assert_eq!(ctx.state.cart().quantity_of(&id), Some(Quantity::ONE));

    ctx.post("/cart/decrement", &[("product_id", "2")]).await;
    let (_, body) = ctx.post("/cart/removal/confirm", &[]).await;
    assert!(body.contains("Your cart is empty"));
    assert!(ctx.state.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_checkout_flow() {
    let ctx = logged_in().await;
    let (status, _) = ctx.get("/cart").await;
    assert_eq!(status, StatusCode::OK);

    let resp = ctx.post_raw("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    ctx.post("/cart/add", &[("product_id", "1")]).await;
    let (status, body) = ctx.post("/cart/checkout", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Payment Successful"));
    assert!(!ctx.state.cart().snapshot().is_empty());

    let (_, body) = ctx.post("/cart/checkout/acknowledge", &[]).await;
    assert!(!body.contains("Payment Successful"));
    assert!(body.contains("Total: $0.00"));
    assert!(ctx.state.cart().snapshot().is_empty());
}

#[tokio::test]
async fn test_cart_intents_need_cart_screen() {
    let ctx = logged_in().await;
    ctx.post("/cart/add", &[("product_id", "2")]).await;
    ctx.get("/catalog").await;
    assert_eq!(ctx.state.shell().current(), Screen::Catalog);

    let resp = ctx.post_raw("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(ctx.state.shell().dialog(), None);

    let resp = ctx.post_raw("/cart/increment", &[("product_id", "2")]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = ctx.post_raw("/cart/decrement", &[("product_id", "2")]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(ctx.state.cart().quantity_of(&ProductId::new("2")), Some(Quantity::ONE));

    ctx.get("/login").await;
    let resp = ctx.post_raw("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_add_rejects_oversized_quantity() {
    let ctx = logged_in().await;

    for quantity in ["10000", "4294967295"] {
        let resp = ctx
            .post_raw("/cart/add", &[("product_id", "1"), ("quantity", quantity)])
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert!(ctx.state.cart().snapshot().is_empty());

    ctx.post("/cart/add", &[("product_id", "1"), ("quantity", "9999")])
        .await;
    let (_, body) = ctx.post("/cart/add", &[("product_id", "1"), ("quantity", "9999")]).await;
    assert!(body.contains("Total: $8989101.00"));
    assert_eq!(
        ctx.state.cart().quantity_of(&ProductId::new("1")),
        Some(Quantity::MAX)
    );
}
