//! HTTP route handlers for the storefront.
//!
//! Every screen is a server-rendered page; user intents are form posts that
//! answer with a redirect to the screen that should now be showing.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Redirect to the current screen
//! POST /back                        - Back navigation
//!
//! # Login
//! GET  /login                       - Login page
//! POST /login                       - Enter the catalog
//!
//! # Catalog
//! GET  /catalog                     - Catalog (?category=&status=&q=&all=)
//! POST /catalog/reload              - Retry the catalog fetch
//! GET  /catalog/products/{id}       - Product detail
//!
//! # Cart
//! GET  /cart                        - Cart page
//! POST /cart/add                    - Add to cart, then show the cart
//! POST /cart/increment              - One more unit of a line
//! POST /cart/decrement              - One fewer unit (confirms the last one)
//! POST /cart/removal/confirm        - Confirm removing the last unit
//! POST /cart/removal/cancel         - Keep the last unit
//! POST /cart/checkout               - Simulated payment
//! POST /cart/checkout/acknowledge   - Dismiss payment dialog, clear cart
//! ```

pub mod cart;
pub mod catalog;
pub mod login;
pub mod navigation;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/reload", post(catalog::reload))
        .route("/products/{id}", get(catalog::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/removal/confirm", post(cart::confirm_removal))
        .route("/removal/cancel", post(cart::cancel_removal))
        .route("/checkout", post(cart::checkout))
        .route("/checkout/acknowledge", post(cart::acknowledge_payment))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(navigation::current))
        .route("/back", post(navigation::back))
        .route("/login", get(login::page).post(login::login))
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
}
