//! Cart route handlers.
//!
//! Every cart intent is a form post answered with a redirect back to the
//! cart page, which renders the cart together with any open dialog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use voltcart_core::cart::RemoveOutcome;
use voltcart_core::navigation::{NavigationError, Screen};
use voltcart_core::{ProductId, Quantity};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::catalog::find_product;
use crate::routes::views::{CartLineView, ProductView};
use crate::shell::Dialog;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    /// Units to add; one when omitted.
    pub quantity: Option<u32>,
}

/// Form naming a single cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: u64,
    pub can_go_back: bool,
    pub lines: Vec<CartLineView>,
    pub total: String,
    /// Product awaiting removal confirmation.
    pub confirm_removal: Option<ProductView>,
    pub payment_successful: bool,
}

fn cart_page() -> Redirect {
    Redirect::to(&Screen::Cart.path())
}

/// Cart intents other than adding are only accepted on the cart screen.
fn require_cart_screen(state: &AppState) -> Result<()> {
    let current = state.shell().current();
    if current == Screen::Cart {
        Ok(())
    } else {
        Err(NavigationError::Unreachable {
            from: current.name(),
            to: Screen::Cart.name(),
        }
        .into())
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    if let Err(e) = state.shell().navigate(Screen::Cart) {
        tracing::debug!(error = %e, "Cart not reachable, staying put");
        return Redirect::to(&state.shell().current().path()).into_response();
    }

    let dialog = state.shell().dialog();
    let cart = state.cart().snapshot();

    let confirm_removal = match &dialog {
        Some(Dialog::ConfirmRemoval(id)) => cart.line(id).map(|line| ProductView::from(&line.product)),
        _ => None,
    };

    CartShowTemplate {
        cart_count: cart.item_count(),
        can_go_back: state.shell().can_go_back(),
        lines: cart.lines().iter().map(CartLineView::from).collect(),
        total: cart.total().to_string(),
        confirm_removal,
        payment_successful: dialog == Some(Dialog::PaymentSuccessful),
    }
    .into_response()
}

/// Add a catalog product to the cart, then show the cart.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let quantity = Quantity::new(form.quantity.unwrap_or(1))?;
    let product_id = ProductId::new(form.product_id);

    let snapshot = state.catalog().snapshot();
    let product = find_product(&snapshot, &product_id)?.clone();

    state.shell().navigate(Screen::Cart)?;
    state.cart().add(product, quantity);

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("product_id", product_id.as_str()),
            ("quantity", quantity.to_string().as_str()),
        ]),
    );

    Ok(cart_page())
}

/// Add one more unit of a line already in the cart.
#[instrument(skip(state))]
pub async fn increment(State(state): State<AppState>, Form(form): Form<LineForm>) -> Result<Redirect> {
    require_cart_screen(&state)?;
    let product_id = ProductId::new(form.product_id);

    let product = state
        .cart()
        .read(|cart| cart.line(&product_id).map(|line| line.product.clone()))
        .ok_or_else(|| AppError::NotFound(format!("Cart line {product_id}")))?;

    state.cart().add(product, Quantity::ONE);
    Ok(cart_page())
}

/// Take one unit off a line. The last unit asks for confirmation first.
#[instrument(skip(state))]
pub async fn decrement(State(state): State<AppState>, Form(form): Form<LineForm>) -> Result<Redirect> {
    require_cart_screen(&state)?;
    let product_id = ProductId::new(form.product_id);

    match state.cart().quantity_of(&product_id) {
        Some(quantity) if quantity == Quantity::ONE => {
            state.shell().open_dialog(Dialog::ConfirmRemoval(product_id));
        }
        Some(_) => {
            state.cart().remove_one(&product_id);
        }
        None => {
            tracing::debug!(product_id = %product_id, "Decrement for product not in cart");
        }
    }

    Ok(cart_page())
}

/// Remove the product awaiting confirmation.
#[instrument(skip(state))]
pub async fn confirm_removal(State(state): State<AppState>) -> Redirect {
    if let Some(Dialog::ConfirmRemoval(product_id)) = state.shell().dialog() {
        state.shell().take_dialog();
        if state.cart().remove_one(&product_id) == RemoveOutcome::Removed {
            add_breadcrumb(
                "cart",
                "Removed from cart",
                Some(&[("product_id", product_id.as_str())]),
            );
        }
    }

    cart_page()
}

/// Keep the product awaiting confirmation.
#[instrument(skip(state))]
pub async fn cancel_removal(State(state): State<AppState>) -> Redirect {
    if matches!(state.shell().dialog(), Some(Dialog::ConfirmRemoval(_))) {
        state.shell().take_dialog();
    }

    cart_page()
}

/// Simulated payment for the whole cart.
///
/// No payment is taken; the shopper is shown a success dialog. Only
/// accepted from the cart screen.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Redirect> {
    require_cart_screen(&state)?;
    let (items, total) = state
        .cart()
        .read(|cart| (cart.item_count(), cart.total()));

    if items == 0 {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    state.shell().open_dialog(Dialog::PaymentSuccessful);
    tracing::info!(items, total = %total, "Payment successful");
    add_breadcrumb("cart", "Checked out", Some(&[("total", total.to_string().as_str())]));

    Ok(cart_page())
}

/// Dismiss the payment dialog and empty the cart.
#[instrument(skip(state))]
pub async fn acknowledge_payment(State(state): State<AppState>) -> Redirect {
    if state.shell().dialog() == Some(Dialog::PaymentSuccessful) {
        state.shell().take_dialog();
        state.cart().clear();
    }

    cart_page()
}
