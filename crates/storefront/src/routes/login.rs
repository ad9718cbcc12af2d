//! Login screen.
//!
//! The login form is decorative: it checks no credentials and always lets
//! the shopper through to the catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;
use voltcart_core::navigation::Screen;

use crate::error::Result;
use crate::state::AppState;

/// Login form data. Accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub cart_count: u64,
    pub can_go_back: bool,
}

/// Display the login page. Returning here closes every other screen.
#[instrument(skip(state))]
pub async fn page(State(state): State<AppState>) -> Result<LoginTemplate> {
    state.shell().navigate(Screen::Login)?;

    Ok(LoginTemplate {
        cart_count: state.cart().item_count(),
        can_go_back: state.shell().can_go_back(),
    })
}

/// Enter the catalog.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Redirect> {
    state.shell().navigate(Screen::Catalog)?;
    tracing::info!(has_email = !form.email.is_empty(), "Shopper signed in");
    Ok(Redirect::to(&Screen::Catalog.path()))
}
