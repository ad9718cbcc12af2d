//! Screen-stack route handlers.

use axum::{extract::State, response::Redirect};
use tracing::instrument;

use crate::state::AppState;

/// Redirect to whatever screen is on top of the stack.
#[instrument(skip(state))]
pub async fn current(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.shell().current().path())
}

/// Pop the current screen.
#[instrument(skip(state))]
pub async fn back(State(state): State<AppState>) -> Redirect {
    let screen = state.shell().back();
    Redirect::to(&screen.path())
}
