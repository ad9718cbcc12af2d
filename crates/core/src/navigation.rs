//! Screen stack.
//!
//! The storefront is a linear stack of screens rooted at the login screen:
//!
//! ```text
//! Login -> Catalog <-> Cart
//!             |         ^
//!             v         |
//!        ProductDetail -+
//! ```
//!
//! Navigating to a screen that is already on the stack pops back to it, the
//! same as tapping a tab that is already open. Anything else is pushed, but
//! only along the edges above.

use thiserror::Error;

use crate::types::ProductId;

/// A screen the shopper can be on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Catalog,
    ProductDetail(ProductId),
    Cart,
}

impl Screen {
    /// Path of the page that renders this screen.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Catalog => "/catalog".to_string(),
            Self::ProductDetail(id) => format!("/catalog/products/{id}"),
            Self::Cart => "/cart".to_string(),
        }
    }

    /// Short name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Catalog => "catalog",
            Self::ProductDetail(_) => "product_detail",
            Self::Cart => "cart",
        }
    }

    /// Whether a push from `self` to `to` is a valid transition.
    fn can_push(&self, to: &Self) -> bool {
        matches!(
            (self, to),
            (Self::Login, Self::Catalog)
                | (Self::Catalog | Self::ProductDetail(_), Self::Cart | Self::ProductDetail(_))
        )
    }
}

/// Navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot navigate from {from} to {to}")]
    Unreachable {
        from: &'static str,
        to: &'static str,
    },
}

/// What a successful `navigate` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Already on that screen.
    Stayed,
    /// A new screen was pushed.
    Pushed,
    /// Popped this many screens to return to an earlier one.
    Popped(usize),
}

static ROOT: Screen = Screen::Login;

/// The stack of open screens. Never empty; the bottom is always `Login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// A navigator showing the login screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Login],
        }
    }

    /// The screen on top of the stack.
    #[must_use]
    pub fn current(&self) -> &Screen {
        self.stack.last().unwrap_or(&ROOT)
    }

    /// Number of open screens.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Open screens, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Whether `back` would do anything.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Go to `screen`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::Unreachable` if `screen` is not on the stack
    /// and cannot be pushed from the current screen.
    pub fn navigate(&mut self, screen: Screen) -> Result<Transition, NavigationError> {
        if let Some(index) = self.stack.iter().rposition(|s| s == &screen) {
            let popped = self.stack.len() - index - 1;
            self.stack.truncate(index + 1);
            return Ok(if popped == 0 {
                Transition::Stayed
            } else {
                Transition::Popped(popped)
            });
        }

        let current = self.current();
        if !current.can_push(&screen) {
            return Err(NavigationError::Unreachable {
                from: current.name(),
                to: screen.name(),
            });
        }

        self.stack.push(screen);
        Ok(Transition::Pushed)
    }

    /// Pop the top screen. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}
