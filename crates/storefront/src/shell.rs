//! The shopper's navigation shell: screen stack plus any open dialog.
//!
//! Dialogs mirror the two modal moments of the storefront: confirming the
//! removal of an item's last unit, and acknowledging the (simulated)
//! payment. At most one dialog is open at a time.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;
use voltcart_core::ProductId;
use voltcart_core::navigation::{NavigationError, Navigator, Screen, Transition};

/// A modal dialog on the cart screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// "Remove this product from the cart?" for its last unit.
    ConfirmRemoval(ProductId),
    /// "Payment Successful"; acknowledging it clears the cart.
    PaymentSuccessful,
}

#[derive(Debug, Default)]
struct ShellState {
    navigator: Navigator,
    dialog: Option<Dialog>,
}

/// Cheaply cloneable handle to the navigation shell.
#[derive(Clone, Default)]
pub struct Shell {
    inner: Arc<RwLock<ShellState>>,
}

impl Shell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen on top of the stack.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.read(|state| state.navigator.current().clone())
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.read(|state| state.navigator.can_go_back())
    }

    /// Go to `screen`. Leaving a screen closes any dialog it had open.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::Unreachable` if the screen cannot be reached
    /// from the current one.
    pub fn navigate(&self, screen: Screen) -> Result<Transition, NavigationError> {
        let mut state = self.write();
        let name = screen.name();
        let transition = state.navigator.navigate(screen)?;
        if transition != Transition::Stayed {
            state.dialog = None;
        }
        debug!(screen = name, ?transition, "Navigated");
        Ok(transition)
    }

    /// Pop the current screen and return the one now showing.
    pub fn back(&self) -> Screen {
        let mut state = self.write();
        if state.navigator.back() {
            state.dialog = None;
        }
        state.navigator.current().clone()
    }

    /// The open dialog, if any.
    #[must_use]
    pub fn dialog(&self) -> Option<Dialog> {
        self.read(|state| state.dialog.clone())
    }

    /// Open a dialog, replacing any other.
    pub fn open_dialog(&self, dialog: Dialog) {
        debug!(?dialog, "Dialog opened");
        self.write().dialog = Some(dialog);
    }

    /// Close and return the open dialog.
    pub fn take_dialog(&self) -> Option<Dialog> {
        self.write().dialog.take()
    }

    fn read<R>(&self, f: impl FnOnce(&ShellState) -> R) -> R {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ShellState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
