use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::surface::RenderSurface;

/// Open/closed state of the collapsible navigation menu on narrow layouts.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: AtomicBool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Flips the menu and returns the new state.
    pub fn toggle(&self, surface: &dyn RenderSurface) -> bool {
        let open = !self.open.fetch_xor(true, Ordering::SeqCst);
        debug!(open, "menu: toggled");
        surface.set_menu_open(open);
        open
    }

    /// Closes the menu. Returns whether it was open.
    pub fn close(&self, surface: &dyn RenderSurface) -> bool {
        let was_open = self.open.swap(false, Ordering::SeqCst);
        if was_open {
            debug!("menu: closed");
            surface.set_menu_open(false);
        }
        was_open
    }
}
