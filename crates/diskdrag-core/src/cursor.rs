//! Cursor override service.
//!
//! Items ask for a temporary cursor while hovered and restore the previous one
//! when the pointer leaves. Overrides nest like a stack.

pub use winit::window::CursorIcon;

/// Cursor shown while the pointer is over a draggable item.
pub const OPEN_HAND: CursorIcon = CursorIcon::Grab;

/// Push/restore access to the host's cursor.
pub trait CursorService {
    /// Show `icon` until the matching `restore_cursor`.
    fn push_cursor(&mut self, icon: CursorIcon);

    /// Drop the most recent override and show the one beneath it.
    fn restore_cursor(&mut self);

    /// Cursor currently in effect.
    fn current_cursor(&self) -> CursorIcon;
}

/// Stack of cursor overrides on top of a base cursor.
#[derive(Debug, Clone)]
pub struct CursorStack {
    base: CursorIcon,
    overrides: Vec<CursorIcon>,
}

impl Default for CursorStack {
    fn default() -> Self {
        Self::new(CursorIcon::Default)
    }
}

impl CursorStack {
    /// Create a stack with no overrides.
    pub fn new(base: CursorIcon) -> Self {
        Self {
            base,
            overrides: Vec::new(),
        }
    }

    /// Number of active overrides.
    pub fn depth(&self) -> usize {
        self.overrides.len()
    }
}

impl CursorService for CursorStack {
    fn push_cursor(&mut self, icon: CursorIcon) {
        self.overrides.push(icon);
    }

    fn restore_cursor(&mut self) {
        // Restoring with nothing pushed leaves the base cursor alone.
        if self.overrides.pop().is_none() {
            log::warn!("Cursor restore without a matching override");
        }
    }

    fn current_cursor(&self) -> CursorIcon {
        self.overrides.last().copied().unwrap_or(self.base)
    }
}
