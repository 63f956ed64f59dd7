pub mod popup;
pub mod position;
pub mod selection;

pub use popup::{PopupMenu, SelectionCallback, SelectionCallbacks, resolve_popup_menu};
pub use position::{RelativePositionTracker, relative_position};
pub use selection::{SelectionGate, SelectionSet, SelectionState, SelectionTracker};

/// Pointer state used to draw the hover cursor band.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    pointer: Option<(f64, f64)>,
}

impl HoverState {
    #[must_use]
    pub fn pointer(self) -> Option<(f64, f64)> {
        self.pointer
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.pointer.is_some()
    }

    /// Non-finite coordinates are treated as the pointer leaving.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = (x.is_finite() && y.is_finite()).then_some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }
}
