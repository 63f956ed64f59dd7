use std::fmt;
use std::sync::Arc;

use crate::core::{ContainerSize, RelativePosition};

use super::selection::{SelectionGate, SelectionSet};

/// Host-supplied reaction to a popup menu action.
pub type SelectionCallback = Arc<dyn Fn() + Send + Sync>;

/// Popup menu actions; absent host handlers become no-ops.
#[derive(Clone)]
pub struct SelectionCallbacks {
    pub clear_selection: SelectionCallback,
    pub deny_selection: SelectionCallback,
}

impl SelectionCallbacks {
    #[must_use]
    pub fn from_optional(
        clear_selection: Option<SelectionCallback>,
        deny_selection: Option<SelectionCallback>,
    ) -> Self {
        Self {
            clear_selection: clear_selection.unwrap_or_else(noop_selection_callback),
            deny_selection: deny_selection.unwrap_or_else(noop_selection_callback),
        }
    }
}

impl Default for SelectionCallbacks {
    fn default() -> Self {
        Self::from_optional(None, None)
    }
}

impl fmt::Debug for SelectionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCallbacks").finish_non_exhaustive()
    }
}

fn noop_selection_callback() -> SelectionCallback {
    Arc::new(|| {})
}

/// Model of the context menu offered over the current selection.
///
/// Rendering the widget itself is left to the host.
#[derive(Clone)]
pub struct PopupMenu {
    /// Top-left of the chart container relative to the root container.
    pub anchor: RelativePosition,
    pub container: ContainerSize,
    pub selection: SelectionSet,
    pub callbacks: SelectionCallbacks,
    pub selection_denied: bool,
}

impl PopupMenu {
    pub fn trigger_clear_selection(&self) {
        (self.callbacks.clear_selection)();
    }

    pub fn trigger_deny_selection(&self) {
        (self.callbacks.deny_selection)();
    }
}

impl fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupMenu")
            .field("anchor", &self.anchor)
            .field("container", &self.container)
            .field("selection", &self.selection)
            .field("selection_denied", &self.selection_denied)
            .finish_non_exhaustive()
    }
}

/// Builds the popup menu model; `None` when hidden or not yet anchored.
#[must_use]
pub fn resolve_popup_menu(
    show: bool,
    position: Option<RelativePosition>,
    container: ContainerSize,
    selection: &SelectionSet,
    callbacks: &SelectionCallbacks,
    gate: SelectionGate,
) -> Option<PopupMenu> {
    if !show {
        return None;
    }
    let anchor = position?;
    Some(PopupMenu {
        anchor,
        container,
        selection: selection.clone(),
        callbacks: callbacks.clone(),
        selection_denied: gate == SelectionGate::Denied,
    })
}
