use std::fmt;
use std::sync::Arc;

use crate::core::BinId;
use crate::interaction::{SelectionCallback, SelectionCallbacks};

/// Bar hit by a click inside the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarClick {
    pub bin: BinId,
    pub index: usize,
    pub value: f64,
}

pub type BarClickCallback = Arc<dyn Fn(BarClick) + Send + Sync + 'static>;

/// Host callbacks; every absent handler is replaced with a no-op.
#[derive(Clone)]
pub struct HistogramCallbacks {
    pub on_bar_click: BarClickCallback,
    pub selection: SelectionCallbacks,
}

impl HistogramCallbacks {
    #[must_use]
    pub fn from_optional(
        on_bar_click: Option<BarClickCallback>,
        clear_selection: Option<SelectionCallback>,
        deny_selection: Option<SelectionCallback>,
    ) -> Self {
        Self {
            on_bar_click: on_bar_click.unwrap_or_else(|| Arc::new(|_| {})),
            selection: SelectionCallbacks::from_optional(clear_selection, deny_selection),
        }
    }

    #[must_use]
    pub fn with_on_bar_click(mut self, callback: BarClickCallback) -> Self {
        self.on_bar_click = callback;
        self
    }

    #[must_use]
    pub fn with_clear_selection(mut self, callback: SelectionCallback) -> Self {
        self.selection.clear_selection = callback;
        self
    }

    #[must_use]
    pub fn with_deny_selection(mut self, callback: SelectionCallback) -> Self {
        self.selection.deny_selection = callback;
        self
    }
}

impl Default for HistogramCallbacks {
    fn default() -> Self {
        Self::from_optional(None, None, None)
    }
}

impl fmt::Debug for HistogramCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistogramCallbacks")
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
