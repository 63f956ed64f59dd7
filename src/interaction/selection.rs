use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::BinId;

/// Caller-owned set of selected bins, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    bins: IndexSet<BinId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the bin was not selected before.
    pub fn insert(&mut self, bin: BinId) -> bool {
        self.bins.insert(bin)
    }

    /// Returns `true` when the bin was selected.
    pub fn remove(&mut self, bin: BinId) -> bool {
        self.bins.shift_remove(&bin)
    }

    pub fn clear(&mut self) {
        self.bins.clear();
    }

    #[must_use]
    pub fn contains(&self, bin: BinId) -> bool {
        self.bins.contains(&bin)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Most recently selected bin.
    #[must_use]
    pub fn last(&self) -> Option<BinId> {
        self.bins.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = BinId> + '_ {
        self.bins.iter().copied()
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        SelectionState::of(self)
    }
}

impl FromIterator<BinId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = BinId>>(iter: T) -> Self {
        Self {
            bins: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    Empty,
    NonEmpty,
}

impl SelectionState {
    #[must_use]
    pub fn of(selection: &SelectionSet) -> Self {
        if selection.is_empty() {
            Self::Empty
        } else {
            Self::NonEmpty
        }
    }
}

/// Whether the current interaction context accepts new selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionGate {
    #[default]
    Allowed,
    Denied,
}

/// Applies selection intents to a caller-owned [`SelectionSet`].
///
/// The gate only blocks additions and removals; clearing always goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionTracker {
    gate: SelectionGate,
}

impl SelectionTracker {
    #[must_use]
    pub fn gate(self) -> SelectionGate {
        self.gate
    }

    #[must_use]
    pub fn is_denied(self) -> bool {
        self.gate == SelectionGate::Denied
    }

    /// Returns `true` when the set changed.
    pub fn add_bin(self, selection: &mut SelectionSet, bin: BinId) -> bool {
        if self.is_denied() {
            trace!(bin = bin.0, "selection denied; ignoring add");
            return false;
        }
        selection.insert(bin)
    }

    /// Returns `true` when the set changed.
    pub fn remove_bin(self, selection: &mut SelectionSet, bin: BinId) -> bool {
        if self.is_denied() {
            trace!(bin = bin.0, "selection denied; ignoring remove");
            return false;
        }
        selection.remove(bin)
    }

    pub fn clear_selection(self, selection: &mut SelectionSet) {
        selection.clear();
    }

    pub fn deny_selection(&mut self) {
        self.gate = SelectionGate::Denied;
    }

    pub fn allow_selection(&mut self) {
        self.gate = SelectionGate::Allowed;
    }
}
