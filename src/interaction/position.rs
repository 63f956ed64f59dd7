use crate::core::{BoundingBox, RelativePosition};

/// Offset of `tracked` from `root`; `None` until both boxes are measured.
#[must_use]
pub fn relative_position(
    tracked: Option<BoundingBox>,
    root: Option<BoundingBox>,
) -> Option<RelativePosition> {
    let tracked = tracked?;
    let root = root?;
    let x = tracked.left - root.left;
    let y = tracked.top - root.top;
    (x.is_finite() && y.is_finite()).then_some(RelativePosition { x, y })
}

/// Keeps the popup anchor in sync with the latest measured boxes.
///
/// The position is recomputed on every update, so a value read after any
/// update always reflects both current rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelativePositionTracker {
    tracked: Option<BoundingBox>,
    root: Option<BoundingBox>,
    position: Option<RelativePosition>,
}

impl RelativePositionTracker {
    /// Returns `true` when the resolved position changed.
    pub fn set_tracked_box(&mut self, tracked: Option<BoundingBox>) -> bool {
        self.tracked = tracked;
        self.refresh()
    }

    /// Returns `true` when the resolved position changed.
    pub fn set_root_box(&mut self, root: Option<BoundingBox>) -> bool {
        self.root = root;
        self.refresh()
    }

    #[must_use]
    pub fn tracked_box(self) -> Option<BoundingBox> {
        self.tracked
    }

    #[must_use]
    pub fn root_box(self) -> Option<BoundingBox> {
        self.root
    }

    #[must_use]
    pub fn position(self) -> Option<RelativePosition> {
        self.position
    }

    fn refresh(&mut self) -> bool {
        let next = relative_position(self.tracked, self.root);
        let changed = next != self.position;
        self.position = next;
        changed
    }
}
