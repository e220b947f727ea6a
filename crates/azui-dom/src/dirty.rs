//! Dirty flag tracking for document changes.

use bitflags::bitflags;

bitflags! {
    /// Dirty flags accumulated by a [`Document`](crate::Document).
    ///
    /// Layout is only recomputed when a layout-affecting flag is set; paint-only
    /// changes (classes, visibility) are exposed to renderers through
    /// [`Document::take_dirty`](crate::Document::take_dirty).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u16 {
        /// No changes
        const NONE              = 0;

        /// Size, offset, positioning or display changed.
        const LAYOUT            = 1 << 0;

        /// Children were added, removed, or reordered.
        const CHILDREN_ORDER    = 1 << 1;

        /// Any inline style property changed.
        const STYLE             = 1 << 2;

        /// Class list changed.
        const CLASSES           = 1 << 3;

        /// Visible/hidden toggle changed.
        const VISIBILITY        = 1 << 4;
    }
}

impl DirtyFlags {
    /// Flags that require a layout pass.
    pub const LAYOUT_GROUP: Self = Self::LAYOUT.union(Self::CHILDREN_ORDER);

    /// Flags that only affect painting.
    pub const PAINT_GROUP: Self = Self::CLASSES.union(Self::VISIBILITY);

    /// Whether a layout pass is needed.
    pub fn needs_layout(&self) -> bool {
        self.intersects(Self::LAYOUT_GROUP)
    }
}
