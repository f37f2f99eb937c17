/// The axis along which a scroller lays out and scrolls its cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which edge of the viewport an item is aligned to when jumping or snapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// The item's leading edge meets the viewport's leading edge.
    #[default]
    Before,
    /// The item's center meets the viewport's center.
    Center,
    /// The item's trailing edge meets the viewport's trailing edge.
    After,
}

impl Alignment {
    /// The fraction of the viewport (and of the item) this alignment refers to.
    pub fn factor(self) -> f32 {
        match self {
            Self::Before => 0.0,
            Self::Center => 0.5,
            Self::After => 1.0,
        }
    }
}

/// Selects the leading or trailing boundary of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Before,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Direction of travel from `from` to `to`. Zero distance counts as forward.
    pub fn between(from: f32, to: f32) -> Self {
        if to - from < 0.0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// How the physical scroll surface treats positions outside of the content bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementType {
    Unrestricted,
    #[default]
    Elastic,
    Clamped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollbarVisibility {
    #[default]
    Permanent,
    AutoHide,
    AutoHideAndExpandViewport,
}

/// An inclusive range of cell indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl CellRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// The index pair a view is currently bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBinding {
    /// Index into the (possibly tripled) slot table.
    pub cell_index: usize,
    /// Index into the caller's item list (`cell_index % count`).
    pub data_index: usize,
}

/// Extents of the empty space before the first and after the last active view.
///
/// A host layout places a spacer of `before` in front of the active views and one of `after`
/// behind them, so the views land at their true positions without per-child offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padders {
    pub before: f32,
    pub after: f32,
}
