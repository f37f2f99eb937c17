use crate::math;
use crate::{Edge, ScrollDirection, SlotTable};

/// Geometry of the "middle" copy in a tripled slot table.
///
/// When looping, the slot table holds three copies of the items (before / middle / after).
/// The scroll position is kept around the middle copy: whenever it drifts past one of the jump
/// triggers it is moved by exactly one copy length, which is invisible because the copies are
/// identical.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopGeometry {
    /// First cell of the middle copy.
    pub first_cell_index: usize,
    /// Last cell of the middle copy (inclusive).
    pub last_cell_index: usize,
    /// Scroll position showing the start of the middle copy.
    pub first_scroll_position: f32,
    /// Scroll position showing the end of the middle copy.
    pub last_scroll_position: f32,
    pub first_jump_trigger: f32,
    pub last_jump_trigger: f32,
}

impl LoopGeometry {
    /// Expands `table` (holding one copy of the items) into the looping layout.
    ///
    /// If one copy is shorter than `viewport_size`, the copy is first repeated until it covers
    /// the viewport, so the middle copy never leaves a visible gap. Single items larger than
    /// the viewport are not special-cased.
    ///
    /// Returns `None` (leaving the table untouched) when there is nothing to loop.
    pub fn expand(table: &mut SlotTable, viewport_size: f32) -> Option<Self> {
        let total = table.total();
        if table.is_empty() || !(total > 0.0) {
            vwarn!(slots = table.len(), total, "LoopGeometry::expand: nothing to loop");
            return None;
        }

        if total < viewport_size {
            let rounds = math::ceil_ratio(viewport_size, total);
            table.duplicate(rounds, table.len());
        }

        let span = table.len();
        let first_cell_index = span;
        let last_cell_index = first_cell_index + span - 1;
        table.duplicate(2, span);

        let half_spacing = table.spacing() * 0.5;
        let first_scroll_position = table.position(first_cell_index, Edge::Before) + half_spacing;
        let last_scroll_position =
            table.position(last_cell_index, Edge::After) - viewport_size + half_spacing;

        let geometry = Self {
            first_cell_index,
            last_cell_index,
            first_scroll_position,
            last_scroll_position,
            first_jump_trigger: first_scroll_position - viewport_size,
            last_jump_trigger: last_scroll_position + viewport_size,
        };
        vdebug!(
            span,
            slots = table.len(),
            first = geometry.first_cell_index,
            last = geometry.last_cell_index,
            "LoopGeometry::expand"
        );
        Some(geometry)
    }

    /// Number of cells in one (possibly padded) copy.
    pub fn span(&self) -> usize {
        self.last_cell_index + 1 - self.first_cell_index
    }

    /// Wraps a position written while travelling in `direction`.
    ///
    /// Moving forward past the last trigger continues from the first scroll position; moving
    /// backward before the first trigger continues from the last scroll position.
    pub fn wrap(&self, position: f32, direction: ScrollDirection) -> f32 {
        match direction {
            ScrollDirection::Forward if position > self.last_jump_trigger => {
                self.first_scroll_position + (position - self.last_jump_trigger)
            }
            ScrollDirection::Backward if position < self.first_jump_trigger => {
                self.last_scroll_position - (self.first_jump_trigger - position)
            }
            _ => position,
        }
    }

    /// Returns the re-centered position if `position` lies beyond either jump trigger.
    pub fn recenter(&self, position: f32) -> Option<f32> {
        if position < self.first_jump_trigger {
            Some(self.last_scroll_position - (self.first_jump_trigger - position))
        } else if position > self.last_jump_trigger {
            Some(self.first_scroll_position + (position - self.last_jump_trigger))
        } else {
            None
        }
    }
}
