use alloc::vec::Vec;

use crate::math;
use crate::{CellRange, Edge, Padders};

/// Per-slot sizes and cumulative trailing offsets along the scroll axis.
///
/// Slot `i > 0` stores its item extent plus the leading `spacing`, so `offsets[i]` is the
/// trailing edge of item `i` measured from the content start, excluding `padding_start`.
/// Every position query adds `padding_start` back.
///
/// The table is always rebuilt wholesale (see [`SlotTable::rebuild`]); it is never patched
/// slot by slot.
#[derive(Clone, Debug, Default)]
pub struct SlotTable {
    sizes: Vec<f32>,
    offsets: Vec<f32>,
    spacing: f32,
    padding_start: f32,
    padding_end: f32,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all slots with `count` items sized by `size_of`.
    ///
    /// Returns the total extent of the new slots (the last trailing offset).
    pub fn rebuild(
        &mut self,
        count: usize,
        mut size_of: impl FnMut(usize) -> f32,
        spacing: f32,
        padding_start: f32,
        padding_end: f32,
    ) -> f32 {
        self.spacing = math::extent(spacing);
        self.padding_start = math::extent(padding_start);
        self.padding_end = math::extent(padding_end);

        self.sizes.clear();
        self.sizes.reserve_exact(count);
        for i in 0..count {
            let lead = if i == 0 { 0.0 } else { self.spacing };
            self.sizes.push(math::extent(size_of(i)) + lead);
        }
        self.recompute_offsets();
        vtrace!(count, total = self.total(), "SlotTable::rebuild");
        self.total()
    }

    /// Appends `times` copies of the first `span` slots.
    ///
    /// The first slot of each copy gains the leading spacing it lacks as slot 0.
    pub(crate) fn duplicate(&mut self, times: usize, span: usize) {
        let span = span.min(self.sizes.len());
        self.sizes.reserve(times.saturating_mul(span));
        for _ in 0..times {
            for j in 0..span {
                let lead = if j == 0 { self.spacing } else { 0.0 };
                let size = self.sizes[j] + lead;
                self.sizes.push(size);
            }
        }
        self.recompute_offsets();
    }

    fn recompute_offsets(&mut self) {
        self.offsets.clear();
        self.offsets.reserve_exact(self.sizes.len());
        let mut offset = 0.0f32;
        for &size in &self.sizes {
            offset += size;
            self.offsets.push(offset);
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn padding_start(&self) -> f32 {
        self.padding_start
    }

    pub fn padding_end(&self) -> f32 {
        self.padding_end
    }

    /// Slot sizes, spacing included for every slot but the first.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Cumulative trailing offsets (padding excluded).
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn size(&self, cell_index: usize) -> Option<f32> {
        self.sizes.get(cell_index).copied()
    }

    pub fn offset(&self, cell_index: usize) -> Option<f32> {
        self.offsets.get(cell_index).copied()
    }

    /// The extent a view bound to `cell_index` should occupy (its slot without spacing).
    pub fn item_extent(&self, cell_index: usize) -> f32 {
        let Some(size) = self.size(cell_index) else {
            return 0.0;
        };
        if cell_index > 0 {
            (size - self.spacing).max(0.0)
        } else {
            size
        }
    }

    /// Sum of all slot sizes.
    pub fn total(&self) -> f32 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// Total content extent, padding included.
    pub fn content_size(&self) -> f32 {
        self.padding_start + self.total() + self.padding_end
    }

    fn clamp_index(&self, cell_index: usize) -> usize {
        cell_index.min(self.sizes.len().saturating_sub(1))
    }

    /// Position immediately before the item in `cell_index`.
    ///
    /// Slot 0 resolves to the leading padding. Indexes past the end resolve to the last slot;
    /// an empty table resolves everything to `0`.
    pub fn offset_before(&self, cell_index: usize) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let i = self.clamp_index(cell_index);
        if i == 0 {
            return self.padding_start;
        }
        self.offsets[i - 1] + self.spacing + self.padding_start
    }

    /// Position immediately after the item in `cell_index`.
    pub fn offset_after(&self, cell_index: usize) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.offsets[self.clamp_index(cell_index)] + self.padding_start
    }

    pub fn position(&self, cell_index: usize, edge: Edge) -> f32 {
        match edge {
            Edge::Before => self.offset_before(cell_index),
            Edge::After => self.offset_after(cell_index),
        }
    }

    /// Returns the first slot whose trailing edge is at or past `position`.
    ///
    /// Positions past the content end resolve to the last slot.
    pub fn index_at_position(&self, position: f32) -> usize {
        if self.is_empty() {
            return 0;
        }
        let pad = self.padding_start;
        let i = self.offsets.partition_point(|&o| o + pad < position);
        self.clamp_index(i)
    }

    /// Spacer extents around the active `range`.
    pub fn padders(&self, range: CellRange) -> Padders {
        if self.is_empty() {
            return Padders::default();
        }
        let start = self.clamp_index(range.start_index);
        let end = self.clamp_index(range.end_index);
        Padders {
            before: self.offsets[start] - self.sizes[start],
            after: self.total() - self.offsets[end],
        }
    }
}
