use crate::math;
use crate::{
    ActiveWindow, Alignment, Axis, CellRange, CellSource, CellView, Edge, LoopGeometry, Padders,
    RecyclePool, ScrollDirection, ScrollState, ScrollTarget, ScrollbarVisibility, ScrollerOptions,
    SlotTable,
};

/// Position changes at or below this distance are ignored.
const POSITION_EPSILON: f32 = 0.01;

/// A headless recycling scroller.
///
/// The scroller owns the caller's [`CellSource`], the slot geometry, the active window and the
/// recycle pool. It does not scroll anything physically: the host feeds it positions (directly
/// or as normalized surface positions) and viewport sizes, and renders the views it exposes.
///
/// When looping, the slot table is tripled (see [`LoopGeometry`]) and the position is kept
/// around the middle copy.
pub struct Scroller<S: CellSource> {
    options: ScrollerOptions,
    source: S,

    table: SlotTable,
    loop_geometry: Option<LoopGeometry>,

    window: ActiveWindow<S::View>,
    pool: RecyclePool<S::View>,

    scroll_position: f32,
    scroll_direction: Option<ScrollDirection>,
    needs_refresh: bool,
}

impl<S: CellSource> Scroller<S> {
    /// Creates a scroller and builds its slot table.
    ///
    /// No views are materialized until the first [`Scroller::reload`] or
    /// [`Scroller::update`].
    pub fn new(source: S, options: ScrollerOptions) -> Self {
        vdebug!(
            count = source.cell_count(),
            axis = ?options.axis,
            loop_enabled = options.loop_enabled,
            "Scroller::new"
        );
        if options.axis.is_none() {
            vwarn!("Scroller::new: no scroll axis, scroller disabled");
        }
        let mut s = Self {
            options,
            source,
            table: SlotTable::new(),
            loop_geometry: None,
            window: ActiveWindow::new(),
            pool: RecyclePool::new(),
            scroll_position: 0.0,
            scroll_direction: None,
            needs_refresh: false,
        };
        if s.enabled() {
            s.rebuild_table();
            s.scroll_position = s.start_position();
            s.needs_refresh = true;
        }
        s
    }

    pub fn options(&self) -> &ScrollerOptions {
        &self.options
    }

    /// Replaces the options, rebuilding only what the change requires.
    pub fn set_options(&mut self, options: ScrollerOptions) {
        let prev = core::mem::replace(&mut self.options, options);
        vtrace!(
            axis = ?self.options.axis,
            loop_enabled = self.options.loop_enabled,
            viewport_size = self.options.viewport_size,
            "Scroller::set_options"
        );

        if !self.enabled() {
            self.window.recycle_all(&mut self.pool, &mut self.source);
            self.table = SlotTable::new();
            self.loop_geometry = None;
            self.scroll_position = 0.0;
            self.scroll_direction = None;
            self.needs_refresh = false;
            return;
        }
        if prev.axis.is_none() {
            self.resize(false);
            return;
        }

        if prev.loop_enabled != self.options.loop_enabled {
            let next = self.options.loop_enabled;
            self.options.loop_enabled = prev.loop_enabled;
            self.set_loop(next);
        } else if prev.spacing != self.options.spacing
            || prev.padding_start != self.options.padding_start
            || prev.padding_end != self.options.padding_end
            || (self.options.loop_enabled && prev.viewport_size != self.options.viewport_size)
        {
            self.resize(true);
        } else if prev.viewport_size != self.options.viewport_size {
            self.needs_refresh = true;
        }
    }

    /// Clones the current options, applies `f`, then delegates to [`Scroller::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut ScrollerOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    /// `false` when no scroll axis is configured.
    pub fn enabled(&self) -> bool {
        self.options.axis.is_some()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.options.axis
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the item source.
    ///
    /// Call [`Scroller::reload`] after changing the item count or sizes.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn table(&self) -> &SlotTable {
        &self.table
    }

    pub fn loop_geometry(&self) -> Option<&LoopGeometry> {
        self.loop_geometry.as_ref()
    }

    pub fn window(&self) -> &ActiveWindow<S::View> {
        &self.window
    }

    pub fn pool(&self) -> &RecyclePool<S::View> {
        &self.pool
    }

    pub fn views(&self) -> impl Iterator<Item = &S::View> {
        self.window.views()
    }

    pub fn padders(&self) -> Padders {
        self.window.padders()
    }

    pub fn cell_count(&self) -> usize {
        self.source.cell_count()
    }

    pub fn is_looping(&self) -> bool {
        self.loop_geometry.is_some()
    }

    pub fn loop_enabled(&self) -> bool {
        self.options.loop_enabled
    }

    /// Toggles loop mode, keeping the visible content in place.
    pub fn set_loop(&mut self, loop_enabled: bool) {
        if self.options.loop_enabled == loop_enabled {
            return;
        }
        let old_position = self.scroll_position;
        let old_first = self.loop_geometry.map(|g| g.first_scroll_position);
        self.options.loop_enabled = loop_enabled;
        if !self.enabled() {
            return;
        }
        self.rebuild_table();

        let position = if loop_enabled {
            self.loop_geometry
                .map_or(old_position, |g| g.first_scroll_position + old_position)
        } else {
            old_position - old_first.unwrap_or(0.0)
        };
        vdebug!(loop_enabled, old_position, position, "Scroller::set_loop");
        self.set_scroll_position(position);
        self.refresh_after_rebuild();
    }

    pub fn viewport_size(&self) -> f32 {
        self.options.viewport_size
    }

    /// Updates the viewport extent. While looping this rebuilds the slot table.
    pub fn set_viewport_size(&mut self, viewport_size: f32) {
        if self.options.viewport_size == viewport_size {
            return;
        }
        self.options.viewport_size = viewport_size;
        if !self.enabled() {
            return;
        }
        if self.options.loop_enabled {
            self.resize(true);
        } else {
            self.needs_refresh = true;
        }
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.update_options(|o| o.spacing = spacing);
    }

    pub fn set_padding(&mut self, padding_start: f32, padding_end: f32) {
        self.update_options(|o| {
            o.padding_start = padding_start;
            o.padding_end = padding_end;
        });
    }

    pub fn scrollbar_visibility(&self) -> ScrollbarVisibility {
        self.options.scrollbar_visibility
    }

    pub fn set_scrollbar_visibility(&mut self, visibility: ScrollbarVisibility) {
        self.options.scrollbar_visibility = visibility;
    }

    /// Whether the host should currently show its scrollbar.
    ///
    /// Content that fits the viewport, or looping content, only shows a scrollbar under
    /// [`ScrollbarVisibility::Permanent`]; otherwise the scrollbar is shown.
    pub fn scrollbar_visible(&self) -> bool {
        let permanent = self.options.scrollbar_visibility == ScrollbarVisibility::Permanent;
        if self.table.is_empty() {
            return permanent;
        }
        if self.table.total() < self.options.viewport_size || self.is_looping() {
            permanent
        } else {
            true
        }
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll_position
    }

    /// The direction of the last accepted position change.
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Total content extent, padding included.
    pub fn content_size(&self) -> f32 {
        self.table.content_size()
    }

    /// The scrollable distance (`content_size - viewport_size`).
    pub fn scroll_size(&self) -> f32 {
        self.content_size() - self.options.viewport_size
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            position: self.scroll_position,
            viewport_size: self.options.viewport_size,
            content_size: self.content_size(),
        }
    }

    /// Sets the scroll position.
    ///
    /// When not looping the position is clamped to `[-viewport, start of last item +
    /// viewport]`. Changes of at most 0.01 px are ignored. Returns `true` if the value was
    /// clamped, in which case the host should stop any surface velocity.
    pub fn set_scroll_position(&mut self, position: f32) -> bool {
        if !self.enabled() || position.is_nan() {
            return false;
        }
        let mut position = position;
        let mut clamped = false;
        if !self.is_looping() {
            let view = self.options.viewport_size.max(0.0);
            let min = -view;
            let max = self.table.offset_before(self.table.len().saturating_sub(1)) + view;
            if position < min || position > max {
                position = position.clamp(min, max);
                clamped = true;
            }
        }

        if math::abs(self.scroll_position - position) > POSITION_EPSILON {
            self.scroll_direction = Some(ScrollDirection::between(self.scroll_position, position));
            self.scroll_position = position;
            self.needs_refresh = true;
        }
        clamped
    }

    /// Sets the scroll position as written by a tween travelling in `direction`.
    ///
    /// While looping, positions beyond the jump trigger on the side of travel wrap into the
    /// middle copy. The direction flag is set to `direction` regardless of the actual delta.
    pub fn set_position_with_dir(&mut self, position: f32, direction: ScrollDirection) -> bool {
        let position = match self.loop_geometry {
            Some(g) => g.wrap(position, direction),
            None => position,
        };
        let clamped = self.set_scroll_position(position);
        if self.enabled() {
            self.scroll_direction = Some(direction);
        }
        clamped
    }

    /// The position as a 0..1 fraction of the scrollable distance, in surface convention
    /// (inverted for vertical scrollers, where 1 is the top).
    pub fn normalized_position(&self) -> f32 {
        let size = self.scroll_size();
        let vertical = self.options.axis == Some(Axis::Vertical);
        if !(size > 0.0) {
            return if vertical { 1.0 } else { 0.0 };
        }
        let n = self.scroll_position / size;
        if vertical { 1.0 - n } else { n }
    }

    /// Applies a position reported by the scroll surface and refreshes the window.
    ///
    /// Returns `true` if the position was clamped.
    pub fn apply_normalized_position(&mut self, normalized: f32) -> bool {
        if !self.enabled() {
            return false;
        }
        let size = self.scroll_size();
        let position = match self.options.axis {
            Some(Axis::Vertical) => (1.0 - normalized) * size,
            _ => normalized * size,
        };
        let clamped = self.set_scroll_position(position);
        self.refresh_active();
        clamped
    }

    /// Recycles every active view, rebuilds the slot table and places the position at
    /// `start_fraction` of the scrollable distance.
    pub fn reload(&mut self, start_fraction: f32) {
        if !self.enabled() {
            return;
        }
        vdebug!(start_fraction, count = self.source.cell_count(), "Scroller::reload");
        self.window.recycle_all(&mut self.pool, &mut self.source);
        self.rebuild_table();
        let position = start_fraction * self.scroll_size();
        self.set_scroll_position(position);
        self.refresh_active();
    }

    /// Asks every active view to re-read its content.
    pub fn refresh_visible(&mut self) {
        for view in self.window.views_mut() {
            view.refresh();
        }
    }

    /// Drops the active views. The window is repopulated on the next update.
    pub fn clear_active(&mut self) {
        self.window.clear();
        self.needs_refresh = true;
    }

    /// Drops the pooled views.
    pub fn clear_recycled(&mut self) {
        self.pool.clear();
    }

    pub fn clear_all(&mut self) {
        self.clear_active();
        self.clear_recycled();
    }

    /// Per-frame update: refreshes the active window if the position changed.
    ///
    /// Returns `true` if the window was rebuilt.
    pub fn update(&mut self) -> bool {
        if !self.needs_refresh {
            return false;
        }
        self.refresh_active()
    }

    /// Re-centers a looping position if needed, then brings the active window to the visible
    /// range. Returns `true` if the window changed.
    pub fn refresh_active(&mut self) -> bool {
        self.needs_refresh = false;
        if !self.enabled() {
            return false;
        }

        if let Some(g) = self.loop_geometry {
            if let Some(position) = g.recenter(self.scroll_position) {
                vdebug!(from = self.scroll_position, to = position, "loop re-center");
                self.scroll_position = position;
            }
        }

        let Some(range) = self.visible_range() else {
            if self.window.is_empty() {
                return false;
            }
            self.window.recycle_all(&mut self.pool, &mut self.source);
            return true;
        };
        if self.window.range() == Some(range) {
            return false;
        }
        self.window
            .refresh(range, &self.table, &mut self.pool, &mut self.source);
        true
    }

    /// The range of cells intersecting the viewport at the current position.
    pub fn visible_range(&self) -> Option<CellRange> {
        self.visible_range_for(self.scroll_position, self.options.viewport_size)
    }

    pub fn visible_range_for(&self, position: f32, viewport_size: f32) -> Option<CellRange> {
        if !self.enabled() || self.table.is_empty() || self.source.cell_count() == 0 {
            return None;
        }
        let start = self.table.index_at_position(position);
        let end = self.table.index_at_position(position + viewport_size);
        Some(CellRange::new(start, end.max(start)))
    }

    /// The cell range of the active window (`0..=0` when empty).
    pub fn active_range(&self) -> CellRange {
        self.window.range().unwrap_or_default()
    }

    pub fn start_cell_index(&self) -> usize {
        self.active_range().start_index
    }

    pub fn end_cell_index(&self) -> usize {
        self.active_range().end_index
    }

    pub fn start_data_index(&self) -> usize {
        self.data_index_of(self.start_cell_index())
    }

    pub fn end_data_index(&self) -> usize {
        self.data_index_of(self.end_cell_index())
    }

    /// Maps a cell index to the caller's item index.
    pub fn data_index_of(&self, cell_index: usize) -> usize {
        match self.source.cell_count() {
            0 => 0,
            count => cell_index % count,
        }
    }

    /// Position of the leading or trailing edge of `cell_index`.
    pub fn position_for_cell_index(&self, cell_index: usize, edge: Edge) -> f32 {
        if !self.enabled() || self.source.cell_count() == 0 {
            return 0.0;
        }
        self.table.position(cell_index, edge)
    }

    /// Position of the leading or trailing edge of `data_index`.
    ///
    /// When looping this is the copy at `first_cell_index + data_index`, which starts the middle
    /// third of the expanded table (padding copies included).
    pub fn position_for_data_index(&self, data_index: usize, edge: Edge) -> f32 {
        let cell_index = match self.loop_geometry {
            Some(g) => g.first_cell_index + data_index,
            None => data_index,
        };
        self.position_for_cell_index(cell_index, edge)
    }

    pub fn cell_index_at_position(&self, position: f32) -> usize {
        if !self.enabled() {
            return 0;
        }
        self.table.index_at_position(position)
    }

    /// Computes the scroll position that shows `data_index` at a given alignment.
    ///
    /// - `viewport_fraction`: the point of the viewport (0 = leading edge, 1 = trailing edge)
    ///   the item should meet.
    /// - `item_fraction`: the point of the item (0 = leading edge, 1 = trailing edge) placed at
    ///   that viewport point.
    /// - `use_spacing`: account for the spacing around the item.
    /// - `clamp`: keep the result in `[0, start of last item]` (for surfaces that forbid
    ///   overscroll).
    ///
    /// While looping, the copy of `data_index` closest to the current position wins; on equal
    /// distance the earliest copy wins. Every copy in the expanded table is a candidate
    /// (`data_index + k * cell_count`): three when the items already cover the viewport, more
    /// when padding copies were added (see [`LoopGeometry`]).
    pub fn scroll_target_for_data_index(
        &self,
        data_index: usize,
        viewport_fraction: f32,
        item_fraction: f32,
        use_spacing: bool,
        clamp: bool,
    ) -> f32 {
        let count = self.source.cell_count();
        if !self.enabled() || count == 0 || self.table.is_empty() {
            return 0.0;
        }
        let data_index = data_index.min(count - 1);
        let spacing = self.table.spacing();

        let mut item_offset = 0.0;
        if item_fraction != 0.0 {
            let mut size = math::extent(self.source.cell_size(data_index));
            if use_spacing {
                size += spacing;
                if data_index > 0 && data_index < count - 1 {
                    size += spacing;
                }
            }
            item_offset = size * item_fraction;
        }
        let offset = item_offset - viewport_fraction * self.options.viewport_size;

        let mut target = if self.is_looping() {
            self.nearest_copy_position(data_index, count, offset)
        } else {
            self.position_for_data_index(data_index, Edge::Before) + offset
        };

        if use_spacing {
            target -= spacing;
        }
        if clamp {
            let max = self.table.offset_before(self.table.len() - 1);
            target = target.clamp(0.0, max);
        }
        target
    }

    fn nearest_copy_position(&self, data_index: usize, count: usize, offset: f32) -> f32 {
        let copies = (self.table.len() / count).max(1);
        let mut best = self.table.offset_before(data_index) + offset;
        let mut best_distance = math::abs(self.scroll_position - best);
        for copy in 1..copies {
            let candidate = self.table.offset_before(data_index + copy * count) + offset;
            let distance = math::abs(self.scroll_position - candidate);
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }

    /// [`Scroller::scroll_target_for_data_index`] for a viewport/item alignment.
    ///
    /// `Center` alignment accounts for spacing.
    pub fn scroll_target_for_alignment(
        &self,
        data_index: usize,
        alignment: Alignment,
        clamp: bool,
    ) -> f32 {
        let fraction = alignment.factor();
        self.scroll_target_for_data_index(
            data_index,
            fraction,
            fraction,
            alignment == Alignment::Center,
            clamp,
        )
    }

    /// The item under the viewport's alignment point, and the position aligning it.
    ///
    /// Returns `None` when there are no items.
    pub fn snap_target(&self, alignment: Alignment, clamp: bool) -> Option<ScrollTarget> {
        if !self.enabled() || self.source.cell_count() == 0 || self.table.is_empty() {
            return None;
        }
        let probe =
            self.scroll_position + self.options.viewport_size * alignment.factor().clamp(0.0, 1.0);
        let data_index = self.data_index_of(self.table.index_at_position(probe));
        Some(ScrollTarget {
            data_index,
            position: self.scroll_target_for_alignment(data_index, alignment, clamp),
        })
    }

    fn start_position(&self) -> f32 {
        self.loop_geometry.map_or(0.0, |g| g.first_scroll_position)
    }

    fn rebuild_table(&mut self) {
        let count = self.source.cell_count();
        let source = &self.source;
        self.table.rebuild(
            count,
            |i| source.cell_size(i),
            self.options.spacing,
            self.options.padding_start,
            self.options.padding_end,
        );
        self.loop_geometry = if self.options.loop_enabled {
            LoopGeometry::expand(&mut self.table, self.options.viewport_size)
        } else {
            None
        };
        vdebug!(
            count,
            slots = self.table.len(),
            looping = self.loop_geometry.is_some(),
            "Scroller::rebuild_table"
        );
    }

    /// Rebuilds the slot table, then either keeps the position or resets it to the start.
    fn resize(&mut self, keep_position: bool) {
        let original = self.scroll_position;
        self.rebuild_table();
        let position = if keep_position {
            original
        } else {
            self.start_position()
        };
        self.set_scroll_position(position);
        self.refresh_after_rebuild();
    }

    fn refresh_after_rebuild(&mut self) {
        if self.refresh_active() {
            return;
        }
        // Same range, new slot geometry: padders and view sizes must still follow.
        if let Some(range) = self.window.range() {
            self.window
                .refresh(range, &self.table, &mut self.pool, &mut self.source);
        }
    }
}

impl<S: CellSource> core::fmt::Debug for Scroller<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scroller")
            .field("options", &self.options)
            .field("slots", &self.table.len())
            .field("loop_geometry", &self.loop_geometry)
            .field("scroll_position", &self.scroll_position)
            .field("window", &self.window)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
