use alloc::collections::VecDeque;

use crate::{CellBinding, CellRange, CellSource, CellView, Padders, RecyclePool, SlotTable};

/// The views currently on screen, ordered by cell index.
///
/// Views are only ever added at the front or the back, so the window always covers one
/// contiguous run of cells.
pub struct ActiveWindow<V: CellView> {
    views: VecDeque<V>,
    range: Option<CellRange>,
    padders: Padders,
}

/// Counts from one [`ActiveWindow::refresh`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub recycled: usize,
    pub materialized: usize,
    pub kept: usize,
}

impl<V: CellView> ActiveWindow<V> {
    pub fn new() -> Self {
        Self {
            views: VecDeque::new(),
            range: None,
            padders: Padders::default(),
        }
    }

    /// The cell range the window was last refreshed to, or `None` when nothing is active.
    pub fn range(&self) -> Option<CellRange> {
        self.range
    }

    pub fn padders(&self) -> Padders {
        self.padders
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn views(&self) -> impl Iterator<Item = &V> {
        self.views.iter()
    }

    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.views.iter_mut()
    }

    /// The active view bound to `cell_index`.
    pub fn get(&self, cell_index: usize) -> Option<&V> {
        let start = self.range?.start_index;
        let view = self.views.get(cell_index.checked_sub(start)?)?;
        (view.binding()?.cell_index == cell_index).then_some(view)
    }

    /// Brings the window to `range`.
    ///
    /// Views outside `range` are retired to `pool`. Views inside it are kept as-is: a view
    /// bound to a cell that stays in range is never retired and re-created in the same pass.
    /// Missing cells are materialized in front of the first kept view (walking backward) and
    /// behind the last one (walking forward); if nothing was kept, the whole range is
    /// materialized front to back.
    pub fn refresh<S>(
        &mut self,
        range: CellRange,
        table: &SlotTable,
        pool: &mut RecyclePool<V>,
        source: &mut S,
    ) -> RefreshStats
    where
        S: CellSource<View = V>,
    {
        let count = source.cell_count();
        if count == 0 || table.is_empty() {
            let recycled = self.recycle_all(pool, source);
            return RefreshStats {
                recycled,
                ..RefreshStats::default()
            };
        }

        let mut stats = RefreshStats::default();
        let mut kept = VecDeque::with_capacity(range.len());
        for mut view in self.views.drain(..) {
            match view.binding() {
                Some(b) if range.contains(b.cell_index) => {
                    view.set_main_size(table.item_extent(b.cell_index));
                    kept.push_back(view);
                }
                _ => {
                    retire(view, pool, source);
                    stats.recycled += 1;
                }
            }
        }
        stats.kept = kept.len();

        let first = kept.front().and_then(|v| v.binding()).map(|b| b.cell_index);
        let last = kept.back().and_then(|v| v.binding()).map(|b| b.cell_index);
        match (first, last) {
            (Some(first), Some(last)) => {
                for cell_index in (range.start_index..first).rev() {
                    kept.push_front(materialize(cell_index, count, table, pool, source));
                    stats.materialized += 1;
                }
                for cell_index in last + 1..=range.end_index {
                    kept.push_back(materialize(cell_index, count, table, pool, source));
                    stats.materialized += 1;
                }
            }
            _ => {
                for cell_index in range.iter() {
                    kept.push_back(materialize(cell_index, count, table, pool, source));
                    stats.materialized += 1;
                }
            }
        }

        self.views = kept;
        self.range = Some(range);
        self.padders = table.padders(range);
        vtrace!(
            start = range.start_index,
            end = range.end_index,
            recycled = stats.recycled,
            materialized = stats.materialized,
            kept = stats.kept,
            "ActiveWindow::refresh"
        );
        stats
    }

    /// Retires every active view to `pool`. Returns the number of views retired.
    pub fn recycle_all<S>(&mut self, pool: &mut RecyclePool<V>, source: &mut S) -> usize
    where
        S: CellSource<View = V>,
    {
        let n = self.views.len();
        for view in self.views.drain(..) {
            retire(view, pool, source);
        }
        self.range = None;
        self.padders = Padders::default();
        n
    }

    /// Drops every active view without pooling it.
    pub fn clear(&mut self) {
        vdebug!(views = self.views.len(), "ActiveWindow::clear");
        self.views.clear();
        self.range = None;
        self.padders = Padders::default();
    }
}

impl<V: CellView> Default for ActiveWindow<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: CellView> core::fmt::Debug for ActiveWindow<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActiveWindow")
            .field("len", &self.views.len())
            .field("range", &self.range)
            .field("padders", &self.padders)
            .finish()
    }
}

fn retire<V, S>(mut view: V, pool: &mut RecyclePool<V>, source: &mut S)
where
    V: CellView,
    S: CellSource<View = V>,
{
    source.on_will_recycle(&mut view);
    view.set_binding(None);
    source.on_visibility_changed(&mut view);
    pool.release(view);
}

fn materialize<V, S>(
    cell_index: usize,
    count: usize,
    table: &SlotTable,
    pool: &mut RecyclePool<V>,
    source: &mut S,
) -> V
where
    V: CellView,
    S: CellSource<View = V>,
{
    let binding = CellBinding {
        cell_index,
        data_index: cell_index % count,
    };
    let kind = source.cell_kind(binding.data_index);
    let mut view = match pool.acquire(&kind) {
        Some(view) => view,
        None => source.create_view(&kind, binding),
    };
    view.set_binding(Some(binding));
    view.set_main_size(table.item_extent(cell_index));
    source.on_visibility_changed(&mut view);
    view
}
