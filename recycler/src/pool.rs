use alloc::vec::Vec;

use crate::CellView;
use crate::key::KindMap;

/// Retired views, grouped by kind.
///
/// The pool has no capacity bound: it holds at most as many views as were ever active at the
/// same time, and only shrinks on [`RecyclePool::clear`].
pub struct RecyclePool<V: CellView> {
    views: KindMap<V::Kind, Vec<V>>,
    len: usize,
}

impl<V: CellView> RecyclePool<V> {
    pub fn new() -> Self {
        Self {
            views: KindMap::new(),
            len: 0,
        }
    }

    /// Removes and returns one pooled view of `kind`, if any.
    pub fn acquire(&mut self, kind: &V::Kind) -> Option<V> {
        let view = self.views.get_mut(kind)?.pop()?;
        self.len -= 1;
        Some(view)
    }

    /// Unbinds `view` and stores it under its own kind.
    pub fn release(&mut self, mut view: V) {
        view.set_binding(None);
        self.views.entry(view.kind()).or_default().push(view);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len_of(&self, kind: &V::Kind) -> usize {
        self.views.get(kind).map_or(0, Vec::len)
    }

    /// Drops every pooled view.
    pub fn clear(&mut self) {
        vdebug!(views = self.len, "RecyclePool::clear");
        self.views.clear();
        self.len = 0;
    }
}

impl<V: CellView> Default for RecyclePool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: CellView> core::fmt::Debug for RecyclePool<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclePool")
            .field("len", &self.len)
            .field("kinds", &self.views.len())
            .finish()
    }
}
