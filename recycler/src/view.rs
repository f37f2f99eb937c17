use crate::{CellBinding, PoolKey};

/// A host-side view that can be bound to a cell and recycled.
///
/// The scroller never renders anything itself; it only binds, sizes, and moves views between
/// the active window and the recycle pool.
pub trait CellView {
    /// Tag deciding which pooled views are interchangeable (e.g. the item template).
    type Kind: PoolKey;

    fn kind(&self) -> Self::Kind;

    /// The current binding, or `None` while the view sits in the recycle pool.
    fn binding(&self) -> Option<CellBinding>;

    fn set_binding(&mut self, binding: Option<CellBinding>);

    /// Sets the extent the view should occupy along the scroll axis.
    fn set_main_size(&mut self, _size: f32) {}

    /// Re-reads the bound item's content.
    fn refresh(&mut self) {}
}

/// The caller's item list plus the view factory and lifecycle hooks.
pub trait CellSource {
    type View: CellView;

    fn cell_count(&self) -> usize;

    /// Extent of the item at `data_index` along the scroll axis.
    fn cell_size(&self, data_index: usize) -> f32;

    fn cell_kind(&self, data_index: usize) -> <Self::View as CellView>::Kind;

    /// Instantiates a view when the recycle pool has none of `kind`.
    fn create_view(
        &mut self,
        kind: &<Self::View as CellView>::Kind,
        binding: CellBinding,
    ) -> Self::View;

    /// Fired after a view was bound into the active window or retired from it.
    fn on_visibility_changed(&mut self, _view: &mut Self::View) {}

    /// Fired right before an active view is retired to the recycle pool.
    fn on_will_recycle(&mut self, _view: &mut Self::View) {}
}
