//! A headless recycling scroller.
//!
//! For snapping, tweening and scroll-surface glue, see the `recycler-adapter` crate.
//!
//! This crate keeps a small window of item views alive for a potentially huge list of
//! heterogeneously-sized items, and recycles views that scroll out of sight:
//!
//! - [`SlotTable`]: per-item sizes and cumulative offsets, with `O(log n)` position lookup
//! - [`LoopGeometry`]: the tripled slot layout used for seamless wrap-around
//! - [`RecyclePool`]: retired views keyed by kind
//! - [`ActiveWindow`]: the on-screen views, updated incrementally as the range moves
//! - [`Scroller`]: the facade tying the above together, plus position ↔ item mapping
//!
//! It is UI-agnostic. A host provides:
//! - a [`CellSource`] (item count, sizes, kinds, a view factory)
//! - views implementing [`CellView`]
//! - the viewport size and scroll position (or normalized surface position)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod key;
mod looping;
mod math;
mod options;
mod pool;
mod scroller;
mod slots;
mod state;
mod types;
mod view;
mod window;


pub use key::PoolKey;
pub use looping::LoopGeometry;
pub use options::ScrollerOptions;
pub use pool::RecyclePool;
pub use scroller::Scroller;
pub use slots::SlotTable;
pub use state::{ScrollState, ScrollTarget};
pub use types::{
    Alignment, Axis, CellBinding, CellRange, Edge, MovementType, Padders, ScrollDirection,
    ScrollbarVisibility,
};
pub use view::{CellSource, CellView};
pub use window::{ActiveWindow, RefreshStats};
