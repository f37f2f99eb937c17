//! Snapping, tweening and scroll-surface glue for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and only maps positions to item views. This crate adds
//! the interactive layer a host needs on top of it:
//!
//! - [`SnapMachine`]: decides when a released (or wheel-scrolled) list should snap to an item
//! - [`Tween`] / [`Easing`]: time-bounded position animation
//! - [`ScrollSurface`]: the host's physics surface (velocity, inertia, movement type), with an
//!   in-memory [`SimSurface`]
//! - [`Controller`]: ties a scroller, a snap machine and a surface together
//!
//! Like `recycler`, this crate is framework-agnostic and works without `std`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod snap;
mod surface;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use snap::{
    OnTweenEnd, SCROLL_INPUT_SETTLE_TICKS, SnapConfig, SnapMachine, SnapState, TweenEnd,
    TweenFrame,
};
pub use surface::{DEFAULT_DECAY_PER_MS, ScrollSurface, SimSurface};
pub use tween::{Easing, Tween};
