use recycler::{Alignment, CellSource, MovementType, ScrollTarget, Scroller};

use crate::{Easing, OnTweenEnd, ScrollSurface, SnapConfig, SnapMachine, SnapState, Tween};

/// A framework-neutral controller that glues a [`Scroller`], a [`SnapMachine`] and the host's
/// [`ScrollSurface`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_begin_drag` / `on_end_drag` / `on_scroll_input` when input events occur
/// - `on_surface_scrolled` (or `set_scroll_position`) when the surface moves
/// - `tick(now_ms)` once per frame, after input handling
///
/// and then render `scroller().views()` at the positions the scroller reports.
///
/// Every position the controller produces (tween frames, clamping, loop re-centering) is written
/// back to the surface through [`ScrollSurface::set_normalized_position`].
pub struct Controller<S: CellSource, F: ScrollSurface> {
    scroller: Scroller<S>,
    surface: F,
    snap: SnapMachine,
}

impl<S: CellSource, F: ScrollSurface> Controller<S, F> {
    pub fn new(scroller: Scroller<S>, surface: F, config: SnapConfig) -> Self {
        let mut controller = Self {
            scroller,
            surface,
            snap: SnapMachine::new(config),
        };
        controller.sync_surface();
        controller
    }

    pub fn scroller(&self) -> &Scroller<S> {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut Scroller<S> {
        &mut self.scroller
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut F {
        &mut self.surface
    }

    pub fn snap(&self) -> &SnapMachine {
        &self.snap
    }

    pub fn snap_config(&self) -> &SnapConfig {
        self.snap.config()
    }

    pub fn set_snap_config(&mut self, config: SnapConfig) {
        self.snap.set_config(config);
    }

    pub fn snap_state(&self) -> SnapState {
        self.snap.state()
    }

    pub fn into_parts(self) -> (Scroller<S>, F) {
        (self.scroller, self.surface)
    }

    pub fn is_tweening(&self) -> bool {
        self.snap.is_tweening()
    }

    /// Stops the active tween where it is. Its callback receives [`TweenEnd::Canceled`].
    pub fn cancel_tween(&mut self) -> bool {
        let position = self.scroller.scroll_position();
        self.snap.cancel_tween(&mut self.surface, position)
    }

    /// A scroll-wheel burst. Cancels any tween and arms a delayed snap.
    pub fn on_scroll_input(&mut self) {
        let position = self.scroller.scroll_position();
        self.snap.on_scroll(&mut self.surface, position);
    }

    pub fn on_begin_drag(&mut self) {
        let position = self.scroller.scroll_position();
        self.snap.on_begin_drag(&mut self.surface, position);
    }

    pub fn on_end_drag(&mut self) {
        self.snap.on_end_drag(&self.surface);
    }

    /// Applies a position reported by the surface in its normalized 0..1 convention.
    ///
    /// Returns `true` if the position was clamped (the surface velocity is zeroed).
    pub fn on_surface_scrolled(&mut self, normalized: f32) -> bool {
        let clamped = self.scroller.apply_normalized_position(normalized);
        if clamped {
            self.surface.set_velocity(0.0);
        }
        self.sync_surface();
        clamped
    }

    /// Sets the scroll position in pixels, zeroing the surface velocity if it was clamped.
    pub fn set_scroll_position(&mut self, position: f32) -> bool {
        let clamped = self.scroller.set_scroll_position(position);
        if clamped {
            self.surface.set_velocity(0.0);
        }
        self.sync_surface();
        clamped
    }

    /// Advances the controller by one frame.
    ///
    /// Runs the snap watch (starting a snap tween when due), applies the active tween's frame,
    /// then refreshes the scroller. Returns `true` if the active window changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.snap.update(&mut self.surface) {
            self.snap_now(now_ms);
        }
        let tweened = self.advance_tween(now_ms);
        let changed = self.scroller.update() || tweened;
        self.sync_surface();
        changed
    }

    /// Starts a tween that shows `data_index` at `alignment`.
    ///
    /// Any running tween is canceled first. The target is clamped to the content when the
    /// surface uses [`MovementType::Clamped`]. Immediate tweens complete before this returns.
    /// Returns the target position.
    pub fn jump_to_item(
        &mut self,
        data_index: usize,
        alignment: Alignment,
        easing: Easing,
        duration_ms: u64,
        now_ms: u64,
        on_complete: Option<OnTweenEnd>,
    ) -> f32 {
        self.cancel_tween();
        let clamp = self.surface.movement_type() == MovementType::Clamped;
        let target = self
            .scroller
            .scroll_target_for_alignment(data_index, alignment, clamp);
        self.jump_to_position(target, easing, duration_ms, now_ms, on_complete)
    }

    /// Starts a tween from the current position to `target`.
    ///
    /// Use [`Scroller::scroll_target_for_data_index`] for targets other than the plain
    /// alignments.
    pub fn jump_to_position(
        &mut self,
        target: f32,
        easing: Easing,
        duration_ms: u64,
        now_ms: u64,
        on_complete: Option<OnTweenEnd>,
    ) -> f32 {
        let from = self.scroller.scroll_position();
        let tween = Tween::new(from, target, now_ms, duration_ms, easing);
        self.snap
            .start_tween(&mut self.surface, from, tween, on_complete);
        if tween.is_immediate() {
            self.advance_tween(now_ms);
        }
        target
    }

    /// Snaps to the item under the configured alignment point right away.
    ///
    /// Returns `None` when there is nothing to snap to.
    pub fn snap_now(&mut self, now_ms: u64) -> Option<ScrollTarget> {
        self.cancel_tween();
        let config = *self.snap.config();
        let clamp = self.surface.movement_type() == MovementType::Clamped;
        let target = self.scroller.snap_target(config.alignment, clamp)?;
        vdebug!(
            data_index = target.data_index,
            position = target.position,
            "Controller::snap_now"
        );
        self.jump_to_position(
            target.position,
            config.easing,
            config.duration_ms,
            now_ms,
            None,
        );
        Some(target)
    }

    /// Writes the active tween's frame into the scroller. Returns `true` if the window changed.
    fn advance_tween(&mut self, now_ms: u64) -> bool {
        let Some(frame) = self.snap.tween_frame(now_ms) else {
            return false;
        };
        if self
            .scroller
            .set_position_with_dir(frame.position, frame.direction)
        {
            self.surface.set_velocity(0.0);
        }
        let changed = self.scroller.update();
        self.sync_surface();
        vtrace!(
            position = frame.position,
            done = frame.done,
            "Controller::advance_tween"
        );
        if frame.done {
            self.snap.finish_tween(&mut self.surface);
        }
        changed
    }

    /// Pushes the scroller's position to the surface.
    fn sync_surface(&mut self) {
        let normalized = self.scroller.normalized_position();
        self.surface.set_normalized_position(normalized);
    }
}

impl<S: CellSource, F: ScrollSurface + core::fmt::Debug> core::fmt::Debug for Controller<S, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("scroller", &self.scroller)
            .field("surface", &self.surface)
            .field("snap", &self.snap)
            .finish()
    }
}
