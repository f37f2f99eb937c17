use alloc::boxed::Box;

use recycler::{Alignment, MovementType, ScrollDirection};

use crate::{Easing, ScrollSurface, Tween};

/// Ticks between a scroll-wheel burst and the snap it arms.
pub const SCROLL_INPUT_SETTLE_TICKS: u32 = 10;

/// Snap-to-item configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapConfig {
    /// Snap once a drag (or a scroll-wheel burst) ends and the surface slows down.
    pub snap_on_end_drag: bool,
    /// Speed (units/s) at or below which settling turns into a snap tween.
    pub velocity_threshold: f32,
    /// Which viewport point items snap to.
    pub alignment: Alignment,
    pub easing: Easing,
    pub duration_ms: u64,
}

impl SnapConfig {
    pub fn new() -> Self {
        Self {
            snap_on_end_drag: false,
            velocity_threshold: 200.0,
            alignment: Alignment::Before,
            easing: Easing::EaseOutCubic,
            duration_ms: 300,
        }
    }

    pub fn with_snap_on_end_drag(mut self, enabled: bool) -> Self {
        self.snap_on_end_drag = enabled;
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: f32) -> Self {
        debug_assert!(threshold >= 0.0, "velocity_threshold must be >= 0; got {threshold}");
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapState {
    #[default]
    Idle,
    Dragging,
    /// Released; waiting for the surface velocity to drop below the threshold.
    Settling,
    Tweening,
}

/// How a tween ended. Passed to its completion callback.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TweenEnd {
    /// The tween reached its target.
    Completed { target: f32 },
    /// The tween was stopped early (by input or by another tween) at `position`.
    Canceled { position: f32 },
}

/// Callback fired exactly once when a tween ends.
pub type OnTweenEnd = Box<dyn FnOnce(TweenEnd)>;

/// One sampled step of the active tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFrame {
    pub position: f32,
    pub direction: ScrollDirection,
    /// `true` on the frame that lands on the target.
    pub done: bool,
}

struct ActiveTween {
    tween: Tween,
    on_end: Option<OnTweenEnd>,
    inertia: bool,
    movement_type: MovementType,
}

/// Decides when to snap, and owns the single active tween.
///
/// The machine never moves the scroll position itself: [`SnapMachine::update`] reports when a
/// snap is due, and [`SnapMachine::tween_frame`] yields positions for the caller to apply.
/// [`crate::Controller`] wires both to a scroller.
pub struct SnapMachine {
    config: SnapConfig,
    dragging: bool,
    settling: bool,
    settle_countdown: u32,
    old_velocity: f32,
    active: Option<ActiveTween>,
}

impl SnapMachine {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            dragging: false,
            settling: false,
            settle_countdown: 0,
            old_velocity: 0.0,
            active: None,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SnapConfig) {
        self.config = config;
    }

    pub fn state(&self) -> SnapState {
        if self.active.is_some() {
            SnapState::Tweening
        } else if self.dragging {
            SnapState::Dragging
        } else if self.settling {
            SnapState::Settling
        } else {
            SnapState::Idle
        }
    }

    pub fn is_tweening(&self) -> bool {
        self.active.is_some()
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.active.as_ref().map(|a| &a.tween)
    }

    /// A scroll-wheel (or similar) input burst at `position`.
    ///
    /// Cancels any tween and arms a snap [`SCROLL_INPUT_SETTLE_TICKS`] updates later.
    pub fn on_scroll<F: ScrollSurface>(&mut self, surface: &mut F, position: f32) {
        self.cancel_tween(surface, position);
        self.settle_countdown = SCROLL_INPUT_SETTLE_TICKS;
    }

    pub fn on_begin_drag<F: ScrollSurface>(&mut self, surface: &mut F, position: f32) {
        self.cancel_tween(surface, position);
        self.dragging = true;
    }

    pub fn on_end_drag<F: ScrollSurface>(&mut self, surface: &F) {
        self.dragging = false;
        self.settling = self.active.is_none() && self.config.snap_on_end_drag;
        self.old_velocity = surface.velocity();
    }

    /// Per-tick settle watch. Returns `true` when a snap should start now.
    ///
    /// While settling, the current and previous velocity samples are averaged. Once the average
    /// is within the threshold the snap is due. If the surface reports zero velocity while the
    /// average is still above the threshold, the average is written back to keep it moving.
    pub fn update<F: ScrollSurface>(&mut self, surface: &mut F) -> bool {
        if self.settle_countdown > 0 {
            self.settle_countdown -= 1;
            if self.settle_countdown == 0 && self.active.is_none() && self.config.snap_on_end_drag
            {
                self.settling = true;
                self.old_velocity = surface.velocity();
            }
        }

        if self.dragging || !self.settling {
            return false;
        }

        let mut velocity = surface.velocity();
        let average = (velocity + self.old_velocity) / 2.0;
        let threshold = self.config.velocity_threshold;
        if average >= -threshold && average <= threshold {
            self.settling = false;
            vdebug!(average, "SnapMachine::update: snap due");
            return true;
        }
        if surface.inertia() && velocity == 0.0 {
            vwarn!(average, "SnapMachine::update: re-applying stalled velocity");
            velocity = average;
            surface.set_velocity(velocity);
        }
        self.old_velocity = velocity;
        false
    }

    /// Starts `tween`, canceling any running one at `position` first.
    ///
    /// The surface velocity is zeroed and its inertia and movement type are saved, then
    /// overridden (no inertia, unrestricted) until the tween ends.
    pub fn start_tween<F: ScrollSurface>(
        &mut self,
        surface: &mut F,
        position: f32,
        tween: Tween,
        on_end: Option<OnTweenEnd>,
    ) {
        self.cancel_tween(surface, position);

        surface.set_velocity(0.0);
        let inertia = surface.inertia();
        let movement_type = surface.movement_type();
        surface.set_inertia(false);
        surface.set_movement_type(MovementType::Unrestricted);

        vdebug!(
            from = tween.from,
            to = tween.to,
            duration_ms = tween.duration_ms,
            easing = ?tween.easing,
            "SnapMachine::start_tween"
        );
        self.active = Some(ActiveTween {
            tween,
            on_end,
            inertia,
            movement_type,
        });
    }

    /// Samples the active tween at `now_ms`.
    pub fn tween_frame(&self, now_ms: u64) -> Option<TweenFrame> {
        let tween = &self.active.as_ref()?.tween;
        Some(TweenFrame {
            position: tween.sample(now_ms),
            direction: tween.direction(),
            done: tween.is_done(now_ms),
        })
    }

    /// Ends the active tween as completed. Call after applying its final frame.
    pub fn finish_tween<F: ScrollSurface>(&mut self, surface: &mut F) {
        let Some(target) = self.active.as_ref().map(|a| a.tween.to) else {
            return;
        };
        vdebug!(target, "SnapMachine::finish_tween");
        self.stop(surface, TweenEnd::Completed { target });
    }

    /// Ends the active tween early at `position`. Returns `false` if none was running.
    ///
    /// Any pending snap (settling or a scroll-input countdown) is dropped as well.
    pub fn cancel_tween<F: ScrollSurface>(&mut self, surface: &mut F, position: f32) -> bool {
        if self.active.is_none() {
            self.settling = false;
            self.settle_countdown = 0;
            return false;
        }
        vdebug!(position, "SnapMachine::cancel_tween");
        self.stop(surface, TweenEnd::Canceled { position });
        true
    }

    fn stop<F: ScrollSurface>(&mut self, surface: &mut F, end: TweenEnd) {
        self.settling = false;
        self.settle_countdown = 0;
        let Some(active) = self.active.take() else {
            return;
        };
        surface.set_inertia(active.inertia);
        surface.set_movement_type(active.movement_type);
        surface.set_velocity(0.0);
        if let Some(on_end) = active.on_end {
            on_end(end);
        }
    }
}

impl Default for SnapMachine {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}

impl core::fmt::Debug for SnapMachine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnapMachine")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("settle_countdown", &self.settle_countdown)
            .field("old_velocity", &self.old_velocity)
            .field("tween", &self.tween())
            .finish()
    }
}
