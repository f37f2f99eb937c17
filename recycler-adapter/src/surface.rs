use recycler::MovementType;

/// The physical scroll surface a [`crate::Controller`] drives.
///
/// Velocity is measured in scroll-position units per second along the scroll axis: a positive
/// velocity moves the scroll position forward.
///
/// While a tween runs, the controller owns the surface: it zeroes the velocity, disables
/// inertia and switches to [`MovementType::Unrestricted`], then restores both flags when the
/// tween ends.
///
/// The normalized position uses the surface convention of [`recycler::Scroller`]: `0..=1` of
/// the scrollable distance, inverted on the vertical axis. The controller writes it back after
/// every position change it makes (tween frames, loop re-centering) so the next report from the
/// surface starts where the scroller is.
pub trait ScrollSurface {
    fn normalized_position(&self) -> f32;

    fn set_normalized_position(&mut self, normalized: f32);

    fn velocity(&self) -> f32;

    fn set_velocity(&mut self, velocity: f32);

    fn inertia(&self) -> bool;

    fn set_inertia(&mut self, inertia: bool);

    fn movement_type(&self) -> MovementType;

    fn set_movement_type(&mut self, movement_type: MovementType);
}

/// Per-millisecond velocity retention used by [`SimSurface::new`]. Roughly 13.5% of the
/// velocity survives one second of free scrolling.
pub const DEFAULT_DECAY_PER_MS: f32 = 0.998;

/// Velocities below this magnitude (units/s) snap to zero.
const REST_VELOCITY: f32 = 1.0;

/// An in-memory [`ScrollSurface`] with exponential inertia decay.
///
/// Useful for demos, tests and hosts without a physics engine of their own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSurface {
    normalized_position: f32,
    velocity: f32,
    inertia: bool,
    movement_type: MovementType,
    decay_per_ms: f32,
}

impl SimSurface {
    pub fn new() -> Self {
        Self {
            normalized_position: 0.0,
            velocity: 0.0,
            inertia: true,
            movement_type: MovementType::Elastic,
            decay_per_ms: DEFAULT_DECAY_PER_MS,
        }
    }

    pub fn with_inertia(mut self, inertia: bool) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn with_movement_type(mut self, movement_type: MovementType) -> Self {
        self.movement_type = movement_type;
        self
    }

    /// Sets the fraction of velocity kept per millisecond (`0..=1`).
    pub fn with_decay_per_ms(mut self, decay_per_ms: f32) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&decay_per_ms),
            "decay_per_ms must be within 0..=1; got {decay_per_ms}"
        );
        self.decay_per_ms = decay_per_ms.clamp(0.0, 1.0);
        self
    }

    pub fn decay_per_ms(&self) -> f32 {
        self.decay_per_ms
    }

    /// Advances the free-scroll simulation by `dt_ms` and returns the displacement to add to
    /// the scroll position.
    ///
    /// Without inertia the surface stops immediately and the displacement is zero.
    pub fn step(&mut self, dt_ms: u64) -> f32 {
        if !self.inertia {
            self.velocity = 0.0;
            return 0.0;
        }
        if self.velocity == 0.0 || dt_ms == 0 {
            return 0.0;
        }

        let mut displacement = 0.0;
        for _ in 0..dt_ms {
            self.velocity *= self.decay_per_ms;
            displacement += self.velocity / 1000.0;
        }
        if self.velocity > -REST_VELOCITY && self.velocity < REST_VELOCITY {
            self.velocity = 0.0;
        }
        displacement
    }
}

impl Default for SimSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSurface for SimSurface {
    fn normalized_position(&self) -> f32 {
        self.normalized_position
    }

    fn set_normalized_position(&mut self, normalized: f32) {
        self.normalized_position = normalized;
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    fn inertia(&self) -> bool {
        self.inertia
    }

    fn set_inertia(&mut self, inertia: bool) {
        self.inertia = inertia;
    }

    fn movement_type(&self) -> MovementType {
        self.movement_type
    }

    fn set_movement_type(&mut self, movement_type: MovementType) {
        self.movement_type = movement_type;
    }
}
