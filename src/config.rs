//! Configuration types for the simulation.

use crate::float::Float;
use crate::vec::Vec2;

/// Tuning constants for integration, collision resolution, broad phase,
/// and the sleep state machine.
///
/// # Builder Pattern
/// ```
/// use rigid2d::{PhysicsConfig, Vec2};
///
/// let config: PhysicsConfig<f32> = PhysicsConfig::new()
///     .with_gravity(Vec2::new(0.0, -9.81))
///     .with_damping(0.999)
///     .with_cell_size(100.0);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct PhysicsConfig<F: Float> {
    /// Gravity acceleration vector. Default: zero (no gravity).
    pub gravity: Vec2<F>,
    /// Per-step velocity damping factor applied to linear and angular
    /// velocity after integration. Default: 0.999.
    pub damping: F,
    /// Penetration below this depth is left uncorrected. Default: 0.01.
    pub slop: F,
    /// Fraction of the remaining penetration corrected per resolve.
    /// Default: 0.8.
    pub correction_percent: F,
    /// Combined kinetic + rotational energy below which a body starts
    /// accumulating sleep time. Default: 0.01.
    pub sleep_energy_threshold: F,
    /// Seconds of continuous low energy before a body falls asleep.
    /// Default: 1.0.
    pub sleep_delay: F,
    /// Broad-phase grid cell size. Should be on the order of typical body
    /// size. Default: 100.0.
    pub cell_size: F,
}

impl<F: Float> PhysicsConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        PhysicsConfig {
            gravity: Vec2::zero(),
            damping: F::from_f32(0.999),
            slop: F::from_f32(0.01),
            correction_percent: F::from_f32(0.8),
            sleep_energy_threshold: F::from_f32(0.01),
            sleep_delay: F::one(),
            cell_size: F::from_f32(100.0),
        }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the velocity damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the positional correction slop.
    pub fn with_slop(mut self, slop: F) -> Self {
        self.slop = slop;
        self
    }

    /// Set the positional correction percentage.
    pub fn with_correction_percent(mut self, percent: F) -> Self {
        self.correction_percent = percent;
        self
    }

    /// Set the sleep energy threshold.
    pub fn with_sleep_energy_threshold(mut self, threshold: F) -> Self {
        self.sleep_energy_threshold = threshold;
        self
    }

    /// Set the low-energy delay before a body falls asleep.
    pub fn with_sleep_delay(mut self, delay: F) -> Self {
        self.sleep_delay = delay;
        self
    }

    /// Set the broad-phase cell size.
    pub fn with_cell_size(mut self, cell_size: F) -> Self {
        self.cell_size = cell_size;
        self
    }
}

impl<F: Float> Default for PhysicsConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
