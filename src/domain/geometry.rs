//! Planar geometry helpers: distance, step estimation, heading classification
//!
//! Heading sectors (angle = atan2(dy, dx) in degrees), checked in this order:
//! - near-zero vector (both |dx| and |dy| below the stay threshold) -> `Stay`
//! - [-45, 45]   -> `Straight`
//! - (45, 135]   -> `Left`
//! - [-135, -45) -> `Right`
//! - otherwise   -> `Reverse`

use crate::domain::types::{Direction, Position};

/// Average adult step length in meters
pub const DEFAULT_STEP_LENGTH_M: f64 = 0.75;
/// Below this on both axes a move counts as "stay"
pub const DEFAULT_STAY_THRESHOLD_M: f64 = 0.3;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Step and heading conversion with configurable step length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryKit {
    step_length_m: f64,
    stay_threshold_m: f64,
}

impl Default for GeometryKit {
    fn default() -> Self {
        Self { step_length_m: DEFAULT_STEP_LENGTH_M, stay_threshold_m: DEFAULT_STAY_THRESHOLD_M }
    }
}

impl GeometryKit {
    /// Caller guarantees `step_length_m > 0` (validated by config loading)
    pub fn new(step_length_m: f64, stay_threshold_m: f64) -> Self {
        debug_assert!(step_length_m > 0.0, "step length must be positive");
        Self { step_length_m, stay_threshold_m }
    }

    #[inline]
    pub fn step_length_m(&self) -> f64 {
        self.step_length_m
    }

    #[inline]
    pub fn stay_threshold_m(&self) -> f64 {
        self.stay_threshold_m
    }

    /// Steps needed to cover `meters`, rounded half away from zero, never below 1
    pub fn steps_for(&self, meters: f64) -> u32 {
        let steps = (meters / self.step_length_m).round();
        if steps >= 1.0 {
            // Saturating float-to-int cast
            steps as u32
        } else {
            1
        }
    }

    /// Classify a displacement into a heading
    pub fn direction_label(&self, dx: f64, dy: f64) -> Direction {
        if dx.abs() < self.stay_threshold_m && dy.abs() < self.stay_threshold_m {
            return Direction::Stay;
        }

        let angle = dy.atan2(dx).to_degrees();
        if (-45.0..=45.0).contains(&angle) {
            Direction::Straight
        } else if angle > 45.0 && angle <= 135.0 {
            Direction::Left
        } else if (-135.0..-45.0).contains(&angle) {
            Direction::Right
        } else {
            Direction::Reverse
        }
    }
}
