//! Handheld shelf confirmation device
//!
//! The shopper sweeps the device over a shelf; it beeps only when it is within
//! `sensitivity_m` of the product tag AND held at the product's shelf level.

use crate::domain::geometry::distance;
use crate::domain::types::{Position, Product, ShelfLevel};
use tracing::debug;

/// Default sweep sensitivity in meters
pub const DEFAULT_SENSITIVITY_M: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfConfirmationDevice {
    sensitivity_m: f64,
}

impl Default for ShelfConfirmationDevice {
    fn default() -> Self {
        Self { sensitivity_m: DEFAULT_SENSITIVITY_M }
    }
}

impl ShelfConfirmationDevice {
    pub fn new(sensitivity_m: f64) -> Self {
        Self { sensitivity_m }
    }

    #[inline]
    pub fn sensitivity_m(&self) -> f64 {
        self.sensitivity_m
    }

    /// True iff the device is close enough and at the right shelf tier
    pub fn sweep(&self, product: &Product, device_position: Position, device_height: ShelfLevel) -> bool {
        let distance_m = distance(product.position, device_position);
        let in_reach = distance_m <= self.sensitivity_m;
        let level_match = device_height == product.shelf_level;

        debug!(
            id = %product.id,
            distance_m = %format!("{:.2}", distance_m),
            device_height = %device_height,
            shelf_level = %product.shelf_level,
            in_reach = %in_reach,
            level_match = %level_match,
            "sweep"
        );
        in_reach && level_match
    }
}
