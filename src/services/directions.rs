//! Turn-by-turn guidance derived from a route
//!
//! Stateless: instructions are recomputed from the route on every call.

use crate::domain::geometry::{distance, GeometryKit};
use crate::domain::types::{Instruction, Position, Product, Route};

/// Converts route legs into distance, step count and heading
pub struct DirectionComposer {
    kit: GeometryKit,
}

impl DirectionComposer {
    pub fn new(kit: GeometryKit) -> Self {
        Self { kit }
    }

    /// One instruction per stop; the route start is the origin of the first leg
    pub fn compose<'a>(&self, route: &Route<'a>) -> Vec<Instruction<'a>> {
        let mut from = route.start;
        route
            .stops
            .iter()
            .map(|stop| {
                let instruction = self.leg(from, stop.product);
                from = stop.product.position;
                instruction
            })
            .collect()
    }

    /// Guidance from an arbitrary position to a product
    pub fn leg<'a>(&self, from: Position, to: &'a Product) -> Instruction<'a> {
        let (dx, dy) = from.delta_to(to.position);
        let distance_m = distance(from, to.position);
        Instruction {
            from,
            to,
            dx,
            dy,
            distance_m,
            steps: self.kit.steps_for(distance_m),
            direction: self.kit.direction_label(dx, dy),
        }
    }
}

impl Default for DirectionComposer {
    fn default() -> Self {
        Self::new(GeometryKit::default())
    }
}
