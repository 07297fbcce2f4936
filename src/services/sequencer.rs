//! Greedy nearest-neighbour route ordering
//!
//! From the current position, always walk to the closest unvisited product.
//! O(n²), no backtracking, no global optimality. Ties go to the product that
//! comes first in the input.

use crate::domain::geometry::{distance, GeometryKit};
use crate::domain::types::{Position, Product, Route, RouteStop};
use rustc_hash::FxHashSet;
use tracing::info;

/// Orders products into a walking route
pub struct RouteSequencer {
    kit: GeometryKit,
}

impl RouteSequencer {
    pub fn new(kit: GeometryKit) -> Self {
        Self { kit }
    }

    /// Build a route visiting every distinct product exactly once
    ///
    /// Repeated ids are visited once, at the first occurrence. An empty input
    /// yields an empty route.
    pub fn sequence<'a>(&self, start: Position, products: &[&'a Product]) -> Route<'a> {
        let mut seen = FxHashSet::default();
        let candidates: Vec<&'a Product> =
            products.iter().copied().filter(|p| seen.insert(p.id.clone())).collect();

        let mut visited = vec![false; candidates.len()];
        let mut stops = Vec::with_capacity(candidates.len());
        let mut current = start;

        for _ in 0..candidates.len() {
            let mut best: Option<(usize, f64)> = None;
            for (i, product) in candidates.iter().enumerate() {
                if visited[i] {
                    continue;
                }
                let d = distance(current, product.position);
                // Strict comparison keeps the earliest candidate on ties
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((i, d));
                }
            }

            let Some((idx, distance_m)) = best else {
                break;
            };
            visited[idx] = true;
            let product = candidates[idx];
            stops.push(RouteStop { product, distance_m, steps: self.kit.steps_for(distance_m) });
            current = product.position;
        }

        let route = Route { start, stops };
        info!(
            stops = %route.len(),
            total_distance_m = %format!("{:.2}", route.total_distance_m()),
            total_steps = %route.total_steps(),
            "route_planned"
        );
        route
    }
}

impl Default for RouteSequencer {
    fn default() -> Self {
        Self::new(GeometryKit::default())
    }
}
