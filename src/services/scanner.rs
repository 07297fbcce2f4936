//! Simulated RFID proximity scanner
//!
//! Every in-range tag is read independently and dropped with probability
//! `noise_prob`, so repeated scans at one spot can disagree. The RNG is owned
//! by the scanner and seedable for reproducible sessions.

use crate::domain::error::NavError;
use crate::domain::types::{Position, ScanHit};
use crate::services::catalog::Catalog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Lossy proximity sensor over a catalog
pub struct ProximitySensor {
    range_m: f64,
    noise_prob: f64,
    rng: StdRng,
}

impl ProximitySensor {
    /// Create a scanner; `seed = None` draws from OS entropy
    pub fn new(range_m: f64, noise_prob: f64, seed: Option<u64>) -> Result<Self, NavError> {
        if !range_m.is_finite() || range_m < 0.0 {
            return Err(NavError::InvalidConfig(format!("scanner range {range_m} must be >= 0")));
        }
        if !(0.0..=1.0).contains(&noise_prob) {
            return Err(NavError::InvalidConfig(format!(
                "scanner noise_prob {noise_prob} must be within [0, 1]"
            )));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { range_m, noise_prob, rng })
    }

    #[inline]
    pub fn range_m(&self) -> f64 {
        self.range_m
    }

    #[inline]
    pub fn noise_prob(&self) -> f64 {
        self.noise_prob
    }

    /// Read tags around `position`, closest first
    ///
    /// An empty result is a normal miss, not an error.
    pub fn scan(&mut self, catalog: &Catalog, position: Position) -> Vec<ScanHit> {
        let mut hits = Vec::new();
        for (product, distance_m) in catalog.within(position, self.range_m) {
            // One draw per in-range tag; gen_bool(0) never drops, gen_bool(1) always does
            if !self.rng.gen_bool(self.noise_prob) {
                hits.push(ScanHit { id: product.id.clone(), distance_m });
            }
        }

        debug!(
            x = %position.x,
            y = %position.y,
            hits = %hits.len(),
            "scan_completed"
        );
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ShelfLevel;

    fn create_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register("tag002", "ovos", Position::new(5.5, 1.2), ShelfLevel::LOW);
        catalog.register("tag001", "leite", Position::new(2.0, 1.0), ShelfLevel::MID);
        catalog.register("tag003", "cafe", Position::new(3.0, 4.0), ShelfLevel::HIGH);
        catalog
    }

    #[test]
    fn test_no_noise_returns_all_in_range_closest_first() {
        let catalog = create_catalog();
        let mut scanner = ProximitySensor::new(100.0, 0.0, Some(7)).unwrap();

        let hits = scanner.scan(&catalog, Position::ORIGIN);
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["tag001", "tag003", "tag002"]);
        assert!(hits.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }

    #[test]
    fn test_full_noise_returns_nothing() {
        let catalog = create_catalog();
        let mut scanner = ProximitySensor::new(100.0, 1.0, Some(7)).unwrap();

        for _ in 0..20 {
            assert!(scanner.scan(&catalog, Position::ORIGIN).is_empty());
        }
    }

    #[test]
    fn test_range_limits_reads() {
        let catalog = create_catalog();
        let mut scanner = ProximitySensor::new(2.5, 0.0, None).unwrap();

        let hits = scanner.scan(&catalog, Position::ORIGIN);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "tag001");
    }

    #[test]
    fn test_same_seed_same_reads() {
        let catalog = create_catalog();
        let mut a = ProximitySensor::new(100.0, 0.5, Some(42)).unwrap();
        let mut b = ProximitySensor::new(100.0, 0.5, Some(42)).unwrap();

        for _ in 0..10 {
            assert_eq!(a.scan(&catalog, Position::ORIGIN), b.scan(&catalog, Position::ORIGIN));
        }
    }

    #[test]
    fn test_partial_noise_drops_some_reads() {
        let catalog = create_catalog();
        let mut scanner = ProximitySensor::new(100.0, 0.5, Some(1)).unwrap();

        let total: usize = (0..200).map(|_| scanner.scan(&catalog, Position::ORIGIN).len()).sum();
        // 600 draws at p = 0.5
        assert!(total > 200 && total < 400, "unexpected hit count {total}");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ProximitySensor::new(-1.0, 0.1, None).is_err());
        assert!(ProximitySensor::new(2.0, 1.5, None).is_err());
        assert!(ProximitySensor::new(2.0, -0.1, None).is_err());
        assert!(ProximitySensor::new(2.0, f64::NAN, None).is_err());
    }
}
