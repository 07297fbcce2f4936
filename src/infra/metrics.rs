//! Lock-free session metrics and reporting
//!
//! Counters use atomics so the metrics handle can be shared as `&Metrics`
//! or `Arc<Metrics>` without locking. `report()` swaps the periodic counters
//! to zero and returns a snapshot.
//!
//! All atomics use Relaxed ordering; they are statistical counters only and
//! must not drive control flow.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Leg distance bucket boundaries (centimeters)
/// Buckets: ≤50, ≤100, ≤200, ≤400, ≤800, ≤1600, ≤3200, ≤6400, ≤12800, ≤25600, >25600 cm
const LEG_DIST_BOUNDS: [u64; 10] = [50, 100, 200, 400, 800, 1600, 3200, 6400, 12800, 25600];
const NUM_BUCKETS: usize = 11;

/// Compute bucket index for a leg distance (cm) using binary search
#[inline]
fn leg_bucket_index(dist_cm: u64) -> usize {
    LEG_DIST_BOUNDS.partition_point(|&bound| bound < dist_cm)
}

/// Update an atomic max value using compare-and-swap loop
#[inline]
fn update_atomic_max(atomic_max: &AtomicU64, new_value: u64) {
    let mut current_max = atomic_max.load(Ordering::Relaxed);
    while new_value > current_max {
        match atomic_max.compare_exchange_weak(
            current_max,
            new_value,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// Swap all buckets to zero and return their values
#[inline]
fn swap_buckets(buckets: &[AtomicU64; NUM_BUCKETS]) -> [u64; NUM_BUCKETS] {
    let mut result = [0u64; NUM_BUCKETS];
    for (i, bucket) in buckets.iter().enumerate() {
        result[i] = bucket.swap(0, Ordering::Relaxed);
    }
    result
}

/// Compute percentile from histogram buckets
/// Returns the upper bound of the bucket containing the percentile
fn percentile_from_buckets(buckets: &[u64; NUM_BUCKETS], percentile: f64) -> u64 {
    let total: u64 = buckets.iter().sum();
    if total == 0 {
        return 0;
    }

    let target = (total as f64 * percentile) as u64;
    let mut cumulative = 0u64;

    // Upper bounds for each bucket (last bucket uses 2x the previous bound)
    const BUCKET_UPPER_BOUNDS: [u64; NUM_BUCKETS] =
        [50, 100, 200, 400, 800, 1600, 3200, 6400, 12800, 25600, 51200];

    for (i, &count) in buckets.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            return BUCKET_UPPER_BOUNDS[i];
        }
    }
    BUCKET_UPPER_BOUNDS[NUM_BUCKETS - 1]
}

/// Lock-free metrics collector
pub struct Metrics {
    /// Sessions planned (monotonic)
    sessions_total: AtomicU64,
    /// Shopping-list items requested (reset on report)
    items_requested: AtomicU64,
    /// Items that matched nothing (reset on report)
    items_not_found: AtomicU64,
    /// Route stops planned (reset on report)
    stops_planned: AtomicU64,
    /// Leg distance histogram buckets (reset on report)
    leg_distance_buckets: [AtomicU64; NUM_BUCKETS],
    /// Sum of leg distances in cm (reset on report)
    leg_distance_sum_cm: AtomicU64,
    /// Longest leg in cm (reset on report)
    leg_distance_max_cm: AtomicU64,
    /// Scanner reads attempted (reset on report)
    scans: AtomicU64,
    /// Tags returned by the scanner (reset on report)
    scan_hits: AtomicU64,
    /// Scans that returned nothing (reset on report)
    scan_misses: AtomicU64,
    /// Confirmation sweeps attempted (reset on report)
    sweeps: AtomicU64,
    /// Sweeps that confirmed the product (reset on report)
    confirmations: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            sessions_total: AtomicU64::new(0),
            items_requested: AtomicU64::new(0),
            items_not_found: AtomicU64::new(0),
            stops_planned: AtomicU64::new(0),
            leg_distance_buckets: std::array::from_fn(|_| AtomicU64::new(0)),
            leg_distance_sum_cm: AtomicU64::new(0),
            leg_distance_max_cm: AtomicU64::new(0),
            scans: AtomicU64::new(0),
            scan_hits: AtomicU64::new(0),
            scan_misses: AtomicU64::new(0),
            sweeps: AtomicU64::new(0),
            confirmations: AtomicU64::new(0),
        }
    }

    /// Record a planned session and its item resolution counts
    #[inline]
    pub fn record_plan(&self, requested: u64, not_found: u64, stops: u64) {
        self.sessions_total.fetch_add(1, Ordering::Relaxed);
        self.items_requested.fetch_add(requested, Ordering::Relaxed);
        self.items_not_found.fetch_add(not_found, Ordering::Relaxed);
        self.stops_planned.fetch_add(stops, Ordering::Relaxed);
    }

    /// Record one route leg in meters
    #[inline]
    pub fn record_leg(&self, distance_m: f64) {
        let dist_cm = (distance_m * 100.0).round() as u64;
        self.leg_distance_buckets[leg_bucket_index(dist_cm)].fetch_add(1, Ordering::Relaxed);
        self.leg_distance_sum_cm.fetch_add(dist_cm, Ordering::Relaxed);
        update_atomic_max(&self.leg_distance_max_cm, dist_cm);
    }

    /// Record a scanner read and how many tags it returned
    #[inline]
    pub fn record_scan(&self, hits: u64) {
        self.scans.fetch_add(1, Ordering::Relaxed);
        self.scan_hits.fetch_add(hits, Ordering::Relaxed);
        if hits == 0 {
            self.scan_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a confirmation sweep
    #[inline]
    pub fn record_sweep(&self, confirmed: bool) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        if confirmed {
            self.confirmations.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn sessions_total(&self) -> u64 {
        self.sessions_total.load(Ordering::Relaxed)
    }

    /// Snapshot and reset periodic counters
    pub fn report(&self) -> MetricsSummary {
        let leg_buckets = swap_buckets(&self.leg_distance_buckets);
        let legs: u64 = leg_buckets.iter().sum();
        let leg_sum = self.leg_distance_sum_cm.swap(0, Ordering::Relaxed);
        let sweeps = self.sweeps.swap(0, Ordering::Relaxed);
        let confirmations = self.confirmations.swap(0, Ordering::Relaxed);

        MetricsSummary {
            sessions_total: self.sessions_total.load(Ordering::Relaxed),
            items_requested: self.items_requested.swap(0, Ordering::Relaxed),
            items_not_found: self.items_not_found.swap(0, Ordering::Relaxed),
            stops_planned: self.stops_planned.swap(0, Ordering::Relaxed),
            leg_distance_buckets: leg_buckets,
            leg_distance_avg_cm: if legs > 0 { leg_sum / legs } else { 0 },
            leg_distance_max_cm: self.leg_distance_max_cm.swap(0, Ordering::Relaxed),
            leg_distance_p95_cm: percentile_from_buckets(&leg_buckets, 0.95),
            scans: self.scans.swap(0, Ordering::Relaxed),
            scan_hits: self.scan_hits.swap(0, Ordering::Relaxed),
            scan_misses: self.scan_misses.swap(0, Ordering::Relaxed),
            sweeps,
            confirmations,
            sweep_misses: sweeps.saturating_sub(confirmations),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct MetricsSummary {
    pub sessions_total: u64,
    pub items_requested: u64,
    pub items_not_found: u64,
    pub stops_planned: u64,
    /// Leg distance histogram buckets
    /// Bounds: ≤50, ≤100, ≤200, ≤400, ≤800, ≤1600, ≤3200, ≤6400, ≤12800, ≤25600, >25600 cm
    pub leg_distance_buckets: [u64; NUM_BUCKETS],
    pub leg_distance_avg_cm: u64,
    pub leg_distance_max_cm: u64,
    /// 95th percentile leg distance (bucket upper bound, cm)
    pub leg_distance_p95_cm: u64,
    pub scans: u64,
    pub scan_hits: u64,
    pub scan_misses: u64,
    pub sweeps: u64,
    pub confirmations: u64,
    pub sweep_misses: u64,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            sessions_total = %self.sessions_total,
            items_requested = %self.items_requested,
            items_not_found = %self.items_not_found,
            stops = %self.stops_planned,
            leg_avg_cm = %self.leg_distance_avg_cm,
            leg_max_cm = %self.leg_distance_max_cm,
            leg_p95_cm = %self.leg_distance_p95_cm,
            scans = %self.scans,
            scan_misses = %self.scan_misses,
            sweeps = %self.sweeps,
            confirmations = %self.confirmations,
            "metrics"
        );
    }
}
