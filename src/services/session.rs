//! Shopping session orchestration
//!
//! Wires the core components in their fixed order:
//! match → routable set → sequence → compose → (scan / sweep per stop) → cart.
//! All component state lives here; the catalog is borrowed read-only for the
//! whole session.

use crate::domain::error::NavError;
use crate::domain::report::SessionReport;
use crate::domain::types::{Instruction, MatchResult, Position, Product, Route, ScanHit, ShelfLevel};
use crate::infra::config::{Config, DirectionsConfig};
use crate::infra::metrics::Metrics;
use crate::services::cart::Cart;
use crate::services::catalog::Catalog;
use crate::services::confirmation::ShelfConfirmationDevice;
use crate::services::directions::DirectionComposer;
use crate::services::matcher::{routable_products, unmatched_queries, LocationMatcher};
use crate::services::scanner::ProximitySensor;
use crate::services::sequencer::RouteSequencer;
use crate::services::shopping_list::parse_shopping_list;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Output of planning: per-item matches, ordered route and its guidance
#[derive(Debug, Clone)]
pub struct Plan<'c> {
    pub matches: Vec<MatchResult<'c>>,
    pub route: Route<'c>,
    pub instructions: Vec<Instruction<'c>>,
}

impl<'c> Plan<'c> {
    /// Requested items that resolved to nothing, in request order
    pub fn not_found(&self) -> Vec<String> {
        unmatched_queries(&self.matches)
    }
}

pub struct ShoppingSession<'c> {
    catalog: &'c Catalog,
    matcher: LocationMatcher<'c>,
    sequencer: RouteSequencer,
    composer: DirectionComposer,
    scanner: ProximitySensor,
    device: ShelfConfirmationDevice,
    directions: DirectionsConfig,
    cart: Cart,
    position: Position,
    report: SessionReport,
    metrics: Arc<Metrics>,
}

impl<'c> ShoppingSession<'c> {
    pub fn new(catalog: &'c Catalog, config: &Config, metrics: Arc<Metrics>) -> Result<Self, NavError> {
        let kit = config.geometry_kit();
        let scanner = ProximitySensor::new(
            config.scanner_range_m(),
            config.scanner_noise_prob(),
            config.scanner_seed(),
        )?;
        let cart = Cart::new(&format!("{}-cart", config.site_id()));
        let report = SessionReport::new(config.site_id(), cart.id());

        info!(
            sid = %report.sid,
            site = %config.site_id(),
            products = %catalog.len(),
            "session_started"
        );

        Ok(Self {
            catalog,
            matcher: LocationMatcher::new(catalog),
            sequencer: RouteSequencer::new(kit),
            composer: DirectionComposer::new(kit),
            scanner,
            device: ShelfConfirmationDevice::new(config.device_sensitivity_m()),
            directions: config.directions().clone(),
            cart,
            position: config.start(),
            report,
            metrics,
        })
    }

    /// Plan a route for already-split list items
    ///
    /// Items that match nothing are reported in the plan; the call fails only
    /// when the list is empty or nothing at all is routable.
    pub fn plan<S: AsRef<str>>(&mut self, items: &[S]) -> Result<Plan<'c>, NavError> {
        let matches = self.matcher.match_items(items)?;
        let unmatched = unmatched_queries(&matches);
        for query in &unmatched {
            warn!(query = %query, "item_skipped");
        }

        self.report.requested = matches.iter().map(|m| m.query.clone()).collect();
        self.report.not_found = unmatched.clone();

        let products = routable_products(&matches);
        self.metrics.record_plan(matches.len() as u64, unmatched.len() as u64, products.len() as u64);
        if products.is_empty() {
            self.report.clear_route();
            return Err(NavError::NoRoutableProducts { unmatched });
        }

        let route = self.sequencer.sequence(self.position, &products);
        let instructions = self.composer.compose(&route);
        for stop in &route.stops {
            self.metrics.record_leg(stop.distance_m);
        }

        let directions = &self.directions;
        self.report.set_route(&route, &instructions, |d| directions.label(d).to_string());

        Ok(Plan { matches, route, instructions })
    }

    /// Split free text into items, then plan
    pub fn plan_text(&mut self, text: &str) -> Result<Plan<'c>, NavError> {
        let items = parse_shopping_list(text)?;
        self.plan(items.as_slice())
    }

    /// Read tags around the shopper's current position
    pub fn scan(&mut self) -> Vec<ScanHit> {
        let hits = self.scanner.scan(self.catalog, self.position);
        self.metrics.record_scan(hits.len() as u64);
        hits
    }

    /// Sweep the device over a product; on success it goes in the cart
    pub fn confirm(&mut self, product: &Product, device_position: Position, device_height: ShelfLevel) -> bool {
        let confirmed = self.device.sweep(product, device_position, device_height);
        self.metrics.record_sweep(confirmed);
        if !confirmed {
            debug!(id = %product.id, "sweep_missed");
            return false;
        }

        info!(id = %product.id, name = %product.name, "sweep_confirmed");
        self.report.mark_confirmed(product.id.as_str());
        self.cart.add(product.id.clone());
        true
    }

    /// Simulate a shopper following the plan stop by stop
    ///
    /// At each stop the shopper scans, then sweeps at the product's position
    /// and shelf level. Returns how many stops were confirmed.
    pub fn walk(&mut self, plan: &Plan<'c>) -> usize {
        let mut confirmed = 0;
        for (i, ins) in plan.instructions.iter().enumerate() {
            info!(
                stop = %(i + 1),
                id = %ins.to.id,
                name = %ins.to.name,
                steps = %ins.steps,
                distance_m = %format!("{:.2}", ins.distance_m),
                say = %self.directions.label(ins.direction),
                "instruction"
            );
            self.position = ins.to.position;

            let hits = self.scan();
            let seen = hits.iter().any(|h| h.id == ins.to.id);
            debug!(id = %ins.to.id, hits = %hits.len(), seen = %seen, "stop_reached");

            if self.confirm(ins.to, ins.to.position, ins.to.shelf_level) {
                confirmed += 1;
            }
        }
        confirmed
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the shopper without following a plan
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Close the session and hand back its report
    pub fn finish(self) -> SessionReport {
        let mut report = self.report;
        report.complete(self.cart.items().iter().map(|id| id.to_string()).collect());
        info!(
            sid = %report.sid,
            stops = %report.stops.len(),
            cart_items = %report.cart_items.len(),
            total_steps = %report.total_steps,
            "session_completed"
        );
        report
    }
}
