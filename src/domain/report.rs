//! Session report: what was asked for, how it was routed, what ended in the cart

use crate::domain::types::{Direction, Instruction, Route};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Generate a new UUIDv7 (time-sortable)
pub fn new_uuid_v7() -> String {
    Uuid::now_v7().to_string()
}

/// Get current epoch milliseconds
#[inline]
pub fn epoch_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// One visited stop as written to the egress file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopReport {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub shelf_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    pub distance_m: f64,
    pub steps: u32,
    pub direction: Direction,
    /// Human phrase for `direction`
    pub say: String,
    pub confirmed: bool,
}

/// Complete record of one shopping session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub sid: String, // UUIDv7 session ID
    pub site: String,
    pub cart: String,
    pub started_at: u64,       // epoch ms
    pub ended_at: Option<u64>, // epoch ms
    pub requested: Vec<String>,
    pub not_found: Vec<String>,
    pub stops: Vec<StopReport>,
    pub cart_items: Vec<String>,
    pub total_distance_m: f64,
    pub total_steps: u32,
}

impl SessionReport {
    pub fn new(site: &str, cart: &str) -> Self {
        Self {
            sid: new_uuid_v7(),
            site: site.to_string(),
            cart: cart.to_string(),
            started_at: epoch_ms(),
            ended_at: None,
            requested: Vec::new(),
            not_found: Vec::new(),
            stops: Vec::new(),
            cart_items: Vec::new(),
            total_distance_m: 0.0,
            total_steps: 0,
        }
    }

    /// Fill route totals and one stop entry per instruction
    ///
    /// `say` maps a heading to its spoken phrase.
    pub fn set_route<F>(&mut self, route: &Route<'_>, instructions: &[Instruction<'_>], say: F)
    where
        F: Fn(Direction) -> String,
    {
        self.total_distance_m = route.total_distance_m();
        self.total_steps = route.total_steps();
        self.stops = instructions
            .iter()
            .map(|ins| StopReport {
                id: ins.to.id.to_string(),
                name: ins.to.name.clone(),
                x: ins.to.position.x,
                y: ins.to.position.y,
                shelf_level: ins.to.shelf_level.0,
                aisle: ins.to.aisle.clone(),
                section: ins.to.section.clone(),
                shelf: ins.to.shelf.clone(),
                bin: ins.to.bin.clone(),
                distance_m: ins.distance_m,
                steps: ins.steps,
                direction: ins.direction,
                say: say(ins.direction),
                confirmed: false,
            })
            .collect();
    }

    /// Drop the planned stops and totals, keeping the requested items
    pub fn clear_route(&mut self) {
        self.stops.clear();
        self.total_distance_m = 0.0;
        self.total_steps = 0;
    }

    /// Mark a stop as confirmed by the handheld device
    pub fn mark_confirmed(&mut self, id: &str) {
        if let Some(stop) = self.stops.iter_mut().find(|s| s.id == id) {
            stop.confirmed = true;
        }
    }

    /// Close the session
    pub fn complete(&mut self, cart_items: Vec<String>) {
        self.cart_items = cart_items;
        self.ended_at = Some(epoch_ms());
    }

    /// Every planned stop ended up in the cart
    pub fn all_confirmed(&self) -> bool {
        self.stops.iter().all(|s| s.confirmed)
    }

    /// Convert to a single-line JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Position, Product, RouteStop, ShelfLevel};

    #[test]
    fn test_new_report() {
        let report = SessionReport::new("demo", "cart-001");
        assert_eq!(report.sid.len(), 36);
        assert_eq!(report.site, "demo");
        assert!(report.started_at > 0);
        assert!(report.ended_at.is_none());
    }

    #[test]
    fn test_set_route_and_confirm() {
        let p = Product::new("tag001", "leite", Position::new(3.0, 0.0), ShelfLevel::MID)
            .with_placement(Some("1".to_string()), None)
            .with_shelf_label(Some("B".to_string()), Some("12".to_string()));
        let route = Route {
            start: Position::ORIGIN,
            stops: vec![RouteStop { product: &p, distance_m: 3.0, steps: 4 }],
        };
        let instructions = vec![Instruction {
            from: Position::ORIGIN,
            to: &p,
            dx: 3.0,
            dy: 0.0,
            distance_m: 3.0,
            steps: 4,
            direction: Direction::Straight,
        }];

        let mut report = SessionReport::new("demo", "cart-001");
        report.set_route(&route, &instructions, |d| d.as_str().to_uppercase());
        assert_eq!(report.stops.len(), 1);
        assert_eq!(report.stops[0].say, "STRAIGHT");
        assert_eq!(report.stops[0].aisle.as_deref(), Some("1"));
        assert_eq!(report.stops[0].shelf.as_deref(), Some("B"));
        assert_eq!(report.stops[0].bin.as_deref(), Some("12"));
        assert!(report.stops[0].section.is_none());

        let parsed: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(parsed["stops"][0]["bin"], "12");
        assert!(parsed["stops"][0].get("section").is_none());
        assert_eq!(report.total_steps, 4);
        assert!(!report.all_confirmed());

        report.mark_confirmed("tag001");
        assert!(report.all_confirmed());

        report.complete(vec!["tag001".to_string()]);
        assert!(report.ended_at.is_some());
    }

    #[test]
    fn test_clear_route() {
        let p = Product::new("tag001", "leite", Position::new(3.0, 0.0), ShelfLevel::MID);
        let route = Route {
            start: Position::ORIGIN,
            stops: vec![RouteStop { product: &p, distance_m: 3.0, steps: 4 }],
        };
        let mut report = SessionReport::new("demo", "cart-001");
        report.requested = vec!["leite".to_string()];
        report.set_route(&route, &[], |d| d.as_str().to_string());
        assert_eq!(report.total_steps, 4);

        report.clear_route();
        assert!(report.stops.is_empty());
        assert_eq!(report.total_steps, 0);
        assert_eq!(report.total_distance_m, 0.0);
        assert_eq!(report.requested, vec!["leite".to_string()]);
    }

    #[test]
    fn test_to_json() {
        let mut report = SessionReport::new("demo", "cart-001");
        report.not_found.push("pao".to_string());

        let parsed: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(parsed["site"], "demo");
        assert_eq!(parsed["not_found"][0], "pao");
        assert!(parsed["ended_at"].is_null());
    }
}
