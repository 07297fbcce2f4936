//! Shared value types for store navigation

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Newtype wrapper for product identifiers (RFID tag ids in the demo store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Vertical shelf tier (0 = low, 1 = mid, 2 = high)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ShelfLevel(pub u8);

impl ShelfLevel {
    pub const LOW: ShelfLevel = ShelfLevel(0);
    pub const MID: ShelfLevel = ShelfLevel(1);
    pub const HIGH: ShelfLevel = ShelfLevel(2);
}

impl std::fmt::Display for ShelfLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-local position in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other` as (dx, dy)
    #[inline]
    pub fn delta_to(&self, other: Position) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A positioned product, owned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub position: Position,
    pub shelf_level: ShelfLevel,
    /// Aisle label, if the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
    /// Section label, if the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Shelf label within the aisle (e.g. "B3")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
    /// Box or bin label on the shelf
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: &str,
        position: Position,
        shelf_level: ShelfLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            position,
            shelf_level,
            aisle: None,
            section: None,
            shelf: None,
            bin: None,
        }
    }

    pub fn with_placement(mut self, aisle: Option<String>, section: Option<String>) -> Self {
        self.aisle = aisle;
        self.section = section;
        self
    }

    pub fn with_shelf_label(mut self, shelf: Option<String>, bin: Option<String>) -> Self {
        self.shelf = shelf;
        self.bin = bin;
        self
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Classified heading for one leg of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Sector centred on 0°
    Straight,
    /// Sector centred on 90°
    Left,
    /// Sector centred on -90°
    Right,
    /// Sector centred on ±180°
    Reverse,
    /// Negligible movement, keep going where you are
    Stay,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Straight => "straight",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Reverse => "reverse",
            Direction::Stay => "stay",
        }
    }
}

/// Resolution of one requested shopping-list item
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    /// One or more catalog entries contain the requested text
    Found(SmallVec<[&'a Product; 4]>),
    /// Nothing in the catalog matched
    NotFound,
}

/// One result per requested item, in request order
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    /// The requested text as given by the caller
    pub query: String,
    pub outcome: MatchOutcome<'a>,
}

impl<'a> MatchResult<'a> {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Found(_))
    }

    /// Matched products (empty when not found)
    pub fn products(&self) -> &[&'a Product] {
        match &self.outcome {
            MatchOutcome::Found(products) => products.as_slice(),
            MatchOutcome::NotFound => &[],
        }
    }

    /// More than one catalog entry matched this query
    pub fn is_ambiguous(&self) -> bool {
        self.products().len() > 1
    }
}

/// A visited product and the leg that reaches it from the previous stop
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop<'a> {
    pub product: &'a Product,
    /// Meters from the previous stop (or from the start for the first stop)
    pub distance_m: f64,
    pub steps: u32,
}

/// Ordered route from a starting position
#[derive(Debug, Clone, PartialEq)]
pub struct Route<'a> {
    pub start: Position,
    pub stops: Vec<RouteStop<'a>>,
}

impl<'a> Route<'a> {
    pub fn empty(start: Position) -> Self {
        Self { start, stops: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn total_distance_m(&self) -> f64 {
        self.stops.iter().map(|s| s.distance_m).sum()
    }

    pub fn total_steps(&self) -> u32 {
        self.stops.iter().map(|s| s.steps).sum()
    }

    /// Products in visiting order
    pub fn products(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.stops.iter().map(|s| s.product)
    }
}

/// Guidance for one transition between consecutive stops
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction<'a> {
    pub from: Position,
    pub to: &'a Product,
    pub dx: f64,
    pub dy: f64,
    pub distance_m: f64,
    pub steps: u32,
    pub direction: Direction,
}

/// Transient scanner read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanHit {
    pub id: ProductId,
    pub distance_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn product(id: &str, x: f64, y: f64) -> Product {
        Product::new(id, id, Position::new(x, y), ShelfLevel::LOW)
    }

    #[test]
    fn test_position_delta() {
        let a = Position::new(1.0, 2.0);
        let b = Position::new(4.0, -2.0);
        assert_eq!(a.delta_to(b), (3.0, -4.0));
        assert!(!Position::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_match_result_products() {
        let p1 = product("t1", 0.0, 0.0);
        let p2 = product("t2", 1.0, 0.0);

        let found = MatchResult { query: "t".to_string(), outcome: MatchOutcome::Found(smallvec![&p1, &p2]) };
        assert!(found.is_found());
        assert!(found.is_ambiguous());
        assert_eq!(found.products().len(), 2);

        let missing = MatchResult { query: "x".to_string(), outcome: MatchOutcome::NotFound };
        assert!(!missing.is_found());
        assert!(missing.products().is_empty());
    }

    #[test]
    fn test_route_totals() {
        let p1 = product("t1", 3.0, 0.0);
        let p2 = product("t2", 3.0, 4.0);
        let route = Route {
            start: Position::ORIGIN,
            stops: vec![
                RouteStop { product: &p1, distance_m: 3.0, steps: 4 },
                RouteStop { product: &p2, distance_m: 4.0, steps: 5 },
            ],
        };
        assert_eq!(route.len(), 2);
        assert_eq!(route.total_distance_m(), 7.0);
        assert_eq!(route.total_steps(), 9);
        assert!(Route::empty(Position::ORIGIN).is_empty());
    }

    #[test]
    fn test_product_id_serializes_transparent() {
        let json = serde_json::to_string(&ProductId::new("tag001")).unwrap();
        assert_eq!(json, "\"tag001\"");
    }
}
