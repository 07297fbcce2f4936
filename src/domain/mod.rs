//! Domain models - core value types and geometry
//!
//! This module contains the canonical data types used throughout the system:
//! - `Product` - a positioned catalog entry with a shelf level
//! - `MatchResult` - resolution of one shopping-list item
//! - `Route` / `RouteStop` - ordered visiting plan
//! - `Instruction` - steps and heading for one leg
//! - `GeometryKit` - distance, step and heading conversion
//! - `NavError` - planning and configuration failures
//! - `SessionReport` - egress record of one shopping session

pub mod error;
pub mod geometry;
pub mod report;
pub mod types;

// Re-export commonly used types at module level
pub use error::NavError;
pub use geometry::{distance, GeometryKit};
pub use report::{epoch_ms, new_uuid_v7, SessionReport, StopReport};
pub use types::{
    Direction, Instruction, MatchOutcome, MatchResult, Position, Product, ProductId, Route,
    RouteStop, ScanHit, ShelfLevel,
};
