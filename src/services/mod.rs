//! Services - navigation logic and session state
//!
//! This module contains the core services:
//! - `catalog` - Positioned product registry
//! - `matcher` - Shopping-list item resolution
//! - `sequencer` - Nearest-neighbor route ordering
//! - `directions` - Steps and heading per route leg
//! - `scanner` - Lossy RFID proximity reads
//! - `confirmation` - Shelf-level handheld confirmation
//! - `cart` - Confirmed product ids
//! - `shopping_list` - Free-text list splitting
//! - `session` - Orchestrates one shopping session

pub mod cart;
pub mod catalog;
pub mod confirmation;
pub mod directions;
pub mod matcher;
pub mod scanner;
pub mod sequencer;
pub mod session;
pub mod shopping_list;

// Re-export commonly used types
pub use cart::Cart;
pub use catalog::Catalog;
pub use confirmation::ShelfConfirmationDevice;
pub use directions::DirectionComposer;
pub use matcher::{routable_products, unmatched_queries, LocationMatcher};
pub use scanner::ProximitySensor;
pub use sequencer::RouteSequencer;
pub use session::{Plan, ShoppingSession};
pub use shopping_list::parse_shopping_list;
