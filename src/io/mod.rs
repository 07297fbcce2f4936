//! IO modules - external data in and out
//!
//! - `catalog_source` - Catalog records from JSON files, plus the demo store
//! - `egress` - Session reports to file (JSONL format)

pub mod catalog_source;
pub mod egress;

// Re-export commonly used types
pub use catalog_source::{demo_catalog, load_catalog, parse_catalog, ProductRecord};
pub use egress::Egress;
