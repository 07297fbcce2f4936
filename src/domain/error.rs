//! Error types for navigation operations.
//!
//! Expected domain conditions (an item missing from the catalog, a scanner
//! miss, a failed sweep) are ordinary return values, not errors. This enum
//! covers the cases a caller must handle as a distinct outcome.

/// Errors surfaced by planning and configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    /// The shopping list was empty or contained only whitespace.
    #[error("shopping list is empty")]
    EmptyInput,

    /// None of the requested items resolved to a catalog product.
    #[error("no routable products (unmatched: {})", unmatched.join(", "))]
    NoRoutableProducts {
        /// Requested items that matched nothing
        unmatched: Vec<String>,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
