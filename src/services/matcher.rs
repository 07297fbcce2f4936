//! Shopping-list item resolution against the catalog
//!
//! Each requested item fans out to zero, one or many catalog entries.
//! Unmatched items are kept as `NotFound` results, never dropped.

use crate::domain::error::NavError;
use crate::domain::types::{MatchOutcome, MatchResult, Product, ProductId};
use crate::services::catalog::Catalog;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info};

/// Resolves free-text items using substring name lookup
pub struct LocationMatcher<'c> {
    catalog: &'c Catalog,
}

impl<'c> LocationMatcher<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Resolve every item, preserving request order
    ///
    /// Fails with `EmptyInput` when no item has visible text. Blank items in an
    /// otherwise valid list are skipped.
    pub fn match_items<S: AsRef<str>>(&self, items: &[S]) -> Result<Vec<MatchResult<'c>>, NavError> {
        let queries: Vec<&str> =
            items.iter().map(|s| s.as_ref()).filter(|s| !s.trim().is_empty()).collect();
        if queries.is_empty() {
            return Err(NavError::EmptyInput);
        }

        let results: Vec<MatchResult<'c>> = queries.into_iter().map(|q| self.match_item(q)).collect();

        let not_found = results.iter().filter(|r| !r.is_found()).count();
        info!(
            requested = %results.len(),
            not_found = %not_found,
            "items_matched"
        );
        Ok(results)
    }

    /// Resolve a single item
    pub fn match_item(&self, query: &str) -> MatchResult<'c> {
        let found: SmallVec<[&'c Product; 4]> = self.catalog.find_by_name(query).into_iter().collect();

        let outcome = if found.is_empty() {
            debug!(item = %query, "item_not_found");
            MatchOutcome::NotFound
        } else {
            debug!(item = %query, matches = %found.len(), "item_found");
            MatchOutcome::Found(found)
        };

        MatchResult { query: query.to_string(), outcome }
    }
}

/// Distinct matched products in first-seen order
pub fn routable_products<'c>(results: &[MatchResult<'c>]) -> Vec<&'c Product> {
    let mut seen: FxHashSet<&'c ProductId> = FxHashSet::default();
    let mut products = Vec::new();
    for product in results.iter().flat_map(|r| r.products().iter().copied()) {
        if seen.insert(&product.id) {
            products.push(product);
        }
    }
    products
}

/// Queries that resolved to nothing, in request order
pub fn unmatched_queries(results: &[MatchResult<'_>]) -> Vec<String> {
    results.iter().filter(|r| !r.is_found()).map(|r| r.query.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Position, ShelfLevel};

    fn create_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register("tag001", "Leite Magro", Position::new(2.0, 1.0), ShelfLevel::MID);
        catalog.register("tag003", "Café", Position::new(3.0, 4.0), ShelfLevel::HIGH);
        catalog
    }

    #[test]
    fn test_single_match() {
        let catalog = create_catalog();
        let matcher = LocationMatcher::new(&catalog);

        let results = matcher.match_items(&["leite"]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].query, "leite");
        assert_eq!(results[0].products().len(), 1);
        assert_eq!(results[0].products()[0].name, "Leite Magro");
    }

    #[test]
    fn test_diacritic_sensitive_matching() {
        let catalog = create_catalog();
        let matcher = LocationMatcher::new(&catalog);

        let results = matcher.match_items(&["café", "cafe"]).unwrap();
        assert!(results[0].is_found());
        assert_eq!(results[0].products()[0].id, ProductId::new("tag003"));
        assert!(!results[1].is_found());
    }

    #[test]
    fn test_not_found_preserved_in_order() {
        let catalog = create_catalog();
        let matcher = LocationMatcher::new(&catalog);

        let results = matcher.match_items(&["pao", "leite", "sal"]).unwrap();
        let queries: Vec<&str> = results.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["pao", "leite", "sal"]);
        assert_eq!(results[0].outcome, MatchOutcome::NotFound);
        assert!(results[1].is_found());
        assert_eq!(unmatched_queries(&results), vec!["pao".to_string(), "sal".to_string()]);
    }

    #[test]
    fn test_ambiguous_fan_out() {
        let mut catalog = create_catalog();
        catalog.register("tag009", "Leite de Soja", Position::new(6.0, 1.0), ShelfLevel::LOW);
        let matcher = LocationMatcher::new(&catalog);

        let result = matcher.match_item("leite");
        assert!(result.is_ambiguous());
        assert_eq!(result.products().len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let catalog = create_catalog();
        let matcher = LocationMatcher::new(&catalog);

        let empty: [&str; 0] = [];
        assert_eq!(matcher.match_items(&empty), Err(NavError::EmptyInput));
        assert_eq!(matcher.match_items(&["  ", ""]), Err(NavError::EmptyInput));
    }

    #[test]
    fn test_routable_products_deduplicated() {
        let mut catalog = create_catalog();
        catalog.register("tag009", "Leite de Soja", Position::new(6.0, 1.0), ShelfLevel::LOW);
        let matcher = LocationMatcher::new(&catalog);

        // "soja" and "leite" both resolve tag009
        let results = matcher.match_items(&["leite", "soja", "pao"]).unwrap();
        let ids: Vec<&str> = routable_products(&results).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["tag001", "tag009"]);
    }
}
