//! Positioned product registry
//!
//! Products are kept in insertion order; an id index gives O(1) lookup.
//! Insertion order is the tie-breaker for every ordered query.

use crate::domain::geometry::distance;
use crate::domain::types::{Position, Product, ProductId, ShelfLevel};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Store catalog, populated once per session and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, or overwrite the one with the same id in place
    pub fn register(
        &mut self,
        id: impl Into<ProductId>,
        name: &str,
        position: Position,
        shelf_level: ShelfLevel,
    ) {
        self.insert(Product::new(id, name, position, shelf_level));
    }

    /// Insert a fully built product (placement labels included)
    pub fn insert(&mut self, product: Product) {
        debug_assert!(product.position.is_finite(), "product position must be finite");

        if let Some(&slot) = self.index.get(&product.id) {
            debug!(id = %product.id, name = %product.name, "product_overwritten");
            self.products[slot] = product;
        } else {
            self.index.insert(product.id.clone(), self.products.len());
            self.products.push(product);
        }
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&slot| &self.products[slot])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// All products whose name contains `text`, case-insensitive, in insertion order
    ///
    /// Comparison lower-cases both sides but does not fold diacritics:
    /// "café" finds "Café", "cafe" does not. An empty needle matches nothing.
    pub fn find_by_name(&self, text: &str) -> Vec<&Product> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products.iter().filter(|p| p.name.to_lowercase().contains(&needle)).collect()
    }

    /// First product whose name equals `name`, case-insensitive
    pub fn find_exact(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// Products within `radius` meters of `position`, closest first
    ///
    /// Equal distances keep insertion order (stable sort).
    pub fn within(&self, position: Position, radius: f64) -> Vec<(&Product, f64)> {
        let mut hits: Vec<(&Product, f64)> = self
            .products
            .iter()
            .map(|p| (p, distance(position, p.position)))
            .filter(|(_, d)| *d <= radius)
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register("tag001", "Leite Magro", Position::new(2.0, 1.0), ShelfLevel::MID);
        catalog.register("tag002", "Leite de Soja", Position::new(5.0, 1.0), ShelfLevel::LOW);
        catalog.register("tag003", "Café", Position::new(3.0, 4.0), ShelfLevel::HIGH);
        catalog
    }

    #[test]
    fn test_register_and_get() {
        let catalog = create_catalog();
        assert_eq!(catalog.len(), 3);
        let p = catalog.get(&ProductId::new("tag003")).unwrap();
        assert_eq!(p.name, "Café");
        assert_eq!(p.shelf_level, ShelfLevel::HIGH);
        assert!(catalog.get(&ProductId::new("nope")).is_none());
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut catalog = create_catalog();
        catalog.register("tag001", "Leite Meio Gordo", Position::new(9.0, 9.0), ShelfLevel::LOW);

        assert_eq!(catalog.len(), 3);
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.id, ProductId::new("tag001"));
        assert_eq!(first.name, "Leite Meio Gordo");
        assert_eq!(first.position, Position::new(9.0, 9.0));
    }

    #[test]
    fn test_find_by_name_substring_fan_out() {
        let catalog = create_catalog();
        let names: Vec<&str> = catalog.find_by_name("leite").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Leite Magro", "Leite de Soja"]);

        assert_eq!(catalog.find_by_name("SOJA").len(), 1);
        assert!(catalog.find_by_name("pao").is_empty());
    }

    #[test]
    fn test_find_by_name_diacritics() {
        let catalog = create_catalog();
        // Case folds, accents do not
        assert_eq!(catalog.find_by_name("café").len(), 1);
        assert_eq!(catalog.find_by_name("CAFÉ").len(), 1);
        assert!(catalog.find_by_name("cafe").is_empty());
    }

    #[test]
    fn test_find_by_name_empty_needle() {
        let catalog = create_catalog();
        assert!(catalog.find_by_name("").is_empty());
        assert!(catalog.find_by_name("   ").is_empty());
    }

    #[test]
    fn test_find_exact() {
        let catalog = create_catalog();
        assert_eq!(catalog.find_exact("leite magro").unwrap().id, ProductId::new("tag001"));
        assert!(catalog.find_exact("leite").is_none());
    }

    #[test]
    fn test_within_sorted_closest_first() {
        let catalog = create_catalog();
        let hits = catalog.within(Position::new(2.5, 1.0), 3.0);
        let ids: Vec<&str> = hits.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["tag001", "tag002"]);
        assert!((hits[0].1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_within_radius_inclusive_and_ties_stable() {
        let mut catalog = Catalog::new();
        catalog.register("b", "B", Position::new(-1.0, 0.0), ShelfLevel::LOW);
        catalog.register("a", "A", Position::new(1.0, 0.0), ShelfLevel::LOW);
        catalog.register("c", "C", Position::new(0.0, 2.0), ShelfLevel::LOW);

        let hits = catalog.within(Position::ORIGIN, 1.0);
        let ids: Vec<&str> = hits.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_from_iterator() {
        let catalog: Catalog = vec![
            Product::new("x", "X", Position::ORIGIN, ShelfLevel::LOW),
            Product::new("x", "X2", Position::ORIGIN, ShelfLevel::MID),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&ProductId::new("x")).unwrap().name, "X2");
    }
}
