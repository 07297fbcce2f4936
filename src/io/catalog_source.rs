//! Catalog population from JSON records
//!
//! File format is a JSON array, one object per product:
//! `{"id": "tag001", "name": "leite", "x": 2.0, "y": 1.0, "shelf_level": 1}`
//! with optional `aisle`, `section`, `shelf` and `bin` labels. Records are registered in file
//! order, which becomes the catalog's tie-break order.

use crate::domain::types::{Position, Product, ShelfLevel};
use crate::services::catalog::Catalog;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// One catalog record as stored on disk
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub shelf_level: u8,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub shelf: Option<String>,
    #[serde(default)]
    pub bin: Option<String>,
}

impl ProductRecord {
    fn into_product(self) -> Product {
        Product::new(self.id, &self.name, Position::new(self.x, self.y), ShelfLevel(self.shelf_level))
            .with_placement(self.aisle, self.section)
            .with_shelf_label(self.shelf, self.bin)
    }
}

/// Build a catalog from records, rejecting non-finite coordinates
pub fn catalog_from_records(records: Vec<ProductRecord>) -> anyhow::Result<Catalog> {
    let mut catalog = Catalog::new();
    for (i, record) in records.into_iter().enumerate() {
        if !record.x.is_finite() || !record.y.is_finite() {
            bail!("record {} ({}) has a non-finite position", i, record.id);
        }
        catalog.insert(record.into_product());
    }
    Ok(catalog)
}

/// Parse a JSON catalog document
pub fn parse_catalog(json: &str) -> anyhow::Result<Catalog> {
    let records: Vec<ProductRecord> =
        serde_json::from_str(json).context("Failed to parse catalog records")?;
    catalog_from_records(records)
}

/// Load a JSON catalog file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> anyhow::Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog =
        parse_catalog(&content).with_context(|| format!("Invalid catalog file {}", path.display()))?;

    info!(file = %path.display(), products = %catalog.len(), "catalog_loaded");
    Ok(catalog)
}

/// Small demo store: milk, eggs, coffee and sugar
pub fn demo_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.register("tag001", "leite", Position::new(2.0, 1.0), ShelfLevel::MID);
    catalog.register("tag002", "ovos", Position::new(5.5, 1.2), ShelfLevel::LOW);
    catalog.register("tag003", "cafe", Position::new(3.0, 4.0), ShelfLevel::HIGH);
    catalog.register("tag004", "acucar", Position::new(6.0, 3.5), ShelfLevel::MID);
    catalog
}
