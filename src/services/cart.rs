//! Shopping cart with confirmed product ids
//!
//! Append-only within a session; each id is held at most once.

use crate::domain::types::ProductId;
use rustc_hash::FxHashSet;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Cart {
    id: String,
    contents: Vec<ProductId>,
    present: FxHashSet<ProductId>,
}

impl Cart {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string(), contents: Vec::new(), present: FxHashSet::default() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a confirmed product; returns false if it was already in the cart
    pub fn add(&mut self, product_id: ProductId) -> bool {
        if !self.present.insert(product_id.clone()) {
            return false;
        }
        info!(cart = %self.id, id = %product_id, items = %(self.contents.len() + 1), "cart_item_added");
        self.contents.push(product_id);
        true
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.present.contains(product_id)
    }

    /// Contents in the order they were added
    pub fn items(&self) -> &[ProductId] {
        &self.contents
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
