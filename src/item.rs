use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One selectable unit: an identifier, the resource it consumes and the benefit it brings.
///
/// Items are immutable once built. Two items are the same item when their identifiers match,
/// regardless of where they are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: String,
    cost: f64,
    benefit: f64,
}

impl Item {
    /// Creates a new item, rejecting negative or non-finite quantities.
    pub fn new(id: impl Into<String>, cost: f64, benefit: f64) -> Result<Self, CatalogError> {
        let id = id.into();
        if !cost.is_finite() || cost < 0.0 {
            return Err(CatalogError::InvalidCost { id, value: cost });
        }
        if !benefit.is_finite() || benefit < 0.0 {
            return Err(CatalogError::InvalidBenefit { id, value: benefit });
        }
        Ok(Self { id, cost, benefit })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn benefit(&self) -> f64 {
        self.benefit
    }
}

/// The ordered set of items available to one search.
///
/// Iteration order matters: expansion scans the catalog front to back, so earlier items win
/// ties. No two items share an identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, failing on the first repeated identifier.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(CatalogError::DuplicateItem(item.id().to_string()));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Position of the item with the given identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// The single largest per-item benefit, or `0.0` for an empty catalog.
    pub fn max_benefit(&self) -> f64 {
        self.items
            .iter()
            .map(Item::benefit)
            .fold(0.0, f64::max)
    }
}

impl TryFrom<Vec<Item>> for Catalog {
    type Error = CatalogError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Catalog::new(items)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
