//! Inventory - Carried item handles with a capacity limit

use crate::types::ItemId;
use serde::{Deserialize, Serialize};

/// Items an entity carries (not counting equipped items)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemId>,
    pub capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Inventory {
            items: Vec::new(),
            capacity,
        }
    }

    /// Add an item. Returns false (and leaves the inventory untouched) when full.
    pub fn add_item(&mut self, item: ItemId) -> bool {
        if self.contains(item) {
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item. Returns false if it was not carried.
    pub fn remove(&mut self, item: ItemId) -> bool {
        match self.items.iter().position(|&id| id == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
