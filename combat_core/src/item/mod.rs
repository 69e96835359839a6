//! Items - Arena of item entities and their combat components

mod equippable;
mod identify;

pub use equippable::{Equippable, RingEffect, DEFAULT_CRIT_THRESHOLD, KEEN_CRIT_THRESHOLD};
pub use identify::IdentificationRegistry;

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name once identified
    pub name: String,
    /// Identification key shared by every item of this kind
    pub kind: String,
    /// Name shown while the kind is unidentified. Items without one are
    /// always known.
    pub unidentified_name: Option<String>,
    /// Combat component, if the item can be worn or wielded
    pub equippable: Option<Equippable>,
}

impl Item {
    /// Create an item whose kind is derived from its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = name.to_lowercase().replace(' ', "_");
        Item {
            name,
            kind,
            unidentified_name: None,
            equippable: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Give the item an unidentified appearance (makes it identifiable)
    pub fn with_unidentified_name(mut self, name: impl Into<String>) -> Self {
        self.unidentified_name = Some(name.into());
        self
    }

    pub fn with_equippable(mut self, equippable: Equippable) -> Self {
        self.equippable = Some(equippable);
        self
    }

    /// Whether the item has a hidden identity at all
    pub fn is_identifiable(&self) -> bool {
        self.unidentified_name.is_some()
    }

    /// Name as the player currently knows it
    pub fn display_name(&self, registry: &IdentificationRegistry) -> &str {
        match &self.unidentified_name {
            Some(hidden) if !registry.is_identified(&self.kind) => hidden,
            _ => &self.name,
        }
    }
}

/// Owner of every item in a session
///
/// Equipment and inventories refer to items by [`ItemId`]; the store is the
/// single place item components live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemStore {
    items: BTreeMap<ItemId, Item>,
    next_id: u32,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item and return its handle
    pub fn spawn(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Equippable component of an item, if both exist
    pub fn equippable(&self, id: ItemId) -> Option<&Equippable> {
        self.items.get(&id).and_then(|item| item.equippable.as_ref())
    }

    pub fn equippable_mut(&mut self, id: ItemId) -> Option<&mut Equippable> {
        self.items.get_mut(&id).and_then(|item| item.equippable.as_mut())
    }

    /// Remove an item from the world entirely
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name for messages; unknown ids read as "something"
    pub fn display_name(&self, id: ItemId, registry: &IdentificationRegistry) -> String {
        self.get(id)
            .map(|item| item.display_name(registry).to_string())
            .unwrap_or_else(|| "something".to_string())
    }
}
