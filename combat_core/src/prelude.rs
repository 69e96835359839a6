//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Entities and components
pub use crate::entity::Combatant;
pub use crate::equipment::Equipment;
pub use crate::fighter::Fighter;
pub use crate::inventory::Inventory;
pub use crate::item::{Equippable, Item, ItemStore, RingEffect};

// Combat
pub use crate::combat::{CombatEvent, CombatEvents, Tone};
pub use crate::session::Session;
pub use crate::status::{StatusEffect, StatusKind, TurnContext};

// Rolls
pub use crate::dice::DiceExpr;
pub use crate::rng::{GameRng, Roller, ScriptedRolls};

// Types
pub use crate::types::{Affinity, DamageType, EntityId, EquipmentSlot, ItemId, Material, SpecialAbility};

// Config
pub use crate::config::{CombatRules, ItemCatalog};
