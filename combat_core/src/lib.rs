//! combat_core - Turn-based combat and equipment engine
//!
//! This library provides:
//! - Equipment: slot assignment, ring/two-handed rules and stat aggregation
//! - Combat resolution: the d20 pipeline and the legacy power-vs-defense path
//! - Side effects: poison, corrosion, engulf, entangle and ring triggers
//! - Status effects with turn-boundary processing
//!
//! Every entry point takes a [`Session`] (item store, identification
//! registry, rules and RNG) and returns an ordered list of [`CombatEvent`]s.

pub mod combat;
pub mod config;
pub mod dice;
pub mod entity;
pub mod equipment;
pub mod fighter;
pub mod inventory;
pub mod item;
pub mod prelude;
pub mod rng;
pub mod session;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use combat::{attack_d20, attack_legacy, hit_percentage, CombatEvent, CombatEvents, Message, Tone};
pub use config::{CombatRules, ConfigError, ItemCatalog, ItemTemplate};
pub use dice::{DiceError, DiceExpr};
pub use entity::Combatant;
pub use equipment::{Equipment, BASE_ARMOR_CLASS};
pub use fighter::{DamageOutcome, Fighter, MAX_RESISTANCE};
pub use inventory::Inventory;
pub use item::{Equippable, IdentificationRegistry, Item, ItemStore, RingEffect};
pub use rng::{GameRng, Roller, ScriptedRolls};
pub use session::Session;
pub use status::{StatusEffect, StatusEffects, StatusKind, TurnContext};
pub use types::{
    Affinity, ArmorType, DamageType, EntityId, EquipmentSlot, ItemId, Material, SlotId, SpecialAbility,
};
