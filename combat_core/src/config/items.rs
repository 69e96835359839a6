//! Item templates loaded from TOML

use super::ConfigError;
use crate::dice::DiceExpr;
use crate::item::{Equippable, Item, ItemStore, RingEffect, DEFAULT_CRIT_THRESHOLD};
use crate::types::{ArmorType, DamageType, EquipmentSlot, ItemId, Material};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// A spawnable item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub unidentified_name: Option<String>,
    pub slot: EquipmentSlot,

    // === Bonuses ===
    #[serde(default)]
    pub power_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
    #[serde(default)]
    pub max_hp_bonus: i32,
    #[serde(default)]
    pub armor_class_bonus: i32,
    #[serde(default)]
    pub to_hit_bonus: i32,

    // === Weapon ===
    /// Dice notation, e.g. "1d8"; overrides `damage_min`/`damage_max`
    #[serde(default)]
    pub damage: Option<DiceExpr>,
    #[serde(default)]
    pub damage_min: i32,
    #[serde(default)]
    pub damage_max: i32,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub two_handed: bool,
    #[serde(default = "default_reach")]
    pub reach: i32,
    #[serde(default = "default_crit_threshold")]
    pub crit_threshold: i32,
    #[serde(default)]
    pub applies_poison_on_hit: bool,

    // === Armor ===
    #[serde(default)]
    pub defense_min: i32,
    #[serde(default)]
    pub defense_max: i32,
    #[serde(default)]
    pub armor_type: Option<ArmorType>,
    #[serde(default)]
    pub dex_cap: Option<i32>,

    // === Misc ===
    #[serde(default)]
    pub resistances: BTreeMap<DamageType, i32>,
    #[serde(default)]
    pub speed_bonus: f64,
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub ring_effect: Option<RingEffect>,
}

fn default_reach() -> i32 {
    1
}
fn default_crit_threshold() -> i32 {
    DEFAULT_CRIT_THRESHOLD
}

impl ItemTemplate {
    /// Build the combat component, normalizing ranges
    pub fn equippable(&self) -> Equippable {
        let mut equippable = Equippable::new(self.slot)
            .with_power_bonus(self.power_bonus)
            .with_defense_bonus(self.defense_bonus)
            .with_max_hp_bonus(self.max_hp_bonus)
            .with_to_hit_bonus(self.to_hit_bonus)
            .with_defense(self.defense_min, self.defense_max)
            .with_speed_bonus(self.speed_bonus)
            .with_reach(self.reach);

        equippable = match self.damage {
            Some(dice) => equippable.with_dice(dice),
            None => equippable.with_damage(self.damage_min, self.damage_max),
        };

        let armor_type = self.armor_type.unwrap_or(equippable.armor_type);
        equippable = equippable.with_armor(armor_type, self.armor_class_bonus, self.dex_cap);

        equippable.damage_type = self.damage_type;
        equippable.material = self.material;
        equippable.ring_effect = self.ring_effect;
        equippable.two_handed = self.two_handed;
        equippable.crit_threshold = self.crit_threshold;
        equippable.applies_poison_on_hit = self.applies_poison_on_hit;
        equippable.resistances = self.resistances.clone();
        equippable
    }

    /// Build a fresh item entity
    pub fn build(&self) -> Item {
        let mut item = Item::new(self.name.clone()).with_equippable(self.equippable());
        if let Some(kind) = &self.kind {
            item = item.with_kind(kind.clone());
        }
        if let Some(hidden) = &self.unidentified_name {
            item = item.with_unidentified_name(hidden.clone());
        }
        item
    }
}

/// All item templates known to a game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
}

impl ItemCatalog {
    /// Load and validate a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let catalog: ItemCatalog = super::load_toml(path)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let catalog: ItemCatalog = super::parse_toml(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for template in &self.items {
            if !seen.insert(template.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate item template '{}'",
                    template.name
                )));
            }
            if !(2..=20).contains(&template.crit_threshold) {
                return Err(ConfigError::ValidationError(format!(
                    "item '{}': crit_threshold must be in 2..=20, got {}",
                    template.name, template.crit_threshold
                )));
            }
            if template.slot == EquipmentSlot::Ring && template.two_handed {
                return Err(ConfigError::ValidationError(format!(
                    "item '{}': rings cannot be two-handed",
                    template.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|t| t.name == name)
    }

    /// Spawn a named item into the store
    pub fn spawn(&self, name: &str, store: &mut ItemStore) -> Option<ItemId> {
        self.get(name).map(|template| store.spawn(template.build()))
    }
}
