//! Equippable - Per-item combat contract

use crate::dice::DiceExpr;
use crate::rng::Roller;
use crate::types::{ArmorType, DamageType, EquipmentSlot, Material};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default natural-20-only crit threshold
pub const DEFAULT_CRIT_THRESHOLD: i32 = 20;

/// Crit threshold for keen weapons
pub const KEEN_CRIT_THRESHOLD: i32 = 19;

/// Reactive effect carried by a ring, evaluated when the wearer is hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RingEffect {
    /// Chance to be teleported away when taking damage
    Teleportation { chance_percent: u32 },
}

/// Combat stats of an item that can be worn or wielded
///
/// Build with [`Equippable::new`] and the `with_*` methods; they keep the
/// damage/defense ranges normalized (non-negative, `max >= min`) and take the
/// base damage snapshot used as the corrosion reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: EquipmentSlot,

    // === Flat bonuses ===
    pub power_bonus: i32,
    pub defense_bonus: i32,
    pub max_hp_bonus: i32,
    pub armor_class_bonus: i32,
    pub to_hit_bonus: i32,

    // === Weapon ===
    pub damage_min: i32,
    pub damage_max: i32,
    /// Dice notation; when present it is rolled instead of the uniform range
    pub damage_dice: Option<DiceExpr>,
    /// Damage range when the item was made, the reference for corrosion floors
    pub base_damage_min: i32,
    pub base_damage_max: i32,
    pub damage_type: Option<DamageType>,
    pub two_handed: bool,
    pub reach: i32,
    /// Minimum natural d20 roll that crits
    pub crit_threshold: i32,
    pub applies_poison_on_hit: bool,

    // === Armor ===
    pub defense_min: i32,
    pub defense_max: i32,
    pub armor_type: ArmorType,
    /// Highest DEX modifier this piece lets through to AC (`None` = uncapped)
    pub dex_cap: Option<i32>,

    // === Misc ===
    pub resistances: BTreeMap<DamageType, i32>,
    pub speed_bonus: f64,
    pub material: Option<Material>,
    pub ring_effect: Option<RingEffect>,
}

impl Equippable {
    /// Create an item contract for the given slot with no bonuses
    pub fn new(slot: EquipmentSlot) -> Self {
        let armor_type = match slot {
            EquipmentSlot::MainHand => ArmorType::Weapon,
            EquipmentSlot::OffHand => ArmorType::Shield,
            _ => ArmorType::Light,
        };
        Equippable {
            slot,
            power_bonus: 0,
            defense_bonus: 0,
            max_hp_bonus: 0,
            armor_class_bonus: 0,
            to_hit_bonus: 0,
            damage_min: 0,
            damage_max: 0,
            damage_dice: None,
            base_damage_min: 0,
            base_damage_max: 0,
            damage_type: None,
            two_handed: false,
            reach: 1,
            crit_threshold: DEFAULT_CRIT_THRESHOLD,
            applies_poison_on_hit: false,
            defense_min: 0,
            defense_max: 0,
            armor_type,
            dex_cap: None,
            resistances: BTreeMap::new(),
            speed_bonus: 0.0,
            material: None,
            ring_effect: None,
        }
    }

    /// Set the damage range (negatives floored at 0, max raised to min)
    pub fn with_damage(mut self, min: i32, max: i32) -> Self {
        let (min, max) = normalize_range(min, max);
        self.damage_min = min;
        self.damage_max = max;
        self.base_damage_min = min;
        self.base_damage_max = max;
        self
    }

    /// Use dice notation for damage; the range becomes the dice's min/max
    pub fn with_dice(mut self, dice: DiceExpr) -> Self {
        self.damage_dice = Some(dice);
        self.with_damage(dice.min(), dice.max())
    }

    /// Set the rolled armor defense range (legacy combat)
    pub fn with_defense(mut self, min: i32, max: i32) -> Self {
        let (min, max) = normalize_range(min, max);
        self.defense_min = min;
        self.defense_max = max;
        self
    }

    pub fn with_power_bonus(mut self, bonus: i32) -> Self {
        self.power_bonus = bonus;
        self
    }

    pub fn with_defense_bonus(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn with_max_hp_bonus(mut self, bonus: i32) -> Self {
        self.max_hp_bonus = bonus;
        self
    }

    pub fn with_to_hit_bonus(mut self, bonus: i32) -> Self {
        self.to_hit_bonus = bonus;
        self
    }

    /// Set AC contribution, armor class and DEX cap together
    pub fn with_armor(mut self, armor_type: ArmorType, ac_bonus: i32, dex_cap: Option<i32>) -> Self {
        self.armor_type = armor_type;
        self.armor_class_bonus = ac_bonus;
        self.dex_cap = dex_cap;
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_resistance(mut self, damage_type: DamageType, percent: i32) -> Self {
        self.resistances.insert(damage_type, percent);
        self
    }

    pub fn with_speed_bonus(mut self, bonus: f64) -> Self {
        self.speed_bonus = bonus;
        self
    }

    pub fn with_reach(mut self, reach: i32) -> Self {
        self.reach = reach.max(1);
        self
    }

    pub fn with_ring_effect(mut self, effect: RingEffect) -> Self {
        self.ring_effect = Some(effect);
        self
    }

    pub fn two_handed(mut self) -> Self {
        self.two_handed = true;
        self
    }

    /// Keen weapons crit on 19-20
    pub fn keen(mut self) -> Self {
        self.crit_threshold = KEEN_CRIT_THRESHOLD;
        self
    }

    pub fn poisoned(mut self) -> Self {
        self.applies_poison_on_hit = true;
        self
    }

    /// Whether this is a weapon that deals damage
    pub fn is_weapon(&self) -> bool {
        self.armor_type == ArmorType::Weapon && (self.damage_max > 0 || self.damage_dice.is_some())
    }

    pub fn is_shield(&self) -> bool {
        self.armor_type == ArmorType::Shield
    }

    /// Resistance percentage granted against a damage type
    pub fn resistance(&self, damage_type: DamageType) -> i32 {
        self.resistances.get(&damage_type).copied().unwrap_or(0)
    }

    /// Roll weapon damage
    ///
    /// Dice are rolled and clamped into the current range, so corrosion and
    /// enhancement affect dice weapons too. Returns 0 for items without
    /// damage, without consuming a roll.
    pub fn roll_damage(&self, rng: &mut impl Roller) -> i32 {
        match self.damage_dice {
            Some(dice) => dice.roll(rng).max(self.damage_min).min(self.damage_max),
            None if self.damage_max > 0 => rng.randint(self.damage_min, self.damage_max),
            None => 0,
        }
    }

    /// Roll armor defense (legacy combat). Returns 0 without a roll for non-armor.
    pub fn roll_defense(&self, rng: &mut impl Roller) -> i32 {
        if self.defense_max > 0 {
            rng.randint(self.defense_min, self.defense_max)
        } else {
            0
        }
    }

    /// Lowest `damage_max` corrosion may reach: `max(1, round(ratio * base_damage_max))`
    pub fn corrosion_floor(&self, ratio: f64) -> i32 {
        ((self.base_damage_max as f64 * ratio).round() as i32).max(1)
    }

    /// Whether corrosion can still bite this item
    pub fn can_corrode(&self, ratio: f64) -> bool {
        self.material.is_some_and(Material::corrodes)
            && self.is_weapon()
            && self.damage_max > self.corrosion_floor(ratio)
    }

    /// Eat one point off `damage_max`, respecting the corrosion floor
    ///
    /// Returns the new `damage_max`, or `None` when the item is immune or
    /// already at its floor.
    pub fn corrode(&mut self, ratio: f64) -> Option<i32> {
        if !self.can_corrode(ratio) {
            return None;
        }
        self.damage_max -= 1;
        if self.damage_min > self.damage_max {
            self.damage_min = self.damage_max;
        }
        Some(self.damage_max)
    }

    /// Shift both ends of the damage range (enhancement/curse effects)
    pub fn shift_damage_range(&mut self, delta: i32) {
        let (min, max) = normalize_range(self.damage_min + delta, self.damage_max + delta);
        self.damage_min = min;
        self.damage_max = max;
    }

    /// Shift both ends of the defense range
    pub fn shift_defense_range(&mut self, delta: i32) {
        let (min, max) = normalize_range(self.defense_min + delta, self.defense_max + delta);
        self.defense_min = min;
        self.defense_max = max;
    }
}

fn normalize_range(min: i32, max: i32) -> (i32, i32) {
    let min = min.max(0);
    let max = max.max(0).max(min);
    (min, max)
}
