//! Fighter - Combat stats of one entity
//!
//! The fighter holds base numbers only. Anything that depends on worn items
//! (max HP, power, AC, resistances) is computed by
//! [`Combatant`](crate::Combatant), which owns both the fighter and the
//! equipment table.

use crate::rng::Roller;
use crate::types::{ability_modifier, Affinity, DamageType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest effective resistance (immunity)
pub const MAX_RESISTANCE: i32 = 100;

/// Result of applying damage to a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    /// HP actually removed
    pub dealt: i32,
    /// This damage took the fighter from alive to 0 HP
    pub killed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub hp: i32,
    pub base_max_hp: i32,
    pub base_power: i32,
    pub base_defense: i32,

    // === Ability scores ===
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,

    // === Natural attack (used unarmed or when the weapon rolls 0) ===
    pub damage_min: i32,
    pub damage_max: i32,

    /// Percentage resistances before equipment
    #[serde(default)]
    pub resistances: BTreeMap<DamageType, i32>,
    /// Flat d20 modifiers per physical damage type
    #[serde(default)]
    pub affinities: BTreeMap<DamageType, Affinity>,
}

impl Fighter {
    /// Create a fighter at full HP with average (10) ability scores
    pub fn new(max_hp: i32, defense: i32, power: i32) -> Self {
        let max_hp = max_hp.max(1);
        Fighter {
            hp: max_hp,
            base_max_hp: max_hp,
            base_power: power,
            base_defense: defense,
            strength: 10,
            dexterity: 10,
            constitution: 10,
            damage_min: 0,
            damage_max: 0,
            resistances: BTreeMap::new(),
            affinities: BTreeMap::new(),
        }
    }

    pub fn with_abilities(mut self, strength: i32, dexterity: i32, constitution: i32) -> Self {
        self.strength = strength;
        self.dexterity = dexterity;
        self.constitution = constitution;
        self
    }

    /// Natural attack range (claws, fists); negatives floor at 0
    pub fn with_natural_damage(mut self, min: i32, max: i32) -> Self {
        self.damage_min = min.max(0);
        self.damage_max = max.max(self.damage_min);
        self
    }

    pub fn with_resistance(mut self, damage_type: DamageType, percent: i32) -> Self {
        self.resistances.insert(damage_type, percent);
        self
    }

    pub fn with_affinity(mut self, damage_type: DamageType, affinity: Affinity) -> Self {
        self.affinities.insert(damage_type, affinity);
        self
    }

    pub fn strength_modifier(&self) -> i32 {
        ability_modifier(self.strength)
    }

    pub fn dexterity_modifier(&self) -> i32 {
        ability_modifier(self.dexterity)
    }

    pub fn constitution_modifier(&self) -> i32 {
        ability_modifier(self.constitution)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn base_resistance(&self, damage_type: DamageType) -> i32 {
        self.resistances.get(&damage_type).copied().unwrap_or(0)
    }

    /// Resistance after adding an equipment bonus, clamped to `[0, 100]`
    pub fn effective_resistance(&self, damage_type: DamageType, equipment_bonus: i32) -> i32 {
        (self.base_resistance(damage_type) + equipment_bonus).clamp(0, MAX_RESISTANCE)
    }

    /// d20 damage modifier against a weapon damage type (+1 vulnerable, -1 resistant)
    pub fn affinity_modifier(&self, damage_type: Option<DamageType>) -> i32 {
        damage_type
            .and_then(|t| self.affinities.get(&t))
            .map(|a| a.damage_modifier())
            .unwrap_or(0)
    }

    /// Roll the natural attack. Returns 0 without a roll if there is none.
    pub fn roll_natural_damage(&self, rng: &mut impl Roller) -> i32 {
        if self.damage_max > 0 {
            rng.randint(self.damage_min, self.damage_max)
        } else {
            0
        }
    }

    /// Remove HP after resistance
    ///
    /// `resistance` is a percentage; the damage kept is
    /// `amount * (100 - resistance) / 100`. HP never drops below 0.
    pub fn apply_damage(&mut self, amount: i32, resistance: i32) -> DamageOutcome {
        let amount = amount.max(0);
        let resistance = resistance.clamp(0, MAX_RESISTANCE);
        let reduced = i64::from(amount) * i64::from(MAX_RESISTANCE - resistance)
            / i64::from(MAX_RESISTANCE);
        let reduced = i32::try_from(reduced).unwrap_or(i32::MAX);

        let was_alive = self.is_alive();
        let dealt = reduced.min(self.hp.max(0));
        self.hp = self.hp.saturating_sub(reduced).max(0);

        DamageOutcome {
            dealt,
            killed: was_alive && self.hp == 0,
        }
    }

    /// Restore HP up to `max_hp`. Returns the amount healed.
    pub fn heal(&mut self, amount: i32, max_hp: i32) -> i32 {
        if self.hp >= max_hp {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(max_hp);
        self.hp - before
    }
}
