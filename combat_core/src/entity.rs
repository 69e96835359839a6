//! Combatant - An entity built from combat components

use crate::combat::{self, CombatEvent, Tone};
use crate::equipment::{Equipment, BASE_ARMOR_CLASS};
use crate::fighter::Fighter;
use crate::inventory::Inventory;
use crate::item::{Equippable, ItemStore, DEFAULT_CRIT_THRESHOLD};
use crate::rng::Roller;
use crate::session::Session;
use crate::status::{StatusEffects, TurnContext};
use crate::types::{DamageType, EntityId, ItemId, SpecialAbility};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A player, monster or NPC as far as combat is concerned
///
/// Optional components are plain `Option`s: presence is the capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub fighter: Fighter,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub inventory: Option<Inventory>,
    #[serde(default)]
    pub status_effects: StatusEffects,
    #[serde(default)]
    pub abilities: BTreeSet<SpecialAbility>,
}

impl Combatant {
    pub fn new(id: EntityId, name: impl Into<String>, fighter: Fighter) -> Self {
        Combatant {
            id,
            name: name.into(),
            fighter,
            equipment: None,
            inventory: None,
            status_effects: StatusEffects::new(),
            abilities: BTreeSet::new(),
        }
    }

    /// Give the entity an (empty) equipment table
    pub fn with_equipment(mut self) -> Self {
        self.equipment = Some(Equipment::new());
        self
    }

    pub fn with_inventory(mut self, capacity: usize) -> Self {
        self.inventory = Some(Inventory::new(capacity));
        self
    }

    pub fn with_ability(mut self, ability: SpecialAbility) -> Self {
        self.abilities.insert(ability);
        self
    }

    pub fn has_ability(&self, ability: SpecialAbility) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn has_equipment(&self) -> bool {
        self.equipment.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.fighter.is_alive()
    }

    // === Derived stats ===

    pub fn max_hp(&self, items: &ItemStore) -> i32 {
        self.fighter.base_max_hp + self.equipment.as_ref().map_or(0, |e| e.max_hp_bonus(items))
    }

    pub fn power(&self, items: &ItemStore) -> i32 {
        self.fighter.base_power + self.equipment.as_ref().map_or(0, |e| e.power_bonus(items))
    }

    pub fn defense(&self, items: &ItemStore) -> i32 {
        self.fighter.base_defense + self.equipment.as_ref().map_or(0, |e| e.defense_bonus(items))
    }

    pub fn armor_class(&self, items: &ItemStore) -> i32 {
        let dex = self.fighter.dexterity_modifier();
        match &self.equipment {
            Some(equipment) => equipment.armor_class(dex, items),
            None => BASE_ARMOR_CLASS + dex,
        }
    }

    /// Effective resistance: base plus equipment, clamped to `[0, 100]`
    pub fn resistance(&self, damage_type: DamageType, items: &ItemStore) -> i32 {
        let bonus = self
            .equipment
            .as_ref()
            .map_or(0, |e| e.resistance_bonus(damage_type, items));
        self.fighter.effective_resistance(damage_type, bonus)
    }

    /// Main-hand weapon, if any
    pub fn weapon<'a>(&self, items: &'a ItemStore) -> Option<(ItemId, &'a Equippable)> {
        self.equipment.as_ref().and_then(|e| e.main_hand_weapon(items))
    }

    pub fn to_hit_bonus(&self, items: &ItemStore) -> i32 {
        self.equipment.as_ref().map_or(0, |e| e.to_hit_bonus(items))
    }

    pub fn crit_threshold(&self, items: &ItemStore) -> i32 {
        self.equipment
            .as_ref()
            .map_or(DEFAULT_CRIT_THRESHOLD, |e| e.crit_threshold(items))
    }

    pub fn speed_bonus(&self, items: &ItemStore) -> f64 {
        self.equipment.as_ref().map_or(0.0, |e| e.speed_bonus(items))
    }

    // === State changes ===

    /// Apply damage, reduced by resistance when a damage type is given
    ///
    /// Emits `Dead` when this damage brings the entity to 0 HP.
    pub fn take_damage(
        &mut self,
        amount: i32,
        damage_type: Option<DamageType>,
        items: &ItemStore,
    ) -> Vec<CombatEvent> {
        let resistance = damage_type.map_or(0, |t| self.resistance(t, items));
        let outcome = self.fighter.apply_damage(amount, resistance);
        if outcome.killed {
            vec![CombatEvent::Dead { entity: self.id }]
        } else {
            Vec::new()
        }
    }

    /// Heal up to max HP (including equipment bonus). Returns HP restored.
    pub fn heal(&mut self, amount: i32, items: &ItemStore) -> i32 {
        let max_hp = self.max_hp(items);
        self.fighter.heal(amount, max_hp)
    }

    /// Equip or unequip an item
    ///
    /// Entities without an equipment table get an empty list.
    pub fn toggle_equip<R: Roller>(&mut self, item: ItemId, session: &mut Session<R>) -> Vec<CombatEvent> {
        let Some(equipment) = self.equipment.as_mut() else {
            return Vec::new();
        };
        let events = equipment.toggle_equip(
            item,
            &session.items,
            self.inventory.as_mut(),
            &mut session.identification,
        );

        // Losing a max HP item can leave hp above the new max
        let max_hp = self.max_hp(&session.items);
        if self.fighter.hp > max_hp {
            self.fighter.hp = max_hp;
        }
        events
    }

    /// Resolve a d20 attack against `defender`
    pub fn attack_d20<R: Roller>(&self, defender: &mut Combatant, session: &mut Session<R>) -> Vec<CombatEvent> {
        combat::attack_d20(self, defender, session, false)
    }

    /// Resolve a surprise d20 attack (always hits, always crits)
    pub fn surprise_attack<R: Roller>(&self, defender: &mut Combatant, session: &mut Session<R>) -> Vec<CombatEvent> {
        combat::attack_d20(self, defender, session, true)
    }

    /// Resolve a legacy power-vs-defense attack
    pub fn attack<R: Roller>(&self, defender: &mut Combatant, session: &mut Session<R>) -> Vec<CombatEvent> {
        combat::attack_legacy(self, defender, session)
    }

    // === Turn processing ===

    /// Start-of-turn status processing (engulf, entangle)
    pub fn process_turn_start(&mut self, ctx: TurnContext) -> Vec<CombatEvent> {
        let outcome = self.status_effects.tick_turn_start(ctx);
        let mut events = Vec::new();
        if outcome.skip_turn {
            events.push(CombatEvent::SkipTurn { entity: self.id });
            events.push(CombatEvent::message(
                format!("{} struggles inside its captor and loses the turn.", self.name),
                Tone::Warning,
            ));
        }
        for status in outcome.expired {
            events.push(CombatEvent::StatusExpired {
                entity: self.id,
                status,
            });
            events.push(CombatEvent::message(
                format!("{} is no longer {}.", self.name, status),
                Tone::Good,
            ));
        }
        events
    }

    /// End-of-turn status processing (poison)
    pub fn process_turn_end(&mut self, items: &ItemStore) -> Vec<CombatEvent> {
        let outcome = self.status_effects.tick_turn_end();
        let mut events = Vec::new();
        if outcome.poison_damage > 0 && self.is_alive() {
            let hp_before = self.fighter.hp;
            let death = self.take_damage(outcome.poison_damage, Some(DamageType::Poison), items);
            let dealt = hp_before - self.fighter.hp;
            if dealt > 0 {
                events.push(CombatEvent::message(
                    format!("{} takes {} poison damage.", self.name, dealt),
                    Tone::Bad,
                ));
            }
            events.extend(death);
        }
        for status in outcome.expired {
            events.push(CombatEvent::StatusExpired {
                entity: self.id,
                status,
            });
            events.push(CombatEvent::message(
                format!("{} is no longer {}.", self.name, status),
                Tone::Good,
            ));
        }
        events
    }
}
