//! Stat aggregation across equipped items

use super::Equipment;
use crate::item::{Equippable, ItemStore, RingEffect, DEFAULT_CRIT_THRESHOLD};
use crate::types::{DamageType, ItemId, SlotId};

/// Armor class with no DEX and no armor
pub const BASE_ARMOR_CLASS: i32 = 10;

impl Equipment {
    /// Equippable components of every worn item (missing components skipped)
    pub fn equippables<'a>(&'a self, items: &'a ItemStore) -> impl Iterator<Item = &'a Equippable> + 'a {
        self.equipped().filter_map(move |(_, id)| items.equippable(id))
    }

    pub fn max_hp_bonus(&self, items: &ItemStore) -> i32 {
        self.equippables(items).map(|e| e.max_hp_bonus).sum()
    }

    pub fn power_bonus(&self, items: &ItemStore) -> i32 {
        self.equippables(items).map(|e| e.power_bonus).sum()
    }

    pub fn defense_bonus(&self, items: &ItemStore) -> i32 {
        self.equippables(items).map(|e| e.defense_bonus).sum()
    }

    pub fn armor_class_bonus(&self, items: &ItemStore) -> i32 {
        self.equippables(items).map(|e| e.armor_class_bonus).sum()
    }

    /// Summed resistance percentage (uncapped; the fighter caps it)
    pub fn resistance_bonus(&self, damage_type: DamageType, items: &ItemStore) -> i32 {
        self.equippables(items).map(|e| e.resistance(damage_type)).sum()
    }

    pub fn speed_bonus(&self, items: &ItemStore) -> f64 {
        self.equippables(items).map(|e| e.speed_bonus).sum()
    }

    /// Main-hand item and its component
    pub fn main_hand_weapon<'a>(&self, items: &'a ItemStore) -> Option<(ItemId, &'a Equippable)> {
        let id = self.main_hand?;
        items.equippable(id).map(|e| (id, e))
    }

    /// To-hit bonus of the wielded weapon
    pub fn to_hit_bonus(&self, items: &ItemStore) -> i32 {
        self.main_hand_weapon(items)
            .map(|(_, weapon)| weapon.to_hit_bonus)
            .unwrap_or(0)
    }

    /// Crit threshold of the wielded weapon (20 unarmed)
    pub fn crit_threshold(&self, items: &ItemStore) -> i32 {
        self.main_hand_weapon(items)
            .map(|(_, weapon)| weapon.crit_threshold)
            .unwrap_or(DEFAULT_CRIT_THRESHOLD)
    }

    /// Most restrictive DEX cap among worn non-shield pieces
    pub fn dex_cap(&self, items: &ItemStore) -> Option<i32> {
        self.equippables(items)
            .filter(|e| !e.is_shield())
            .filter_map(|e| e.dex_cap)
            .min()
    }

    /// `10 + min(dex_mod, cap) + sum of AC bonuses`
    ///
    /// The cap is a ceiling only: a negative DEX modifier is never raised.
    pub fn armor_class(&self, dex_modifier: i32, items: &ItemStore) -> i32 {
        let effective_dex = match self.dex_cap(items) {
            Some(cap) => dex_modifier.min(cap),
            None => dex_modifier,
        };
        BASE_ARMOR_CLASS + effective_dex + self.armor_class_bonus(items)
    }

    /// Reactive effects of the worn rings, left first
    pub fn ring_effects(&self, items: &ItemStore) -> Vec<(ItemId, RingEffect)> {
        [SlotId::LeftRing, SlotId::RightRing]
            .iter()
            .filter_map(|&slot| self.get(slot))
            .filter_map(|id| {
                items
                    .equippable(id)
                    .and_then(|e| e.ring_effect)
                    .map(|effect| (id, effect))
            })
            .collect()
    }

    /// Worn weapons corrosion may target, main hand first
    pub fn corrodible_weapon(&self, items: &ItemStore, floor_ratio: f64) -> Option<ItemId> {
        [SlotId::MainHand, SlotId::OffHand]
            .iter()
            .filter_map(|&slot| self.get(slot))
            .find(|&id| {
                items
                    .equippable(id)
                    .is_some_and(|e| e.can_corrode(floor_ratio))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::types::{ArmorType, EquipmentSlot, Material};

    fn wear(store: &mut ItemStore, equippable: Equippable) -> ItemId {
        store.spawn(Item::new("piece").with_equippable(equippable))
    }

    #[test]
    fn test_sums_across_slots() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        equipment.main_hand = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::MainHand).with_power_bonus(3),
        ));
        equipment.chest = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Chest)
                .with_defense_bonus(2)
                .with_max_hp_bonus(10),
        ));
        equipment.left_ring = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Ring)
                .with_power_bonus(1)
                .with_max_hp_bonus(5),
        ));
        // A handle with no equippable contributes nothing
        equipment.feet = Some(store.spawn(Item::new("Sock")));

        assert_eq!(equipment.power_bonus(&store), 4);
        assert_eq!(equipment.defense_bonus(&store), 2);
        assert_eq!(equipment.max_hp_bonus(&store), 15);
    }

    #[test]
    fn test_empty_equipment_is_zero() {
        let store = ItemStore::new();
        let equipment = Equipment::new();
        assert_eq!(equipment.power_bonus(&store), 0);
        assert_eq!(equipment.resistance_bonus(DamageType::Fire, &store), 0);
        assert_eq!(equipment.to_hit_bonus(&store), 0);
        assert_eq!(equipment.crit_threshold(&store), 20);
        assert_eq!(equipment.armor_class(2, &store), 12);
    }

    #[test]
    fn test_resistance_bonus_sums() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        equipment.head = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Head).with_resistance(DamageType::Fire, 25),
        ));
        equipment.right_ring = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Ring).with_resistance(DamageType::Fire, 35),
        ));
        assert_eq!(equipment.resistance_bonus(DamageType::Fire, &store), 60);
        assert_eq!(equipment.resistance_bonus(DamageType::Cold, &store), 0);
    }

    #[test]
    fn test_most_restrictive_dex_cap() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        equipment.head = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Head).with_armor(ArmorType::Light, 1, None),
        ));
        equipment.chest = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Chest).with_armor(ArmorType::Medium, 4, Some(2)),
        ));

        assert_eq!(equipment.dex_cap(&store), Some(2));
        // 10 + min(4, 2) + 1 + 4
        assert_eq!(equipment.armor_class(4, &store), 17);
    }

    #[test]
    fn test_shield_never_caps() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        equipment.off_hand = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::OffHand).with_armor(ArmorType::Shield, 2, Some(0)),
        ));
        assert_eq!(equipment.dex_cap(&store), None);
        assert_eq!(equipment.armor_class(3, &store), 15);
    }

    #[test]
    fn test_cap_never_raises_negative_dex() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        equipment.chest = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::Chest).with_armor(ArmorType::Heavy, 6, Some(0)),
        ));
        assert_eq!(equipment.armor_class(-1, &store), 15);
    }

    #[test]
    fn test_weapon_lookups() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        let rapier = wear(
            &mut store,
            Equippable::new(EquipmentSlot::MainHand)
                .with_damage(1, 6)
                .with_to_hit_bonus(2)
                .keen(),
        );
        equipment.main_hand = Some(rapier);
        assert_eq!(equipment.to_hit_bonus(&store), 2);
        assert_eq!(equipment.crit_threshold(&store), 19);
        assert_eq!(equipment.main_hand_weapon(&store).map(|(id, _)| id), Some(rapier));
    }

    #[test]
    fn test_corrodible_weapon_selection() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        equipment.main_hand = Some(wear(
            &mut store,
            Equippable::new(EquipmentSlot::MainHand)
                .with_damage(1, 6)
                .with_material(Material::Wood),
        ));
        assert_eq!(equipment.corrodible_weapon(&store, 0.5), None);

        let dagger = wear(
            &mut store,
            Equippable::new(EquipmentSlot::OffHand)
                .with_armor(ArmorType::Weapon, 0, None)
                .with_damage(1, 4)
                .with_material(Material::Metal),
        );
        equipment.off_hand = Some(dagger);
        assert_eq!(equipment.corrodible_weapon(&store, 0.5), Some(dagger));
    }

    #[test]
    fn test_ring_effects_left_first() {
        let mut store = ItemStore::new();
        let mut equipment = Equipment::new();
        let right = wear(
            &mut store,
            Equippable::new(EquipmentSlot::Ring)
                .with_ring_effect(RingEffect::Teleportation { chance_percent: 10 }),
        );
        let left = wear(
            &mut store,
            Equippable::new(EquipmentSlot::Ring)
                .with_ring_effect(RingEffect::Teleportation { chance_percent: 20 }),
        );
        equipment.right_ring = Some(right);
        equipment.left_ring = Some(left);
        let effects = equipment.ring_effects(&store);
        assert_eq!(effects[0].0, left);
        assert_eq!(effects[1].0, right);
    }
}
