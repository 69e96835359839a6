//! Core types shared by items, fighters and combat resolution

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a combat entity (player, monster, NPC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Handle to an item owned by an [`ItemStore`](crate::item::ItemStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Damage types for weapons, resistances and typed damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Cold,
    Lightning,
    Acid,
    Poison,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Slashing,
            DamageType::Piercing,
            DamageType::Bludgeoning,
            DamageType::Fire,
            DamageType::Cold,
            DamageType::Lightning,
            DamageType::Acid,
            DamageType::Poison,
        ]
    }

    /// Weapon damage types (the ones vulnerability/resistance affinities apply to)
    pub fn is_physical(self) -> bool {
        matches!(
            self,
            DamageType::Slashing | DamageType::Piercing | DamageType::Bludgeoning
        )
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DamageType::Slashing => "slashing",
            DamageType::Piercing => "piercing",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Lightning => "lightning",
            DamageType::Acid => "acid",
            DamageType::Poison => "poison",
        };
        f.write_str(name)
    }
}

/// Slot class an item is made for
///
/// Rings are generic: the equipment table decides between the left and
/// right ring position when the ring is put on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Head,
    Chest,
    Feet,
    Ring,
}

/// Concrete position in an equipment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    MainHand,
    OffHand,
    Head,
    Chest,
    Feet,
    LeftRing,
    RightRing,
}

impl SlotId {
    /// Get all equipment positions
    pub fn all() -> &'static [SlotId] {
        &[
            SlotId::MainHand,
            SlotId::OffHand,
            SlotId::Head,
            SlotId::Chest,
            SlotId::Feet,
            SlotId::LeftRing,
            SlotId::RightRing,
        ]
    }

    /// Direct mapping for non-ring slots
    pub fn for_slot(slot: EquipmentSlot) -> Option<SlotId> {
        match slot {
            EquipmentSlot::MainHand => Some(SlotId::MainHand),
            EquipmentSlot::OffHand => Some(SlotId::OffHand),
            EquipmentSlot::Head => Some(SlotId::Head),
            EquipmentSlot::Chest => Some(SlotId::Chest),
            EquipmentSlot::Feet => Some(SlotId::Feet),
            EquipmentSlot::Ring => None,
        }
    }
}

/// Armor weight class (weapons are tagged `Weapon`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    Light,
    Medium,
    Heavy,
    Shield,
    #[default]
    Weapon,
}

/// What an item is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Metal,
    Wood,
    Leather,
    Cloth,
    Bone,
    Stone,
}

impl Material {
    /// Only metal can be eaten by corrosive attacks
    pub fn corrodes(self) -> bool {
        matches!(self, Material::Metal)
    }
}

/// Special attack capabilities a monster may have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbility {
    /// Hits may corrode the defender's metal weapon
    Corrosion,
    /// Hits engulf the defender, slowing them while adjacent
    Engulf,
    /// Hits entangle the defender, pinning them in place
    Entangle,
}

/// How a defender reacts to a physical damage type on the d20 path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    Vulnerable,
    Resistant,
}

impl Affinity {
    /// Flat damage modifier applied before the crit multiplier
    pub fn damage_modifier(self) -> i32 {
        match self {
            Affinity::Vulnerable => 1,
            Affinity::Resistant => -1,
        }
    }
}

/// D&D style ability modifier: `floor((score - 10) / 2)`
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_floors() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(18), 4);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(3), -4);
    }

    #[test]
    fn test_slot_mapping() {
        assert_eq!(SlotId::for_slot(EquipmentSlot::MainHand), Some(SlotId::MainHand));
        assert_eq!(SlotId::for_slot(EquipmentSlot::Feet), Some(SlotId::Feet));
        assert_eq!(SlotId::for_slot(EquipmentSlot::Ring), None);
        assert_eq!(SlotId::all().len(), 7);
    }

    #[test]
    fn test_only_metal_corrodes() {
        assert!(Material::Metal.corrodes());
        assert!(!Material::Wood.corrodes());
        assert!(!Material::Bone.corrodes());
    }

    #[test]
    fn test_physical_types() {
        assert!(DamageType::Slashing.is_physical());
        assert!(DamageType::Bludgeoning.is_physical());
        assert!(!DamageType::Fire.is_physical());
    }
}
