//! Equipment - Per-entity slot table
//!
//! Slots hold [`ItemId`] handles; the numbers come from each item's
//! [`Equippable`](crate::item::Equippable) in the [`ItemStore`](crate::item::ItemStore).

mod stats;
mod toggle;

pub use stats::BASE_ARMOR_CLASS;

use crate::types::{ItemId, SlotId};
use serde::{Deserialize, Serialize};

/// Worn and wielded items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub main_hand: Option<ItemId>,
    pub off_hand: Option<ItemId>,
    pub head: Option<ItemId>,
    pub chest: Option<ItemId>,
    pub feet: Option<ItemId>,
    pub left_ring: Option<ItemId>,
    pub right_ring: Option<ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Item in a slot
    pub fn get(&self, slot: SlotId) -> Option<ItemId> {
        match slot {
            SlotId::MainHand => self.main_hand,
            SlotId::OffHand => self.off_hand,
            SlotId::Head => self.head,
            SlotId::Chest => self.chest,
            SlotId::Feet => self.feet,
            SlotId::LeftRing => self.left_ring,
            SlotId::RightRing => self.right_ring,
        }
    }

    fn slot_mut(&mut self, slot: SlotId) -> &mut Option<ItemId> {
        match slot {
            SlotId::MainHand => &mut self.main_hand,
            SlotId::OffHand => &mut self.off_hand,
            SlotId::Head => &mut self.head,
            SlotId::Chest => &mut self.chest,
            SlotId::Feet => &mut self.feet,
            SlotId::LeftRing => &mut self.left_ring,
            SlotId::RightRing => &mut self.right_ring,
        }
    }

    /// All occupied slots, in slot order
    pub fn equipped(&self) -> impl Iterator<Item = (SlotId, ItemId)> + '_ {
        SlotId::all()
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Slot currently holding an item
    pub fn slot_of(&self, item: ItemId) -> Option<SlotId> {
        self.equipped()
            .find(|&(_, equipped)| equipped == item)
            .map(|(slot, _)| slot)
    }

    pub fn is_equipped(&self, item: ItemId) -> bool {
        self.slot_of(item).is_some()
    }

    /// Empty every slot, returning what was worn
    pub fn clear(&mut self) -> Vec<ItemId> {
        let worn: Vec<ItemId> = self.equipped().map(|(_, item)| item).collect();
        *self = Equipment::default();
        worn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_access() {
        let mut equipment = Equipment::new();
        *equipment.slot_mut(SlotId::Head) = Some(ItemId(4));
        equipment.right_ring = Some(ItemId(7));

        assert_eq!(equipment.get(SlotId::Head), Some(ItemId(4)));
        assert_eq!(equipment.slot_of(ItemId(7)), Some(SlotId::RightRing));
        assert!(!equipment.is_equipped(ItemId(1)));
        assert_eq!(
            equipment.equipped().collect::<Vec<_>>(),
            vec![(SlotId::Head, ItemId(4)), (SlotId::RightRing, ItemId(7))]
        );
    }

    #[test]
    fn test_clear_returns_worn_items() {
        let mut equipment = Equipment::new();
        equipment.main_hand = Some(ItemId(1));
        equipment.feet = Some(ItemId(2));
        assert_eq!(equipment.clear(), vec![ItemId(1), ItemId(2)]);
        assert_eq!(equipment, Equipment::default());
    }
}
