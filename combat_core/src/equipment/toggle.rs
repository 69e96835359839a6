//! Equip/unequip transitions

use super::Equipment;
use crate::combat::{CombatEvent, Tone};
use crate::inventory::Inventory;
use crate::item::{IdentificationRegistry, ItemStore};
use crate::types::{EquipmentSlot, ItemId, SlotId};
use tracing::{debug, warn};

impl Equipment {
    /// Equip an item, or unequip it if it is already worn in its slot
    ///
    /// Returns the outcome records in order: evictions (`Dequipped`) come
    /// before the `Equipped` record. Items unknown to the store or without an
    /// equippable component produce an empty list.
    pub fn toggle_equip(
        &mut self,
        item: ItemId,
        items: &ItemStore,
        mut inventory: Option<&mut Inventory>,
        registry: &mut IdentificationRegistry,
    ) -> Vec<CombatEvent> {
        let Some(equippable) = items.equippable(item) else {
            debug!(%item, "toggle_equip on an item that cannot be equipped");
            return Vec::new();
        };
        let Some(target) = self.resolve_slot(item, equippable.slot) else {
            return Vec::new();
        };

        let speed_before = self.speed_bonus(items);
        let mut events = Vec::new();

        if self.get(target) == Some(item) {
            *self.slot_mut(target) = None;
            self.dequipped(item, items, inventory.as_deref_mut(), registry, &mut events);
        } else {
            if target == SlotId::MainHand && equippable.two_handed {
                if let Some(shield) = self.off_hand.take() {
                    self.dequipped(shield, items, inventory.as_deref_mut(), registry, &mut events);
                }
            }
            if target == SlotId::OffHand {
                let two_handed_main = self
                    .main_hand
                    .filter(|&main| items.equippable(main).is_some_and(|e| e.two_handed));
                if let Some(main) = two_handed_main {
                    self.main_hand = None;
                    self.dequipped(main, items, inventory.as_deref_mut(), registry, &mut events);
                }
            }
            if let Some(old) = self.slot_mut(target).take() {
                self.dequipped(old, items, inventory.as_deref_mut(), registry, &mut events);
            }

            *self.slot_mut(target) = Some(item);
            events.push(CombatEvent::Equipped { item });
            events.push(CombatEvent::message(
                format!("You equipped the {}.", items.display_name(item, registry)),
                Tone::Neutral,
            ));

            if let Some(inventory) = inventory.as_deref_mut() {
                inventory.remove(item);
            }

            identify_on_equip(item, items, registry, &mut events);
        }

        let speed_after = self.speed_bonus(items);
        if speed_after > speed_before {
            events.push(CombatEvent::message("You feel quicker.", Tone::Good));
        } else if speed_after < speed_before {
            events.push(CombatEvent::message("You feel sluggish.", Tone::Bad));
        }

        events
    }

    /// Pick the position an item goes to (or comes off from)
    ///
    /// Rings: a worn ring toggles off from where it is; otherwise left is
    /// preferred, then right, and with both full the left ring is replaced.
    fn resolve_slot(&self, item: ItemId, slot: EquipmentSlot) -> Option<SlotId> {
        if slot == EquipmentSlot::Ring {
            let target = if self.left_ring == Some(item) {
                SlotId::LeftRing
            } else if self.right_ring == Some(item) {
                SlotId::RightRing
            } else if self.left_ring.is_none() {
                SlotId::LeftRing
            } else if self.right_ring.is_none() {
                SlotId::RightRing
            } else {
                SlotId::LeftRing
            };
            return Some(target);
        }
        SlotId::for_slot(slot)
    }

    /// Record an item coming off and try to put it back in the pack
    fn dequipped(
        &self,
        item: ItemId,
        items: &ItemStore,
        inventory: Option<&mut Inventory>,
        registry: &IdentificationRegistry,
        events: &mut Vec<CombatEvent>,
    ) {
        let name = items.display_name(item, registry);
        events.push(CombatEvent::Dequipped { item });
        events.push(CombatEvent::message(
            format!("You dequipped the {}.", name),
            Tone::Neutral,
        ));

        if let Some(inventory) = inventory {
            if !inventory.add_item(item) {
                warn!(%item, "inventory full, dequipped item is no longer tracked by the inventory");
                events.push(CombatEvent::message(
                    format!("You have no room to carry the {}.", name),
                    Tone::Warning,
                ));
            }
        }
    }
}

/// Equipping reveals an unidentified item's true name
fn identify_on_equip(
    item: ItemId,
    items: &ItemStore,
    registry: &mut IdentificationRegistry,
    events: &mut Vec<CombatEvent>,
) {
    let Some(entry) = items.get(item) else {
        return;
    };
    let Some(hidden) = entry.unidentified_name.as_deref() else {
        return;
    };
    if registry.identify(&entry.kind) {
        events.push(CombatEvent::Identified { item });
        events.push(CombatEvent::message(
            format!("The {} is a {}!", hidden, entry.name),
            Tone::Good,
        ));
    }
}
