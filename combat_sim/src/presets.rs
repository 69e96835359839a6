//! Preset duelists

use combat_core::prelude::*;
use tracing::warn;

/// Built-in item catalog
pub const DEFAULT_ITEMS: &str = include_str!("../data/items.toml");

/// What the hero walks in wearing
pub const HERO_LOADOUT: &[&str] = &[
    "Long Sword",
    "Wooden Shield",
    "Chain Shirt",
    "Leather Cap",
    "Ring of Teleportation",
];

pub const HERO_ID: EntityId = EntityId(0);
pub const OOZE_ID: EntityId = EntityId(1);

/// A fresh hero with the loadout spawned from `catalog` and equipped
pub fn hero<R: Roller>(catalog: &ItemCatalog, session: &mut Session<R>) -> Combatant {
    let fighter = Fighter::new(30, 1, 1)
        .with_abilities(14, 14, 12)
        .with_natural_damage(1, 2);
    let mut hero = Combatant::new(HERO_ID, "Hero", fighter)
        .with_equipment()
        .with_inventory(26);

    for &name in HERO_LOADOUT {
        match catalog.spawn(name, &mut session.items) {
            Some(item) => {
                hero.toggle_equip(item, session);
            }
            None => warn!(item = name, "loadout item missing from catalog"),
        }
    }
    hero
}

/// Strip everything the hero carries and drop it from the store
pub fn release_loadout(hero: &mut Combatant, items: &mut ItemStore) {
    let mut owned = hero
        .equipment
        .as_mut()
        .map(|equipment| equipment.clear())
        .unwrap_or_default();
    if let Some(inventory) = hero.inventory.as_mut() {
        owned.append(&mut inventory.items);
    }
    for id in owned {
        items.remove(id);
    }
}

/// Corrosive, engulfing ooze that shrugs off slashes
pub fn acid_ooze() -> Combatant {
    let fighter = Fighter::new(24, 0, 1)
        .with_abilities(12, 8, 14)
        .with_natural_damage(1, 6)
        .with_affinity(DamageType::Slashing, Affinity::Resistant)
        .with_resistance(DamageType::Acid, 100);
    Combatant::new(OOZE_ID, "Acid Ooze", fighter)
        .with_ability(SpecialAbility::Corrosion)
        .with_ability(SpecialAbility::Engulf)
}
