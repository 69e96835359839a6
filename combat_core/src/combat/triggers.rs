//! Post-hit side effects of a d20 attack
//!
//! Each trigger is gated on its own and appends its own records. They run
//! in a fixed order: poison, corrosion, engulf, entangle, ring effects.

use super::event::{CombatEvent, Tone};
use crate::entity::Combatant;
use crate::item::RingEffect;
use crate::rng::Roller;
use crate::session::Session;
use crate::status::StatusEffect;
use crate::types::SpecialAbility;
use tracing::debug;

pub(super) fn after_hit<R: Roller>(
    attacker: &Combatant,
    defender: &mut Combatant,
    weapon_poisons: bool,
    session: &mut Session<R>,
    events: &mut Vec<CombatEvent>,
) {
    let status = session.rules.status.clone();

    if weapon_poisons {
        let effect = StatusEffect::poisoned(status.poison_duration, status.poison_damage);
        apply_status(defender, effect, "is poisoned!", events);
    }

    if attacker.has_ability(SpecialAbility::Corrosion) {
        corrode(defender, session, events);
    }

    if attacker.has_ability(SpecialAbility::Engulf) {
        let effect = StatusEffect::engulfed(status.engulf_duration);
        apply_status(defender, effect, "is engulfed!", events);
    }

    if attacker.has_ability(SpecialAbility::Entangle) {
        let effect = StatusEffect::entangled(status.entangle_duration);
        apply_status(defender, effect, "is entangled!", events);
    }

    ring_effects(defender, session, events);
}

/// Apply or refresh a status effect; never stacks
fn apply_status(defender: &mut Combatant, effect: StatusEffect, verb: &str, events: &mut Vec<CombatEvent>) {
    let kind = effect.kind;
    let fresh = defender.status_effects.add_effect(effect);
    events.push(CombatEvent::StatusApplied {
        entity: defender.id,
        status: kind,
    });
    let text = if fresh {
        format!("{} {}", defender.name, verb)
    } else {
        format!("{} is still {}.", defender.name, kind)
    };
    events.push(CombatEvent::message(text, Tone::Bad));
}

/// Roll the corrosion chance, then eat into the defender's first metal weapon
fn corrode<R: Roller>(defender: &Combatant, session: &mut Session<R>, events: &mut Vec<CombatEvent>) {
    let rules = &session.rules.corrosion;
    if !session.rng.percent_chance(rules.chance_percent) {
        return;
    }
    let Some(equipment) = defender.equipment.as_ref() else {
        return;
    };
    let Some(item) = equipment.corrodible_weapon(&session.items, rules.floor_ratio) else {
        return;
    };
    let ratio = rules.floor_ratio;
    let Some(damage_max) = session
        .items
        .equippable_mut(item)
        .and_then(|weapon| weapon.corrode(ratio))
    else {
        return;
    };

    debug!(%item, damage_max, "weapon corroded");
    events.push(CombatEvent::Corroded { item, damage_max });
    let name = session.items.display_name(item, &session.identification);
    events.push(CombatEvent::message(
        format!("{}'s {} corrodes!", defender.name, name),
        Tone::Warning,
    ));
}

/// Reactive ring effects of the defender; at most one teleport per hit
fn ring_effects<R: Roller>(defender: &Combatant, session: &mut Session<R>, events: &mut Vec<CombatEvent>) {
    let Some(equipment) = defender.equipment.as_ref() else {
        return;
    };
    for (item, effect) in equipment.ring_effects(&session.items) {
        match effect {
            RingEffect::Teleportation { chance_percent } => {
                if session.rng.percent_chance(chance_percent) {
                    debug!(%item, entity = %defender.id, "ring teleport");
                    events.push(CombatEvent::Teleport { entity: defender.id });
                    events.push(CombatEvent::message(
                        format!("A ring flares and {} vanishes!", defender.name),
                        Tone::Warning,
                    ));
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::combat::{CombatEvent, CombatEvents};
    use crate::config::CombatRules;
    use crate::entity::Combatant;
    use crate::fighter::Fighter;
    use crate::item::{Equippable, Item, RingEffect};
    use crate::rng::ScriptedRolls;
    use crate::session::Session;
    use crate::status::StatusKind;
    use crate::types::{EntityId, EquipmentSlot, ItemId, Material, SpecialAbility};

    fn always_corrode() -> CombatRules {
        let mut rules = CombatRules::default();
        rules.corrosion.chance_percent = 100;
        rules
    }

    fn monster(ability: SpecialAbility) -> Combatant {
        Combatant::new(EntityId(1), "Ooze", Fighter::new(20, 0, 0).with_natural_damage(1, 1))
            .with_ability(ability)
    }

    fn hero_with(session: &mut Session<ScriptedRolls>, item: Equippable) -> (Combatant, ItemId) {
        let mut hero = Combatant::new(EntityId(0), "Hero", Fighter::new(50, 0, 0))
            .with_equipment()
            .with_inventory(10);
        let id = session.items.spawn(Item::new("Sword").with_equippable(item));
        hero.toggle_equip(id, session);
        (hero, id)
    }

    fn metal_sword() -> Equippable {
        Equippable::new(EquipmentSlot::MainHand)
            .with_damage(2, 8)
            .with_material(Material::Metal)
    }

    #[test]
    fn test_poison_refreshes_without_stacking() {
        let mut session = Session::with_rng(ScriptedRolls::new([15, 2, 15, 2]));
        let mut attacker = Combatant::new(EntityId(0), "Assassin", Fighter::new(20, 0, 0)).with_equipment();
        let dagger = session.items.spawn(
            Item::new("Dagger").with_equippable(Equippable::new(EquipmentSlot::MainHand).with_damage(1, 4).poisoned()),
        );
        attacker.toggle_equip(dagger, &mut session);
        let mut target = Combatant::new(EntityId(1), "Guard", Fighter::new(50, 0, 0));

        attacker.attack_d20(&mut target, &mut session);
        target.status_effects.get_effect_mut(StatusKind::Poisoned).unwrap().duration = 1;
        let events = attacker.attack_d20(&mut target, &mut session);

        assert_eq!(target.status_effects.len(), 1);
        let poison = target.status_effects.get_effect(StatusKind::Poisoned).unwrap();
        assert_eq!(poison.duration, 5);
        assert!(events.contains(&CombatEvent::StatusApplied {
            entity: EntityId(1),
            status: StatusKind::Poisoned,
        }));
    }

    #[test]
    fn test_corrosion_floor() {
        let mut session = Session::with_rng(ScriptedRolls::new([0; 0])).with_rules(always_corrode());
        let (mut hero, sword) = hero_with(&mut session, metal_sword());
        let ooze = monster(SpecialAbility::Corrosion);

        let mut corroded = 0;
        for _ in 0..20 {
            session.rng.push([15, 1]);
            let events = ooze.attack_d20(&mut hero, &mut session);
            corroded += events
                .iter()
                .filter(|e| matches!(e, CombatEvent::Corroded { .. }))
                .count();
        }

        assert_eq!(corroded, 4);
        let weapon = session.items.equippable(sword).unwrap();
        assert_eq!(weapon.damage_max, 4);
        assert_eq!(weapon.base_damage_max, 8);
    }

    #[test]
    fn test_non_metal_never_corrodes() {
        let mut session = Session::with_rng(ScriptedRolls::new([0; 0])).with_rules(always_corrode());
        let club = Equippable::new(EquipmentSlot::MainHand)
            .with_damage(2, 8)
            .with_material(Material::Wood);
        let (mut hero, club) = hero_with(&mut session, club);
        let ooze = monster(SpecialAbility::Corrosion);

        for _ in 0..10 {
            session.rng.push([15, 1]);
            let events = ooze.attack_d20(&mut hero, &mut session);
            assert!(!events.iter().any(|e| matches!(e, CombatEvent::Corroded { .. })));
        }
        assert_eq!(session.items.equippable(club).unwrap().damage_max, 8);
    }

    #[test]
    fn test_corrosion_chance_can_fail() {
        let mut session = Session::with_rng(ScriptedRolls::new([15, 1, 6]));
        let (mut hero, sword) = hero_with(&mut session, metal_sword());
        let ooze = monster(SpecialAbility::Corrosion);

        ooze.attack_d20(&mut hero, &mut session);
        assert_eq!(session.items.equippable(sword).unwrap().damage_max, 8);
        assert_eq!(session.rng.remaining(), 0);
    }

    #[test]
    fn test_engulf_applies_and_refreshes() {
        let mut session = Session::with_rng(ScriptedRolls::new([15, 1, 15, 1]));
        let blob = monster(SpecialAbility::Engulf);
        let mut target = Combatant::new(EntityId(2), "Hero", Fighter::new(50, 0, 0));

        let first = blob.attack_d20(&mut target, &mut session);
        assert!(first.messages().iter().any(|m| m.contains("engulfed")));
        let second = blob.attack_d20(&mut target, &mut session);
        assert!(second.messages().iter().any(|m| m.contains("still engulfed")));
        assert_eq!(target.status_effects.len(), 1);
    }

    #[test]
    fn test_entangle_immobilizes() {
        let mut session = Session::with_rng(ScriptedRolls::new([15, 1]));
        let vine = monster(SpecialAbility::Entangle);
        let mut target = Combatant::new(EntityId(2), "Hero", Fighter::new(50, 0, 0));

        vine.attack_d20(&mut target, &mut session);
        assert!(target.status_effects.is_immobilized());
    }

    #[test]
    fn test_ring_teleport_on_hit() {
        let mut session = Session::with_rng(ScriptedRolls::new([15, 1, 10]));
        let ring = Equippable::new(EquipmentSlot::Ring)
            .with_ring_effect(RingEffect::Teleportation { chance_percent: 10 });
        let (mut hero, _) = hero_with(&mut session, ring);
        let rat = Combatant::new(EntityId(1), "Rat", Fighter::new(5, 0, 0).with_natural_damage(1, 1));

        let events = rat.attack_d20(&mut hero, &mut session);
        assert!(events.contains(&CombatEvent::Teleport { entity: EntityId(0) }));
    }

    #[test]
    fn test_ring_teleport_chance_fails() {
        let mut session = Session::with_rng(ScriptedRolls::new([15, 1, 11]));
        let ring = Equippable::new(EquipmentSlot::Ring)
            .with_ring_effect(RingEffect::Teleportation { chance_percent: 10 });
        let (mut hero, _) = hero_with(&mut session, ring);
        let rat = Combatant::new(EntityId(1), "Rat", Fighter::new(5, 0, 0).with_natural_damage(1, 1));

        let events = rat.attack_d20(&mut hero, &mut session);
        assert!(!events.iter().any(|e| matches!(e, CombatEvent::Teleport { .. })));
    }
}
