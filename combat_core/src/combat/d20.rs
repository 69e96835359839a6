//! d20 attack resolution

use super::event::{CombatEvent, Tone};
use super::triggers;
use crate::entity::Combatant;
use crate::rng::Roller;
use crate::session::Session;
use tracing::debug;

/// A natural 1 always misses
const FUMBLE_ROLL: i32 = 1;

/// Chance to hit as a percentage of d20 faces
///
/// The fumble face never hits; faces at or above the crit threshold always
/// hit. Surprise attacks always hit.
pub fn hit_percentage(attack_bonus: i32, armor_class: i32, crit_threshold: i32, is_surprise: bool) -> i32 {
    if is_surprise {
        return 100;
    }
    let hitting_faces = (FUMBLE_ROLL + 1..=20)
        .filter(|&face| face >= crit_threshold || face + attack_bonus >= armor_class)
        .count() as i32;
    hitting_faces * 5
}

/// Resolve one d20 attack from `attacker` against `defender`
///
/// RNG use is fixed: the d20, then the damage roll (weapon, falling back to
/// the natural range), then the side-effect chances. A miss consumes only
/// the d20 and has no side effects.
pub fn attack_d20<R: Roller>(
    attacker: &Combatant,
    defender: &mut Combatant,
    session: &mut Session<R>,
    is_surprise: bool,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    let roll = session.rng.roll_die(20);
    let attack_bonus = attacker.fighter.dexterity_modifier() + attacker.to_hit_bonus(&session.items);
    let crit_threshold = attacker.crit_threshold(&session.items);
    let armor_class = defender.armor_class(&session.items);
    let chance = hit_percentage(attack_bonus, armor_class, crit_threshold, is_surprise);

    // Surprise overrides the fumble
    let fumble = roll == FUMBLE_ROLL && !is_surprise;
    let critical = !fumble && (is_surprise || roll >= crit_threshold);
    let hit = critical || (!fumble && roll + attack_bonus >= armor_class);

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        roll,
        attack_bonus,
        armor_class,
        critical,
        hit,
        "d20 attack"
    );

    if !hit {
        events.push(CombatEvent::Miss {
            attacker: attacker.id,
            defender: defender.id,
            fumble,
        });
        let text = if fumble {
            format!(
                "{} fumbles the attack on {}! ({}% to hit)",
                attacker.name, defender.name, chance
            )
        } else {
            format!("{} misses {}. ({}% to hit)", attacker.name, defender.name, chance)
        };
        events.push(CombatEvent::message(text, Tone::Neutral));
        return events;
    }

    let (weapon_roll, damage_type, poisons) = match attacker.weapon(&session.items) {
        Some((_, weapon)) => (
            weapon.roll_damage(&mut session.rng),
            weapon.damage_type,
            weapon.applies_poison_on_hit,
        ),
        None => (0, None, false),
    };
    let (dice, source) = if weapon_roll > 0 {
        (weapon_roll, "weapon")
    } else {
        (attacker.fighter.roll_natural_damage(&mut session.rng), "natural")
    };

    let strength = attacker.fighter.strength_modifier();
    let power = attacker.power(&session.items);
    let affinity = defender.fighter.affinity_modifier(damage_type);
    let multiplier = session.rules.crit.multiplier;

    let mut subtotal = dice + strength + power + affinity;
    if critical {
        subtotal *= multiplier;
    }
    let damage = subtotal.max(1);

    debug!(dice, strength, power, affinity, critical, damage, "d20 damage");

    let mut detail = format!("{}% to hit", chance);
    if dice != 0 {
        let affinity_label = if affinity > 0 { "vulnerable" } else { "resistant" };
        let mut breakdown = join_terms(&[
            (dice, source),
            (strength, "STR"),
            (power, "power"),
            (affinity, affinity_label),
        ]);
        if critical {
            breakdown.push_str(&format!(", x{}", multiplier));
        }
        detail = format!("{}: {}", detail, breakdown);
    }

    let death = defender.take_damage(damage, None, &session.items);
    events.push(CombatEvent::Hit {
        attacker: attacker.id,
        defender: defender.id,
        damage,
        critical,
    });
    let (text, tone) = if critical {
        (
            format!(
                "{} lands a critical hit on {} for {} damage! ({})",
                attacker.name, defender.name, damage, detail
            ),
            Tone::Critical,
        )
    } else {
        (
            format!(
                "{} hits {} for {} damage. ({})",
                attacker.name, defender.name, damage, detail
            ),
            Tone::Neutral,
        )
    };
    events.push(CombatEvent::message(text, tone));

    if !death.is_empty() {
        events.extend(death);
        return events;
    }

    triggers::after_hit(attacker, defender, poisons, session, &mut events);
    events
}

/// "3 weapon + 2 STR - 1 power", skipping zero terms after the first
pub(super) fn join_terms(terms: &[(i32, &str)]) -> String {
    let mut out = String::new();
    for (i, &(value, label)) in terms.iter().enumerate() {
        if i > 0 && value == 0 {
            continue;
        }
        if out.is_empty() {
            out.push_str(&format!("{} {}", value, label));
        } else if value < 0 {
            out.push_str(&format!(" - {} {}", -value, label));
        } else {
            out.push_str(&format!(" + {} {}", value, label));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatEvents;
    use crate::fighter::Fighter;
    use crate::item::{Equippable, Item};
    use crate::rng::ScriptedRolls;
    use crate::types::{Affinity, DamageType, EntityId, EquipmentSlot};

    fn session(rolls: impl IntoIterator<Item = i32>) -> Session<ScriptedRolls> {
        Session::with_rng(ScriptedRolls::new(rolls))
    }

    fn armed(session: &mut Session<ScriptedRolls>, weapon: Equippable, strength: i32) -> Combatant {
        let mut hero = Combatant::new(
            EntityId(0),
            "Hero",
            Fighter::new(30, 0, 0).with_abilities(strength, 10, 10),
        )
        .with_equipment();
        let id = session.items.spawn(Item::new("Blade").with_equippable(weapon));
        hero.toggle_equip(id, session);
        hero
    }

    fn dummy() -> Combatant {
        Combatant::new(EntityId(1), "Dummy", Fighter::new(100, 0, 0))
    }

    #[test]
    fn test_hit_percentage() {
        // AC 10, +0: faces 10..=20 hit
        assert_eq!(hit_percentage(0, 10, 20, false), 55);
        // Unreachable AC: only crit faces
        assert_eq!(hit_percentage(0, 40, 20, false), 5);
        assert_eq!(hit_percentage(0, 40, 19, false), 10);
        // Everything but the fumble
        assert_eq!(hit_percentage(10, 5, 20, false), 95);
        assert_eq!(hit_percentage(-20, 40, 20, true), 100);
    }

    #[test]
    fn test_basic_hit() {
        let mut session = session([15, 3]);
        let hero = armed(&mut session, Equippable::new(EquipmentSlot::MainHand).with_damage(2, 5), 14);
        let mut target = dummy();

        let events = hero.attack_d20(&mut target, &mut session);
        assert_eq!(events.damage_dealt(), 5);
        assert_eq!(target.fighter.hp, 95);
        assert!(events.messages()[0].contains("3 weapon + 2 STR"));
        assert!(events.messages()[0].contains("55% to hit"));
    }

    #[test]
    fn test_vulnerable_crit() {
        let mut session = session([20, 5]);
        let weapon = Equippable::new(EquipmentSlot::MainHand)
            .with_damage(2, 5)
            .with_damage_type(DamageType::Slashing);
        let hero = armed(&mut session, weapon, 14);
        let mut target = Combatant::new(
            EntityId(1),
            "Skeleton",
            Fighter::new(100, 0, 0).with_affinity(DamageType::Slashing, Affinity::Vulnerable),
        );

        let events = hero.attack_d20(&mut target, &mut session);
        assert_eq!(events.damage_dealt(), 16);
        assert!(matches!(events[0], CombatEvent::Hit { critical: true, .. }));
        assert!(events.messages()[0].contains("1 vulnerable, x2"));
    }

    #[test]
    fn test_resistant_affinity_reduces() {
        let mut session = session([15, 4]);
        let weapon = Equippable::new(EquipmentSlot::MainHand)
            .with_damage(1, 6)
            .with_damage_type(DamageType::Bludgeoning);
        let hero = armed(&mut session, weapon, 10);
        let mut target = Combatant::new(
            EntityId(1),
            "Slime",
            Fighter::new(100, 0, 0).with_affinity(DamageType::Bludgeoning, Affinity::Resistant),
        );

        let events = hero.attack_d20(&mut target, &mut session);
        assert_eq!(events.damage_dealt(), 3);
        assert!(events.messages()[0].contains("4 weapon - 1 resistant"));
    }

    #[test]
    fn test_keen_crit_range() {
        for (roll, keen, expect_crit) in [(19, true, true), (20, true, true), (19, false, false), (18, true, false)] {
            let mut session = session([roll, 3]);
            let mut weapon = Equippable::new(EquipmentSlot::MainHand).with_damage(3, 3);
            if keen {
                weapon = weapon.keen();
            }
            let hero = armed(&mut session, weapon, 10);
            let mut target = dummy();
            let events = hero.attack_d20(&mut target, &mut session);
            let critical = matches!(events[0], CombatEvent::Hit { critical: true, .. });
            assert_eq!(critical, expect_crit, "roll {} keen {}", roll, keen);
        }
    }

    #[test]
    fn test_natural_one_fumbles() {
        let mut session = session([1]);
        let hero = armed(
            &mut session,
            Equippable::new(EquipmentSlot::MainHand).with_damage(2, 5).with_to_hit_bonus(30),
            10,
        );
        let mut target = dummy();

        let events = hero.attack_d20(&mut target, &mut session);
        assert!(matches!(events[0], CombatEvent::Miss { fumble: true, .. }));
        assert!(events.messages()[0].contains("fumbles"));
        assert_eq!(target.fighter.hp, 100);
        assert_eq!(session.rng.remaining(), 0);
    }

    #[test]
    fn test_miss_against_high_ac() {
        let mut session = session([12, 4]);
        let hero = armed(&mut session, Equippable::new(EquipmentSlot::MainHand).with_damage(2, 5), 10);
        let mut target = Combatant::new(EntityId(1), "Knight", Fighter::new(10, 0, 0).with_abilities(10, 30, 10));

        let events = hero.attack_d20(&mut target, &mut session);
        assert!(matches!(events[0], CombatEvent::Miss { fumble: false, .. }));
        assert!(events.messages()[0].contains("% to hit"));
        // Damage die untouched
        assert_eq!(session.rng.remaining(), 1);
    }

    #[test]
    fn test_surprise_beats_fumble() {
        let mut session = session([1, 4]);
        let hero = armed(&mut session, Equippable::new(EquipmentSlot::MainHand).with_damage(2, 5), 10);
        let mut target = dummy();

        let events = hero.surprise_attack(&mut target, &mut session);
        assert_eq!(events.damage_dealt(), 8);
        assert!(events.messages()[0].contains("100% to hit"));
    }

    #[test]
    fn test_damage_floor_is_one() {
        let mut session = session([15, 1]);
        let weak = Combatant::new(
            EntityId(0),
            "Weakling",
            Fighter::new(5, 0, -5).with_abilities(3, 10, 10).with_natural_damage(1, 2),
        );
        let mut target = dummy();

        let events = weak.attack_d20(&mut target, &mut session);
        assert_eq!(events.damage_dealt(), 1);
        assert!(events.messages()[0].contains("1 natural"));
    }

    #[test]
    fn test_flat_attack_omits_breakdown() {
        let mut session = session([15]);
        let brute = Combatant::new(EntityId(0), "Brute", Fighter::new(5, 0, 3));
        let mut target = dummy();

        let events = brute.attack_d20(&mut target, &mut session);
        assert_eq!(events.damage_dealt(), 3);
        assert!(events.messages()[0].ends_with("(55% to hit)"));
    }

    #[test]
    fn test_kill_skips_side_effects() {
        let mut session = session([15, 5]);
        let hero = armed(
            &mut session,
            Equippable::new(EquipmentSlot::MainHand).with_damage(5, 5).poisoned(),
            10,
        );
        let mut rat = Combatant::new(EntityId(1), "Rat", Fighter::new(3, 0, 0));

        let events = hero.attack_d20(&mut rat, &mut session);
        assert!(events.any_dead());
        assert!(rat.status_effects.is_empty());
    }

    #[test]
    fn test_join_terms() {
        assert_eq!(join_terms(&[(3, "weapon"), (2, "STR"), (0, "power")]), "3 weapon + 2 STR");
        assert_eq!(join_terms(&[(4, "natural"), (-1, "STR")]), "4 natural - 1 STR");
    }
}
