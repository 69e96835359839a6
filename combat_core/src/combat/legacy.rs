//! Legacy power-vs-defense attack resolution

use super::d20::join_terms;
use super::event::{CombatEvent, Tone};
use crate::entity::Combatant;
use crate::rng::Roller;
use crate::session::Session;
use tracing::debug;

/// Resolve a deterministic-arithmetic attack
///
/// `power + weapon roll` (natural range when the weapon rolls 0) against
/// `defense + rolled armor`. Damage floors at 0 and there are no side
/// effects on this path.
pub fn attack_legacy<R: Roller>(
    attacker: &Combatant,
    defender: &mut Combatant,
    session: &mut Session<R>,
) -> Vec<CombatEvent> {
    let power = attacker.power(&session.items);
    let weapon_roll = attacker
        .weapon(&session.items)
        .map_or(0, |(_, weapon)| weapon.roll_damage(&mut session.rng));
    let (roll, source) = if weapon_roll > 0 {
        (weapon_roll, "weapon")
    } else {
        (attacker.fighter.roll_natural_damage(&mut session.rng), "natural")
    };

    let base_defense = defender.defense(&session.items);
    let armor: i32 = match &defender.equipment {
        Some(equipment) => equipment
            .equippables(&session.items)
            .map(|piece| piece.roll_defense(&mut session.rng))
            .sum(),
        None => 0,
    };

    let total_attack = power + roll;
    let total_defense = base_defense + armor;
    let damage = (total_attack - total_defense).max(0);

    debug!(power, roll, base_defense, armor, damage, "legacy attack");

    let mut events = vec![CombatEvent::Hit {
        attacker: attacker.id,
        defender: defender.id,
        damage,
        critical: false,
    }];

    let attack_terms = nonzero_terms(&[(power, "power"), (roll, source)]);
    let defense_terms = nonzero_terms(&[(base_defense, "base"), (armor, "armor")]);
    let breakdown = match (attack_terms.is_empty(), defense_terms.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!(" ({})", attack_terms),
        (true, false) => format!(" (vs {})", defense_terms),
        (false, false) => format!(" ({} vs {})", attack_terms, defense_terms),
    };

    if damage > 0 {
        events.push(CombatEvent::message(
            format!(
                "{} attacks {} for {} hit points.{}",
                attacker.name, defender.name, damage, breakdown
            ),
            Tone::Neutral,
        ));
        events.extend(defender.take_damage(damage, None, &session.items));
    } else {
        events.push(CombatEvent::message(
            format!(
                "{} attacks {} but does no damage: attack blocked!{}",
                attacker.name, defender.name, breakdown
            ),
            Tone::Neutral,
        ));
    }
    events
}

fn nonzero_terms(terms: &[(i32, &str)]) -> String {
    let kept: Vec<(i32, &str)> = terms.iter().copied().filter(|&(value, _)| value != 0).collect();
    if kept.is_empty() {
        String::new()
    } else {
        join_terms(&kept)
    }
}
