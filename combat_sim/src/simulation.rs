//! Duel simulation utilities

use crate::presets;
use combat_core::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Rounds before a duel is called a stalemate
pub const MAX_ROUNDS: u32 = 200;

/// How a duel ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelOutcome {
    HeroWon,
    MonsterWon,
    /// A ring teleported the hero out of the fight
    HeroEscaped,
    Stalemate,
}

/// Attack counters for one side
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttackStats {
    pub attacks: u32,
    pub hits: u32,
    pub crits: u32,
    pub fumbles: u32,
    pub total_damage: i64,
}

impl AttackStats {
    /// Tally the hit/miss records of one attack
    pub fn record(&mut self, events: &[CombatEvent]) {
        for event in events {
            match event {
                CombatEvent::Hit { damage, critical, .. } => {
                    self.attacks += 1;
                    self.hits += 1;
                    self.total_damage += i64::from(*damage);
                    if *critical {
                        self.crits += 1;
                    }
                }
                CombatEvent::Miss { fumble, .. } => {
                    self.attacks += 1;
                    if *fumble {
                        self.fumbles += 1;
                    }
                }
                _ => {}
            }
        }
    }

    pub fn hit_rate(&self) -> f64 {
        if self.attacks > 0 {
            self.hits as f64 / self.attacks as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn crit_rate(&self) -> f64 {
        if self.hits > 0 {
            self.crits as f64 / self.hits as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_damage(&self) -> f64 {
        if self.hits > 0 {
            self.total_damage as f64 / self.hits as f64
        } else {
            0.0
        }
    }
}

/// Aggregate results over many duels
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DuelStats {
    pub duels: u32,
    pub hero_wins: u32,
    pub monster_wins: u32,
    pub escapes: u32,
    pub stalemates: u32,
    pub rounds: u32,
    pub hero: AttackStats,
    pub monster: AttackStats,
    pub corrosions: u32,
    pub skipped_turns: u32,
}

impl DuelStats {
    pub fn record_outcome(&mut self, outcome: DuelOutcome) {
        self.duels += 1;
        match outcome {
            DuelOutcome::HeroWon => self.hero_wins += 1,
            DuelOutcome::MonsterWon => self.monster_wins += 1,
            DuelOutcome::HeroEscaped => self.escapes += 1,
            DuelOutcome::Stalemate => self.stalemates += 1,
        }
    }

    pub fn avg_rounds(&self) -> f64 {
        if self.duels > 0 {
            self.rounds as f64 / self.duels as f64
        } else {
            0.0
        }
    }
}

/// One hero-versus-monster fight
pub struct Duel {
    pub hero: Combatant,
    pub monster: Combatant,
    /// Resolve attacks with the legacy power-vs-defense path
    pub legacy: bool,
}

impl Duel {
    /// Fight until someone dies, the hero escapes or the round cap is hit
    ///
    /// Every event produced is appended to `log`.
    pub fn run<R: Roller>(
        &mut self,
        session: &mut Session<R>,
        stats: &mut DuelStats,
        log: &mut Vec<CombatEvent>,
    ) -> DuelOutcome {
        for _ in 0..MAX_ROUNDS {
            stats.rounds += 1;

            // Hero turn
            let ctx = TurnContext {
                adjacent_to_engulfer: self.monster.is_alive()
                    && self.monster.has_ability(SpecialAbility::Engulf),
            };
            let start = self.hero.process_turn_start(ctx);
            let skipped = start
                .iter()
                .any(|e| matches!(e, CombatEvent::SkipTurn { .. }));
            log.extend(start);

            if skipped {
                stats.skipped_turns += 1;
            } else {
                let events = strike(&self.hero, &mut self.monster, session, self.legacy);
                stats.hero.record(&events);
                log.extend(events);
                if !self.monster.is_alive() {
                    return DuelOutcome::HeroWon;
                }
            }

            log.extend(self.hero.process_turn_end(&session.items));
            if !self.hero.is_alive() {
                return DuelOutcome::MonsterWon;
            }

            // Monster turn
            let events = strike(&self.monster, &mut self.hero, session, self.legacy);
            stats.monster.record(&events);
            stats.corrosions += events
                .iter()
                .filter(|e| matches!(e, CombatEvent::Corroded { .. }))
                .count() as u32;
            let teleported = events
                .iter()
                .any(|e| matches!(e, CombatEvent::Teleport { .. }));
            log.extend(events);

            if !self.hero.is_alive() {
                return DuelOutcome::MonsterWon;
            }
            if teleported {
                return DuelOutcome::HeroEscaped;
            }
        }
        DuelOutcome::Stalemate
    }
}

fn strike<R: Roller>(
    attacker: &Combatant,
    defender: &mut Combatant,
    session: &mut Session<R>,
    legacy: bool,
) -> Vec<CombatEvent> {
    if legacy {
        attacker.attack(defender, session)
    } else {
        attacker.attack_d20(defender, session)
    }
}

/// Run `duels` fresh duels and return the totals plus the last duel's log
pub fn simulate<R: Roller>(
    catalog: &ItemCatalog,
    session: &mut Session<R>,
    duels: u32,
    legacy: bool,
) -> (DuelStats, Vec<CombatEvent>) {
    let mut stats = DuelStats::default();
    let mut last_log = Vec::new();

    for index in 0..duels {
        let mut duel = Duel {
            hero: presets::hero(catalog, session),
            monster: presets::acid_ooze(),
            legacy,
        };
        let mut log = Vec::new();
        let outcome = duel.run(session, &mut stats, &mut log);
        presets::release_loadout(&mut duel.hero, &mut session.items);
        debug!(duel = index, ?outcome, events = log.len(), "duel finished");
        stats.record_outcome(outcome);
        last_log = log;
    }

    info!(
        duels = stats.duels,
        hero_wins = stats.hero_wins,
        monster_wins = stats.monster_wins,
        "simulation finished"
    );
    (stats, last_log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::DEFAULT_ITEMS;

    fn catalog() -> ItemCatalog {
        ItemCatalog::parse(DEFAULT_ITEMS).unwrap()
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let catalog = catalog();
        let mut first = Session::seeded(42);
        let mut second = Session::seeded(42);

        let (a, log_a) = simulate(&catalog, &mut first, 20, false);
        let (b, log_b) = simulate(&catalog, &mut second, 20, false);
        assert_eq!(a, b);
        assert_eq!(log_a, log_b);
    }

    #[test]
    fn test_every_duel_is_counted() {
        let catalog = catalog();
        let mut session = Session::seeded(7);
        let (stats, log) = simulate(&catalog, &mut session, 25, false);

        assert_eq!(stats.duels, 25);
        assert_eq!(
            stats.hero_wins + stats.monster_wins + stats.escapes + stats.stalemates,
            25
        );
        assert!(stats.hero.attacks > 0);
        assert!(stats.hero.hits <= stats.hero.attacks);
        assert!(!log.is_empty());
        assert!(session.items.is_empty());
    }

    #[test]
    fn test_legacy_path_never_crits() {
        let catalog = catalog();
        let mut session = Session::seeded(9);
        let (stats, _) = simulate(&catalog, &mut session, 10, true);

        assert_eq!(stats.hero.crits, 0);
        assert_eq!(stats.monster.crits, 0);
        assert_eq!(stats.hero.fumbles, 0);
    }

    #[test]
    fn test_attack_stats_rates() {
        let mut stats = AttackStats::default();
        stats.record(&[
            CombatEvent::Hit {
                attacker: EntityId(0),
                defender: EntityId(1),
                damage: 6,
                critical: true,
            },
            CombatEvent::Miss {
                attacker: EntityId(0),
                defender: EntityId(1),
                fumble: true,
            },
        ]);
        assert_eq!(stats.attacks, 2);
        assert!((stats.hit_rate() - 50.0).abs() < f64::EPSILON);
        assert!((stats.crit_rate() - 100.0).abs() < f64::EPSILON);
        assert!((stats.avg_damage() - 6.0).abs() < f64::EPSILON);
    }
}
