//! Session - The explicit context every engine call runs against

use crate::config::CombatRules;
use crate::item::{IdentificationRegistry, ItemStore};
use crate::rng::{GameRng, Roller};

/// State shared by all combatants of one game
///
/// Owns the item arena, the identification registry, the rules and the
/// single RNG stream. Nothing in the engine reaches for global state.
#[derive(Debug, Clone)]
pub struct Session<R: Roller = GameRng> {
    pub items: ItemStore,
    pub identification: IdentificationRegistry,
    pub rules: CombatRules,
    pub rng: R,
}

impl Session<GameRng> {
    /// Session with a deterministic RNG
    pub fn seeded(seed: u64) -> Self {
        Session::with_rng(GameRng::seeded(seed))
    }

    /// Session with an OS-seeded RNG
    pub fn from_entropy() -> Self {
        Session::with_rng(GameRng::from_entropy())
    }
}

impl<R: Roller> Session<R> {
    pub fn with_rng(rng: R) -> Self {
        Session {
            items: ItemStore::new(),
            identification: IdentificationRegistry::new(),
            rules: CombatRules::default(),
            rng,
        }
    }

    pub fn with_rules(mut self, rules: CombatRules) -> Self {
        self.rules = rules;
        self
    }
}
