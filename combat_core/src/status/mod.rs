//! Status effects - Per-entity effect bookkeeping
//!
//! Combat only decides *when* an effect lands; this module owns how effects
//! are stored, refreshed and ticked.

mod tick;

pub use tick::{TurnContext, TurnEndOutcome, TurnStartOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of status effect combat can inflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Takes poison damage at the end of each turn
    Poisoned,
    /// Held inside a creature: loses every other turn while adjacent to it
    Engulfed,
    /// Pinned in place, cannot move
    Entangled,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::Poisoned => "poisoned",
            StatusKind::Engulfed => "engulfed",
            StatusKind::Entangled => "entangled",
        };
        f.write_str(name)
    }
}

/// An active status effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns remaining
    pub duration: i32,
    /// Duration a fresh application or refresh sets
    pub max_duration: i32,
    /// Damage per tick for damaging effects
    pub potency: i32,
    /// Engulf alternation: whether the next turn start is lost
    pub skip_next: bool,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: i32) -> Self {
        let duration = duration.max(1);
        StatusEffect {
            kind,
            duration,
            max_duration: duration,
            potency: 0,
            skip_next: kind == StatusKind::Engulfed,
        }
    }

    pub fn poisoned(duration: i32, damage_per_turn: i32) -> Self {
        let mut effect = Self::new(StatusKind::Poisoned, duration);
        effect.potency = damage_per_turn.max(0);
        effect
    }

    pub fn engulfed(duration: i32) -> Self {
        Self::new(StatusKind::Engulfed, duration)
    }

    pub fn entangled(duration: i32) -> Self {
        Self::new(StatusKind::Entangled, duration)
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0
    }

    /// Reset to full duration
    pub fn refresh(&mut self) {
        self.duration = self.max_duration;
    }
}

/// Status effects on one entity; at most one instance per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_effect(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get_effect(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn get_effect_mut(&mut self, kind: StatusKind) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.kind == kind)
    }

    /// Apply an effect, refreshing an existing one of the same kind
    ///
    /// Reapplication resets the duration to the new effect's full duration
    /// and keeps the stronger potency; it never adds a second instance.
    /// Returns true when the effect is new.
    pub fn add_effect(&mut self, effect: StatusEffect) -> bool {
        match self.get_effect_mut(effect.kind) {
            Some(existing) => {
                existing.max_duration = effect.max_duration;
                existing.potency = existing.potency.max(effect.potency);
                existing.refresh();
                false
            }
            None => {
                self.effects.push(effect);
                true
            }
        }
    }

    pub fn remove_effect(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Entangled entities cannot move
    pub fn is_immobilized(&self) -> bool {
        self.has_effect(StatusKind::Entangled)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
