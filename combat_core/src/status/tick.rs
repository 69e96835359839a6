//! Turn-boundary processing for status effects

use super::{StatusEffects, StatusKind};

/// What the map layer knows about the entity at turn start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnContext {
    /// Adjacent to at least one creature with the engulf ability
    pub adjacent_to_engulfer: bool,
}

/// Result of turn-start processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnStartOutcome {
    /// The entity loses this turn
    pub skip_turn: bool,
    pub expired: Vec<StatusKind>,
}

/// Result of turn-end processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnEndOutcome {
    /// Poison damage to apply (before resistance)
    pub poison_damage: i32,
    pub expired: Vec<StatusKind>,
}

impl StatusEffects {
    /// Process engulf and entangle at the start of the owner's turn
    ///
    /// Engulf holds at full duration while the owner is adjacent to any
    /// engulfer and decays by one per turn otherwise. While it lasts, every
    /// other turn is lost.
    pub fn tick_turn_start(&mut self, ctx: TurnContext) -> TurnStartOutcome {
        let mut outcome = TurnStartOutcome::default();

        if let Some(engulf) = self.get_effect_mut(StatusKind::Engulfed) {
            if ctx.adjacent_to_engulfer {
                engulf.refresh();
            } else {
                engulf.duration -= 1;
            }
            if engulf.is_active() {
                outcome.skip_turn = engulf.skip_next;
                engulf.skip_next = !engulf.skip_next;
            }
        }

        if let Some(entangle) = self.get_effect_mut(StatusKind::Entangled) {
            entangle.duration -= 1;
        }

        outcome.expired = self.drain_expired(&[StatusKind::Engulfed, StatusKind::Entangled]);
        outcome
    }

    /// Process poison at the end of the owner's turn
    pub fn tick_turn_end(&mut self) -> TurnEndOutcome {
        let mut outcome = TurnEndOutcome::default();

        if let Some(poison) = self.get_effect_mut(StatusKind::Poisoned) {
            outcome.poison_damage = poison.potency;
            poison.duration -= 1;
        }

        outcome.expired = self.drain_expired(&[StatusKind::Poisoned]);
        outcome
    }

    fn drain_expired(&mut self, kinds: &[StatusKind]) -> Vec<StatusKind> {
        let expired: Vec<StatusKind> = self
            .effects
            .iter()
            .filter(|e| kinds.contains(&e.kind) && !e.is_active())
            .map(|e| e.kind)
            .collect();
        self.effects
            .retain(|e| !(kinds.contains(&e.kind) && !e.is_active()));
        expired
    }
}
