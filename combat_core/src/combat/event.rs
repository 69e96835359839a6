//! CombatEvent - Ordered outcome records for the presentation layer

use crate::status::StatusKind;
use crate::types::{EntityId, ItemId};
use serde::{Deserialize, Serialize};

/// How a message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Good,
    Bad,
    Warning,
    Critical,
}

/// A narratable line of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub tone: Tone,
}

impl Message {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Message {
            text: text.into(),
            tone,
        }
    }
}

/// One outcome of an engine call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Message(Message),
    Hit {
        attacker: EntityId,
        defender: EntityId,
        damage: i32,
        critical: bool,
    },
    Miss {
        attacker: EntityId,
        defender: EntityId,
        fumble: bool,
    },
    Dead {
        entity: EntityId,
    },
    Equipped {
        item: ItemId,
    },
    Dequipped {
        item: ItemId,
    },
    Corroded {
        item: ItemId,
        damage_max: i32,
    },
    Teleport {
        entity: EntityId,
    },
    SkipTurn {
        entity: EntityId,
    },
    Identified {
        item: ItemId,
    },
    StatusApplied {
        entity: EntityId,
        status: StatusKind,
    },
    StatusExpired {
        entity: EntityId,
        status: StatusKind,
    },
}

impl CombatEvent {
    pub fn message(text: impl Into<String>, tone: Tone) -> Self {
        CombatEvent::Message(Message::new(text, tone))
    }

    /// Text of a message event
    pub fn text(&self) -> Option<&str> {
        match self {
            CombatEvent::Message(message) => Some(&message.text),
            _ => None,
        }
    }
}

/// Helpers for scanning an event list
pub trait CombatEvents {
    /// All message texts, in order
    fn messages(&self) -> Vec<&str>;
    /// Total damage from `Hit` events
    fn damage_dealt(&self) -> i32;
    fn any_dead(&self) -> bool;
    /// Serialize the list as a JSON array
    fn to_json(&self) -> serde_json::Result<String>;
}

impl CombatEvents for [CombatEvent] {
    fn messages(&self) -> Vec<&str> {
        self.iter().filter_map(CombatEvent::text).collect()
    }

    fn damage_dealt(&self) -> i32 {
        self.iter()
            .map(|event| match event {
                CombatEvent::Hit { damage, .. } => *damage,
                _ => 0,
            })
            .sum()
    }

    fn any_dead(&self) -> bool {
        self.iter().any(|event| matches!(event, CombatEvent::Dead { .. }))
    }

    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
