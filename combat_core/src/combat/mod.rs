//! Combat resolution - Resolve one attack into ordered outcome records

mod d20;
mod event;
mod legacy;
mod triggers;

pub use d20::{attack_d20, hit_percentage};
pub use event::{CombatEvent, CombatEvents, Message, Tone};
pub use legacy::attack_legacy;
