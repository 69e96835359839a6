//! Identification state for the current game session

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which item kinds the player has identified
///
/// Owned by the [`Session`](crate::Session); identifying one item reveals
/// every item of the same kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentificationRegistry {
    identified: BTreeSet<String>,
}

impl IdentificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_identified(&self, kind: &str) -> bool {
        self.identified.contains(kind)
    }

    /// Mark a kind identified. Returns true if it was not identified before.
    pub fn identify(&mut self, kind: &str) -> bool {
        self.identified.insert(kind.to_string())
    }

    /// Number of identified kinds
    pub fn len(&self) -> usize {
        self.identified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identified.is_empty()
    }
}
