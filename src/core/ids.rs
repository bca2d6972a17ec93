//! Identifiers for games, card instances, effect records and chains.
//!
//! All identifiers are plain integer newtypes. The core never interprets
//! them beyond equality and ordering; allocation belongs to whichever store
//! owns the record.
//!
//! ## Usage
//!
//! ```
//! use duel_rules::core::{EffectId, GameId, InstanceId};
//!
//! let game = GameId::new(7);
//! let card = InstanceId::new(42);
//!
//! assert_eq!(game.raw(), 7);
//! assert_eq!(format!("{}", card), "Card#42");
//! assert!(EffectId::new(1) < EffectId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of one game (the aggregate root every record hangs off).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Identifier of a physical card instance inside one game.
///
/// Two copies of the same printed card have different instance IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Identifier of an [`ActiveEffect`](crate::effects::ActiveEffect) record.
///
/// Allocated monotonically by the effect store, so ordering by ID is
/// insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u64);

impl EffectId {
    /// Create a new effect ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// Identifier of a chain record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Create a new chain ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chain({})", self.0)
    }
}

/// Index of an effect printed on a card ("effect 1", "effect 2", ...).
///
/// Once-per-turn limits are tracked per `(card, effect)` pair, so a card
/// with two effects can use each of them once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardEffectId(pub u8);

impl CardEffectId {
    /// Create a new card effect ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardEffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "effect {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", GameId(3)), "Game(3)");
        assert_eq!(format!("{}", InstanceId(42)), "Card#42");
        assert_eq!(format!("{}", EffectId(9)), "Effect(9)");
        assert_eq!(format!("{}", ChainId(1)), "Chain(1)");
        assert_eq!(format!("{}", CardEffectId(2)), "effect 2");
    }

    #[test]
    fn test_effect_ids_order_by_allocation() {
        let mut ids = vec![EffectId(5), EffectId(1), EffectId(3)];
        ids.sort();
        assert_eq!(ids, vec![EffectId(1), EffectId(3), EffectId(5)]);
    }

    #[test]
    fn test_serialization() {
        let id = InstanceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
