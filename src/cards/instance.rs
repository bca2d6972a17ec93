//! Card instances - the cards physically present in a game.
//!
//! `CardInstance` carries everything the rules core reads from a card:
//! printed identity (code, name, kind, archetype), base stats for
//! monsters, the owning seat and the face-down flag. Stat modifiers are
//! not stored on the card; they live in the effect store and are folded
//! on read (see [`effective_stats`](crate::effects::effective_stats)).

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, Seat};

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Monster,
    Spell,
    Trap,
}

impl CardKind {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardKind::Monster => "monster",
            CardKind::Spell => "spell",
            CardKind::Trap => "trap",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attack and defense values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub attack: i32,
    pub defense: i32,
}

impl Stats {
    #[must_use]
    pub const fn new(attack: i32, defense: i32) -> Self {
        Self { attack, defense }
    }
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique instance ID within the game.
    pub instance_id: InstanceId,

    /// Printed card code (shared by every copy of the card).
    pub code: u32,

    /// Printed name.
    pub name: String,

    /// Monster, spell or trap.
    pub kind: CardKind,

    /// Archetype the card belongs to, if any.
    #[serde(default)]
    pub archetype: Option<String>,

    /// Base stats. `None` for spells and traps.
    #[serde(default)]
    pub stats: Option<Stats>,

    /// Seat that owns the card (where it returns when sent to the graveyard).
    pub owner: Seat,

    /// Is the card set face-down?
    #[serde(default)]
    pub face_down: bool,
}

impl CardInstance {
    /// Create a face-up monster.
    #[must_use]
    pub fn monster(
        instance_id: InstanceId,
        code: u32,
        name: impl Into<String>,
        owner: Seat,
        stats: Stats,
    ) -> Self {
        Self {
            instance_id,
            code,
            name: name.into(),
            kind: CardKind::Monster,
            archetype: None,
            stats: Some(stats),
            owner,
            face_down: false,
        }
    }

    /// Create a face-up spell.
    #[must_use]
    pub fn spell(instance_id: InstanceId, code: u32, name: impl Into<String>, owner: Seat) -> Self {
        Self::non_monster(instance_id, code, name, owner, CardKind::Spell)
    }

    /// Create a face-up trap.
    #[must_use]
    pub fn trap(instance_id: InstanceId, code: u32, name: impl Into<String>, owner: Seat) -> Self {
        Self::non_monster(instance_id, code, name, owner, CardKind::Trap)
    }

    fn non_monster(
        instance_id: InstanceId,
        code: u32,
        name: impl Into<String>,
        owner: Seat,
        kind: CardKind,
    ) -> Self {
        Self {
            instance_id,
            code,
            name: name.into(),
            kind,
            archetype: None,
            stats: None,
            owner,
            face_down: false,
        }
    }

    /// Set the archetype (builder pattern).
    #[must_use]
    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    /// Set the card face-down (builder pattern).
    #[must_use]
    pub fn set_face_down(mut self) -> Self {
        self.face_down = true;
        self
    }

    /// Does the card belong to an archetype?
    ///
    /// Matches the archetype field exactly (ignoring case), or the name
    /// by substring, so "Dragon" finds both archetype members and cards
    /// named "... Dragon".
    #[must_use]
    pub fn matches_archetype(&self, archetype: &str) -> bool {
        let needle = archetype.to_lowercase();
        self.archetype
            .as_deref()
            .is_some_and(|a| a.to_lowercase() == needle)
            || self.name.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_has_stats() {
        let card = CardInstance::monster(InstanceId(1), 100, "Blue Dragon", Seat::Host, Stats::new(3000, 2500));
        assert_eq!(card.kind, CardKind::Monster);
        assert_eq!(card.stats, Some(Stats::new(3000, 2500)));
        assert!(!card.face_down);
    }

    #[test]
    fn test_spell_and_trap_have_no_stats() {
        let spell = CardInstance::spell(InstanceId(2), 200, "Pot", Seat::Away);
        let trap = CardInstance::trap(InstanceId(3), 300, "Hole", Seat::Away).set_face_down();
        assert_eq!(spell.stats, None);
        assert_eq!(trap.kind, CardKind::Trap);
        assert!(trap.face_down);
    }

    #[test]
    fn test_matches_archetype() {
        let card = CardInstance::monster(InstanceId(1), 1, "Flame Swordsman", Seat::Host, Stats::default())
            .with_archetype("Blaze");

        assert!(card.matches_archetype("blaze"));
        assert!(card.matches_archetype("Sword"));
        assert!(!card.matches_archetype("Ice"));
    }

    #[test]
    fn test_serialization() {
        let card = CardInstance::trap(InstanceId(9), 7, "Mirror", Seat::Host).set_face_down();
        let json = serde_json::to_string(&card).unwrap();
        let back: CardInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
