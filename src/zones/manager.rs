//! Per-seat zone storage.
//!
//! Each seat owns five named zones. Ordered zones keep index 0 as the
//! bottom; for the deck the last element is the top card.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::InstanceId;

/// The named zones a seat owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Hand,
    MonsterZone,
    SpellTrapZone,
    Graveyard,
    Deck,
}

impl ZoneKind {
    /// Every zone, in display order.
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::Hand,
        ZoneKind::MonsterZone,
        ZoneKind::SpellTrapZone,
        ZoneKind::Graveyard,
        ZoneKind::Deck,
    ];

    /// Is this zone part of the field (monster or spell/trap zone)?
    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(self, ZoneKind::MonsterZone | ZoneKind::SpellTrapZone)
    }

    /// Are this zone's contents hidden from the opponent regardless of facing?
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, ZoneKind::Hand | ZoneKind::Deck)
    }

    /// Short name, as used in opaque placeholder IDs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Hand => "hand",
            ZoneKind::MonsterZone => "monster",
            ZoneKind::SpellTrapZone => "backrow",
            ZoneKind::Graveyard => "graveyard",
            ZoneKind::Deck => "deck",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (e.g., top of deck).
    Top,
    /// Add to bottom of zone.
    Bottom,
}

/// The zones of one seat.
///
/// Backed by `im::Vector` so snapshots for view projection are cheap.
///
/// ```
/// use duel_rules::cards::CardInstance;
/// use duel_rules::core::{InstanceId, Seat};
/// use duel_rules::zones::{SeatZones, ZoneKind, ZonePosition};
///
/// let mut zones = SeatZones::default();
/// zones.insert(ZoneKind::Deck, CardInstance::spell(InstanceId(1), 1, "A", Seat::Host), ZonePosition::Top);
/// zones.insert(ZoneKind::Deck, CardInstance::spell(InstanceId(2), 2, "B", Seat::Host), ZonePosition::Top);
///
/// assert_eq!(zones.top(ZoneKind::Deck).map(|c| c.instance_id), Some(InstanceId(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatZones {
    pub hand: Vector<CardInstance>,
    pub monster_zone: Vector<CardInstance>,
    pub spell_trap_zone: Vector<CardInstance>,
    pub graveyard: Vector<CardInstance>,
    pub deck: Vector<CardInstance>,
}

impl SeatZones {
    /// Get a zone by kind.
    #[must_use]
    pub fn get(&self, zone: ZoneKind) -> &Vector<CardInstance> {
        match zone {
            ZoneKind::Hand => &self.hand,
            ZoneKind::MonsterZone => &self.monster_zone,
            ZoneKind::SpellTrapZone => &self.spell_trap_zone,
            ZoneKind::Graveyard => &self.graveyard,
            ZoneKind::Deck => &self.deck,
        }
    }

    /// Get a zone mutably by kind.
    pub fn get_mut(&mut self, zone: ZoneKind) -> &mut Vector<CardInstance> {
        match zone {
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::MonsterZone => &mut self.monster_zone,
            ZoneKind::SpellTrapZone => &mut self.spell_trap_zone,
            ZoneKind::Graveyard => &mut self.graveyard,
            ZoneKind::Deck => &mut self.deck,
        }
    }

    /// Add a card to a zone.
    pub fn insert(&mut self, zone: ZoneKind, card: CardInstance, position: ZonePosition) {
        let cards = self.get_mut(zone);
        match position {
            ZonePosition::Top => cards.push_back(card),
            ZonePosition::Bottom => cards.push_front(card),
        }
    }

    /// Find which zone holds a card.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<ZoneKind> {
        ZoneKind::ALL
            .into_iter()
            .find(|&zone| self.get(zone).iter().any(|c| c.instance_id == id))
    }

    /// Get a card by instance ID from any zone.
    #[must_use]
    pub fn find(&self, id: InstanceId) -> Option<&CardInstance> {
        ZoneKind::ALL
            .into_iter()
            .find_map(|zone| self.get(zone).iter().find(|c| c.instance_id == id))
    }

    /// Get a mutable card by instance ID from any zone.
    pub fn find_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        let zone = self.locate(id)?;
        self.get_mut(zone).iter_mut().find(|c| c.instance_id == id)
    }

    /// Remove a card from whichever zone holds it.
    ///
    /// Returns the card and the zone it was in, or `None` if not found.
    pub fn take(&mut self, id: InstanceId) -> Option<(ZoneKind, CardInstance)> {
        let zone = self.locate(id)?;
        let cards = self.get_mut(zone);
        let index = cards.iter().position(|c| c.instance_id == id)?;
        Some((zone, cards.remove(index)))
    }

    /// Remove the top card of a zone (last element).
    pub fn pop_top(&mut self, zone: ZoneKind) -> Option<CardInstance> {
        self.get_mut(zone).pop_back()
    }

    /// Peek at the top card of a zone.
    #[must_use]
    pub fn top(&self, zone: ZoneKind) -> Option<&CardInstance> {
        self.get(zone).last()
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        ZoneKind::ALL.into_iter().map(|z| self.get(z).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Seat;

    fn spell(id: u32) -> CardInstance {
        CardInstance::spell(InstanceId(id), id, format!("Spell {id}"), Seat::Host)
    }

    #[test]
    fn test_insert_positions() {
        let mut zones = SeatZones::default();
        zones.insert(ZoneKind::Deck, spell(1), ZonePosition::Top);
        zones.insert(ZoneKind::Deck, spell(2), ZonePosition::Top);
        zones.insert(ZoneKind::Deck, spell(3), ZonePosition::Bottom);

        let order: Vec<_> = zones.deck.iter().map(|c| c.instance_id.raw()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(zones.top(ZoneKind::Deck).unwrap().instance_id, InstanceId(2));
    }

    #[test]
    fn test_locate_and_take() {
        let mut zones = SeatZones::default();
        zones.insert(ZoneKind::Hand, spell(1), ZonePosition::Top);
        zones.insert(ZoneKind::SpellTrapZone, spell(2), ZonePosition::Top);

        assert_eq!(zones.locate(InstanceId(2)), Some(ZoneKind::SpellTrapZone));
        assert_eq!(zones.locate(InstanceId(9)), None);

        let (zone, card) = zones.take(InstanceId(2)).unwrap();
        assert_eq!(zone, ZoneKind::SpellTrapZone);
        assert_eq!(card.instance_id, InstanceId(2));
        assert!(zones.spell_trap_zone.is_empty());
        assert_eq!(zones.card_count(), 1);
    }

    #[test]
    fn test_pop_top() {
        let mut zones = SeatZones::default();
        assert!(zones.pop_top(ZoneKind::Deck).is_none());

        zones.insert(ZoneKind::Deck, spell(1), ZonePosition::Top);
        zones.insert(ZoneKind::Deck, spell(2), ZonePosition::Top);
        assert_eq!(zones.pop_top(ZoneKind::Deck).unwrap().instance_id, InstanceId(2));
        assert_eq!(zones.deck.len(), 1);
    }

    #[test]
    fn test_zone_flags() {
        assert!(ZoneKind::MonsterZone.is_field());
        assert!(ZoneKind::SpellTrapZone.is_field());
        assert!(!ZoneKind::Graveyard.is_field());
        assert!(ZoneKind::Hand.is_hidden());
        assert!(ZoneKind::Deck.is_hidden());
        assert!(!ZoneKind::Graveyard.is_hidden());
    }
}
