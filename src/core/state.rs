//! Authoritative game state.
//!
//! The game record is owned by the surrounding application; the rules
//! core reads it and patches named fields (zones, turn counters, facing).
//!
//! ## Phase
//!
//! Turn structure: Draw, Standby, Main 1, Battle, Main 2, End.
//!
//! ## GameState
//!
//! Turn bookkeeping plus both seats' zones. Card lookup scans the zones;
//! boards are small enough that an index would cost more than it saves.

use serde::{Deserialize, Serialize};

use super::ids::{GameId, InstanceId};
use super::player::{Seat, SeatMap};
use crate::cards::CardInstance;
use crate::zones::{SeatZones, ZoneKind, ZonePosition};

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Draw,
    Standby,
    Main1,
    Battle,
    Main2,
    End,
}

impl Phase {
    /// The phase after this one, or `None` after the End phase.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Standby),
            Phase::Standby => Some(Phase::Main1),
            Phase::Main1 => Some(Phase::Battle),
            Phase::Battle => Some(Phase::Main2),
            Phase::Main2 => Some(Phase::End),
            Phase::End => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Draw => "draw",
            Phase::Standby => "standby",
            Phase::Main1 => "main1",
            Phase::Battle => "battle",
            Phase::Main2 => "main2",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full authoritative state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Which game this is.
    pub game: GameId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Current phase.
    pub phase: Phase,

    /// Seat whose turn it is.
    pub turn_player: Seat,

    /// Both seats' zones.
    pub zones: SeatMap<SeatZones>,

    /// Next instance ID to allocate.
    next_instance: u32,
}

impl GameState {
    /// Create an empty game on turn 1, Draw phase, host to play.
    #[must_use]
    pub fn new(game: GameId) -> Self {
        Self {
            game,
            turn_number: 1,
            phase: Phase::Draw,
            turn_player: Seat::Host,
            zones: SeatMap::default(),
            next_instance: 1,
        }
    }

    // === Instance Management ===

    /// Allocate a new instance ID.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Place a card into a seat's zone.
    ///
    /// Keeps the allocator ahead of any externally chosen instance IDs.
    pub fn put_card(&mut self, seat: Seat, zone: ZoneKind, card: CardInstance) {
        if card.instance_id.raw() >= self.next_instance {
            self.next_instance = card.instance_id.raw() + 1;
        }
        self.zones[seat].insert(zone, card, ZonePosition::Top);
    }

    // === Lookup ===

    /// Get a zone's cards.
    #[must_use]
    pub fn zone(&self, seat: Seat, zone: ZoneKind) -> &im::Vector<CardInstance> {
        self.zones[seat].get(zone)
    }

    /// Find a card anywhere in the game.
    ///
    /// Returns the seat and zone holding it along with the card.
    #[must_use]
    pub fn find_card(&self, id: InstanceId) -> Option<(Seat, ZoneKind, &CardInstance)> {
        Seat::all().find_map(|seat| {
            let zones = &self.zones[seat];
            let zone = zones.locate(id)?;
            zones.find(id).map(|card| (seat, zone, card))
        })
    }

    /// Get a mutable card anywhere in the game.
    pub fn card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        let (seat, _, _) = self.find_card(id)?;
        self.zones[seat].find_mut(id)
    }

    /// Is the card in a monster or spell/trap zone?
    #[must_use]
    pub fn is_on_field(&self, id: InstanceId) -> bool {
        self.find_card(id).is_some_and(|(_, zone, _)| zone.is_field())
    }

    // === Movement ===

    /// Move a card to a zone of `seat`, placing it on top.
    ///
    /// Cards leaving the field are turned face-up. Returns the zone the card
    /// came from, or `None` if the card does not exist.
    pub fn move_card(&mut self, id: InstanceId, seat: Seat, to: ZoneKind) -> Option<ZoneKind> {
        self.move_card_to(id, seat, to, ZonePosition::Top)
    }

    /// Move a card to a zone of `seat` at a given position.
    pub fn move_card_to(
        &mut self,
        id: InstanceId,
        seat: Seat,
        to: ZoneKind,
        position: ZonePosition,
    ) -> Option<ZoneKind> {
        let (from_seat, _, _) = self.find_card(id)?;
        let (from, mut card) = self.zones[from_seat].take(id)?;
        if !to.is_field() {
            card.face_down = false;
        }
        self.zones[seat].insert(to, card, position);
        Some(from)
    }

    /// Send a card to its owner's graveyard.
    pub fn send_to_graveyard(&mut self, id: InstanceId) -> Option<ZoneKind> {
        let owner = self.find_card(id)?.2.owner;
        self.move_card(id, owner, ZoneKind::Graveyard)
    }

    // === Turn Advancement ===

    /// Advance to the next turn: turn counter up, Draw phase, other seat to play.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.phase = Phase::Draw;
        self.turn_player = self.turn_player.opponent();
    }
}
