//! View projection.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::CardInstance;
use crate::core::{GameId, GameState, InstanceId, Phase, Seat, SeatMap, ViewPolicy, Viewer};
use crate::zones::{SeatZones, ZoneKind};

/// A masked card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenCard {
    /// Stable placeholder ID (`<label>-<seat>-<zone>-<index>`).
    pub opaque_id: String,

    /// Always `true`; tells clients to render a card back.
    pub display_as_unknown: bool,

    /// Instance ID of a face-down field card, so it can still be targeted.
    /// `None` for cards in hidden zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<InstanceId>,
}

/// One card as a viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewCard {
    Visible(CardInstance),
    Hidden(HiddenCard),
}

impl ViewCard {
    /// The card, if visible.
    #[must_use]
    pub fn visible(&self) -> Option<&CardInstance> {
        match self {
            ViewCard::Visible(card) => Some(card),
            ViewCard::Hidden(_) => None,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, ViewCard::Hidden(_))
    }
}

/// One seat's zones as a viewer sees them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub hand: Vec<ViewCard>,
    pub monster_zone: Vec<ViewCard>,
    pub spell_trap_zone: Vec<ViewCard>,
    pub graveyard: Vec<ViewCard>,
    pub deck: Vec<ViewCard>,
}

impl SeatView {
    /// Get a zone by kind.
    #[must_use]
    pub fn get(&self, zone: ZoneKind) -> &[ViewCard] {
        match zone {
            ZoneKind::Hand => &self.hand,
            ZoneKind::MonsterZone => &self.monster_zone,
            ZoneKind::SpellTrapZone => &self.spell_trap_zone,
            ZoneKind::Graveyard => &self.graveyard,
            ZoneKind::Deck => &self.deck,
        }
    }

    fn get_mut(&mut self, zone: ZoneKind) -> &mut Vec<ViewCard> {
        match zone {
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::MonsterZone => &mut self.monster_zone,
            ZoneKind::SpellTrapZone => &mut self.spell_trap_zone,
            ZoneKind::Graveyard => &mut self.graveyard,
            ZoneKind::Deck => &mut self.deck,
        }
    }

    fn cards(&self) -> impl Iterator<Item = &ViewCard> {
        ZoneKind::ALL.into_iter().flat_map(|zone| self.get(zone).iter())
    }
}

/// The game as one viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub game: GameId,
    pub viewer: Viewer,
    pub turn_number: u32,
    pub phase: Phase,
    pub turn_player: Seat,
    pub seats: SeatMap<SeatView>,
}

impl PlayerView {
    /// Number of placeholders across both seats.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.seats
            .iter()
            .flat_map(|(_, seat)| seat.cards())
            .filter(|card| card.is_hidden())
            .count()
    }

    /// Instance IDs of every visible card.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<InstanceId> {
        self.seats
            .iter()
            .flat_map(|(_, seat)| seat.cards())
            .filter_map(|card| card.visible().map(|c| c.instance_id))
            .collect()
    }
}

/// Builds views according to a [`ViewPolicy`].
#[derive(Clone, Debug, Default)]
pub struct ViewProjector {
    policy: ViewPolicy,
}

impl ViewProjector {
    #[must_use]
    pub fn new(policy: ViewPolicy) -> Self {
        Self { policy }
    }

    /// Project `state` for `viewer`. The state is not modified.
    #[must_use]
    pub fn project(&self, state: &GameState, viewer: Viewer) -> PlayerView {
        let seats = state
            .zones
            .map(|seat, zones| self.project_seat(seat, zones, viewer));

        let view = PlayerView {
            game: state.game,
            viewer,
            turn_number: state.turn_number,
            phase: state.phase,
            turn_player: state.turn_player,
            seats,
        };
        trace!(game = %state.game, ?viewer, hidden = view.hidden_count(), "view projected");
        view
    }

    fn project_seat(&self, seat: Seat, zones: &SeatZones, viewer: Viewer) -> SeatView {
        let owned = viewer.owns(seat);
        let mut out = SeatView::default();

        for zone in ZoneKind::ALL {
            let cards = out.get_mut(zone);
            for (index, card) in zones.get(zone).iter().enumerate() {
                let masked = !owned && (zone.is_hidden() || (zone.is_field() && card.face_down));
                if !masked {
                    cards.push(ViewCard::Visible(card.clone()));
                    continue;
                }
                cards.push(ViewCard::Hidden(HiddenCard {
                    opaque_id: format!("{}-{seat}-{zone}-{index}", self.policy.hidden_label),
                    display_as_unknown: true,
                    slot: zone.is_field().then_some(card.instance_id),
                }));
            }
        }
        out
    }
}

/// Project with the default policy.
#[must_use]
pub fn project(state: &GameState, viewer: Viewer) -> PlayerView {
    ViewProjector::default().project(state, viewer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Stats;

    fn board() -> GameState {
        let mut state = GameState::new(GameId(1));
        state.put_card(Seat::Host, ZoneKind::Hand, CardInstance::spell(InstanceId(1), 1, "Pot", Seat::Host));
        state.put_card(Seat::Away, ZoneKind::Hand, CardInstance::spell(InstanceId(2), 2, "Raigeki", Seat::Away));
        state.put_card(Seat::Away, ZoneKind::Deck, CardInstance::spell(InstanceId(3), 3, "Hole", Seat::Away));
        state.put_card(
            Seat::Away,
            ZoneKind::MonsterZone,
            CardInstance::monster(InstanceId(4), 4, "Wall", Seat::Away, Stats::new(0, 2000)).set_face_down(),
        );
        state
    }

    #[test]
    fn test_opponent_hidden_zones_masked() {
        let view = project(&board(), Viewer::Seat(Seat::Host));
        let away = &view.seats[Seat::Away];

        assert_eq!(away.hand.len(), 1);
        assert!(away.hand[0].is_hidden());
        assert!(away.deck[0].is_hidden());
        assert_eq!(view.visible_ids(), vec![InstanceId(1)]);
    }

    #[test]
    fn test_face_down_keeps_slot() {
        let view = project(&board(), Viewer::Spectator);
        let ViewCard::Hidden(hidden) = &view.seats[Seat::Away].monster_zone[0] else {
            panic!("face-down monster should be masked");
        };
        assert_eq!(hidden.slot, Some(InstanceId(4)));
        assert_eq!(hidden.opaque_id, "hidden-away-monster-0");
        assert!(hidden.display_as_unknown);
    }

    #[test]
    fn test_owner_sees_own_face_down() {
        let view = project(&board(), Viewer::Seat(Seat::Away));
        assert_eq!(view.hidden_count(), 1, "only the host's hand is masked");
        assert!(view.seats[Seat::Away].monster_zone[0].visible().is_some());
    }

    #[test]
    fn test_custom_label() {
        let projector = ViewProjector::new(ViewPolicy {
            hidden_label: "x".to_string(),
        });
        let view = projector.project(&board(), Viewer::Spectator);
        let ViewCard::Hidden(hidden) = &view.seats[Seat::Host].hand[0] else {
            panic!("spectators cannot see hands");
        };
        assert_eq!(hidden.opaque_id, "x-host-hand-0");
        assert_eq!(hidden.slot, None);
    }

    #[test]
    fn test_hidden_serialization_has_no_identity() {
        let view = project(&board(), Viewer::Seat(Seat::Host));
        let json = serde_json::to_string(&view.seats[Seat::Away].hand).unwrap();
        assert!(!json.contains("Raigeki"));
        assert!(json.contains("display_as_unknown"));
    }
}
