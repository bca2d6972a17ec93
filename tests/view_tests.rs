//! View projection integration tests.
//!
//! These tests verify that projected views never leak hidden cards and
//! that projecting leaves the authoritative state alone.

use duel_rules::cards::{CardInstance, Stats};
use duel_rules::core::{GameId, GameState, GameTable, InstanceId, RulesConfig, Seat, Viewer};
use duel_rules::rules::Duel;
use duel_rules::view::{project, ViewCard};
use duel_rules::zones::ZoneKind;

const GAME: GameId = GameId(1);

fn board() -> GameState {
    let mut state = GameState::new(GAME);
    for (i, seat) in [(1, Seat::Host), (2, Seat::Host), (3, Seat::Away), (4, Seat::Away), (5, Seat::Away)] {
        state.put_card(seat, ZoneKind::Hand, CardInstance::spell(InstanceId(i), i, format!("Spell {i}"), seat));
    }
    for i in 10..15 {
        state.put_card(Seat::Away, ZoneKind::Deck, CardInstance::spell(InstanceId(i), i, "Filler", Seat::Away));
        state.put_card(Seat::Host, ZoneKind::Deck, CardInstance::spell(InstanceId(i + 10), i, "Filler", Seat::Host));
    }
    state.put_card(
        Seat::Host,
        ZoneKind::MonsterZone,
        CardInstance::monster(InstanceId(30), 30, "Knight", Seat::Host, Stats::new(1800, 1000)),
    );
    state.put_card(Seat::Away, ZoneKind::Graveyard, CardInstance::trap(InstanceId(31), 31, "Spent", Seat::Away));
    state
}

fn ids(cards: &[ViewCard]) -> Vec<InstanceId> {
    cards.iter().filter_map(|c| c.visible().map(|card| card.instance_id)).collect()
}

// =============================================================================
// Hidden Zones
// =============================================================================

/// The host view contains none of the away hand's instance IDs.
#[test]
fn test_host_cannot_see_away_hand() {
    let state = board();
    let view = project(&state, Viewer::Seat(Seat::Host));

    let visible = view.visible_ids();
    for away_card in state.zone(Seat::Away, ZoneKind::Hand) {
        assert!(!visible.contains(&away_card.instance_id));
    }
    assert_eq!(view.seats[Seat::Away].hand.len(), 3, "hand size is preserved");

    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("Spell 3"));
}

/// The host's own hand and deck are unchanged.
#[test]
fn test_host_sees_own_hand() {
    let state = board();
    let view = project(&state, Viewer::Seat(Seat::Host));

    assert_eq!(ids(&view.seats[Seat::Host].hand), vec![InstanceId(1), InstanceId(2)]);
    assert_eq!(ids(&view.seats[Seat::Host].deck).len(), 5);
}

/// Spectators see neither hand.
#[test]
fn test_spectator_hides_both_hands() {
    let view = project(&board(), Viewer::Spectator);

    for seat in Seat::all() {
        assert!(view.seats[seat].hand.iter().all(ViewCard::is_hidden));
        assert!(view.seats[seat].deck.iter().all(ViewCard::is_hidden));
    }
    assert_eq!(ids(&view.seats[Seat::Host].monster_zone), vec![InstanceId(30)]);
    assert_eq!(ids(&view.seats[Seat::Away].graveyard), vec![InstanceId(31)]);
}

// =============================================================================
// Face-Down Cards
// =============================================================================

/// Two face-down traps and a face-up spell: two placeholders, one spell.
#[test]
fn test_face_down_backrow_for_spectator() {
    let mut state = GameState::new(GAME);
    state.put_card(Seat::Away, ZoneKind::SpellTrapZone, CardInstance::trap(InstanceId(1), 1, "Hole", Seat::Away).set_face_down());
    state.put_card(Seat::Away, ZoneKind::SpellTrapZone, CardInstance::trap(InstanceId(2), 2, "Wall", Seat::Away).set_face_down());
    state.put_card(Seat::Away, ZoneKind::SpellTrapZone, CardInstance::spell(InstanceId(3), 3, "Field", Seat::Away));

    let view = project(&state, Viewer::Spectator);
    let backrow = &view.seats[Seat::Away].spell_trap_zone;

    assert_eq!(backrow.iter().filter(|c| c.is_hidden()).count(), 2);
    assert_eq!(ids(backrow), vec![InstanceId(3)]);
    for card in backrow {
        if let ViewCard::Hidden(hidden) = card {
            assert!(hidden.display_as_unknown);
            assert!(hidden.slot.is_some());
        }
    }
}

// =============================================================================
// Facade
// =============================================================================

/// Projection through the facade uses the configured label and leaves the state alone.
#[test]
fn test_duel_view_uses_config() {
    let mut table = GameTable::new();
    let state = board();
    table.insert(state.clone());

    let duel = Duel::new(RulesConfig::new().with_hidden_label("back"));
    let view = duel.view(&table, GAME, Viewer::Seat(Seat::Away)).unwrap();

    let ViewCard::Hidden(hidden) = &view.seats[Seat::Host].hand[0] else {
        panic!("away cannot see the host's hand");
    };
    assert!(hidden.opaque_id.starts_with("back-host-hand-"));
    assert_eq!(duel_rules::core::GameRecords::require(&table, GAME).unwrap(), &state);
}
