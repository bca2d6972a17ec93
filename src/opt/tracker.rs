//! Once-per-turn usage ledger.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CardEffectId, GameId, InstanceId};

/// Key of one usage record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptKey {
    pub game: GameId,
    pub card: InstanceId,
    pub effect: CardEffectId,
    pub turn: u32,
}

/// One usage record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptRecord {
    pub used_this_turn: bool,
}

/// Tracks which card effects were used in which turn.
///
/// Limits are per `(card, effect)` pair: a card with two effects can use
/// each once. Call [`reset_for_turn`](Self::reset_for_turn) at every turn
/// boundary before checking activations, or last turn's records leak.
///
/// ```
/// use duel_rules::core::{CardEffectId, GameId, InstanceId};
/// use duel_rules::opt::OncePerTurnTracker;
///
/// let mut opt = OncePerTurnTracker::new();
/// let (game, card, effect) = (GameId(1), InstanceId(7), CardEffectId(0));
///
/// assert!(opt.can_activate(game, card, effect, 3));
/// opt.mark_used(game, card, effect, 3);
/// assert!(!opt.can_activate(game, card, effect, 3));
///
/// opt.reset_for_turn(game, 4);
/// assert!(opt.can_activate(game, card, effect, 4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OncePerTurnTracker {
    records: FxHashMap<OptKey, OptRecord>,
}

impl OncePerTurnTracker {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True unless the exact key was marked used.
    #[must_use]
    pub fn can_activate(&self, game: GameId, card: InstanceId, effect: CardEffectId, turn: u32) -> bool {
        let key = OptKey { game, card, effect, turn };
        !self.records.get(&key).is_some_and(|r| r.used_this_turn)
    }

    /// Record a use.
    pub fn mark_used(&mut self, game: GameId, card: InstanceId, effect: CardEffectId, turn: u32) {
        let key = OptKey { game, card, effect, turn };
        self.records.entry(key).or_default().used_this_turn = true;
        debug!(game = %game, card = %card, effect = %effect, turn, "once-per-turn effect used");
    }

    /// Clear a use so the effect can be activated again this turn.
    pub fn reset(&mut self, game: GameId, card: InstanceId, effect: CardEffectId, turn: u32) -> bool {
        let key = OptKey { game, card, effect, turn };
        self.records.remove(&key).is_some()
    }

    /// Purge records from turns before `current_turn`. Returns the count.
    pub fn reset_for_turn(&mut self, game: GameId, current_turn: u32) -> usize {
        let before = self.records.len();
        self.records
            .retain(|key, _| key.game != game || key.turn >= current_turn);
        let purged = before - self.records.len();
        trace!(game = %game, turn = current_turn, purged, "once-per-turn records purged");
        purged
    }

    /// Drop every record of a game. Returns the count.
    pub fn clear_game(&mut self, game: GameId) -> usize {
        let before = self.records.len();
        self.records.retain(|key, _| key.game != game);
        before - self.records.len()
    }

    /// Number of live records for a game.
    #[must_use]
    pub fn records_for(&self, game: GameId) -> usize {
        self.records.keys().filter(|k| k.game == game).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: GameId = GameId(1);
    const CARD: InstanceId = InstanceId(10);

    #[test]
    fn test_unused_can_activate() {
        let opt = OncePerTurnTracker::new();
        assert!(opt.can_activate(GAME, CARD, CardEffectId(0), 1));
    }

    #[test]
    fn test_effects_tracked_separately() {
        let mut opt = OncePerTurnTracker::new();
        opt.mark_used(GAME, CARD, CardEffectId(0), 1);

        assert!(!opt.can_activate(GAME, CARD, CardEffectId(0), 1));
        assert!(opt.can_activate(GAME, CARD, CardEffectId(1), 1));
        assert!(opt.can_activate(GAME, InstanceId(11), CardEffectId(0), 1));
        assert!(opt.can_activate(GameId(2), CARD, CardEffectId(0), 1));
    }

    #[test]
    fn test_mark_used_twice_keeps_one_record() {
        let mut opt = OncePerTurnTracker::new();
        opt.mark_used(GAME, CARD, CardEffectId(0), 1);
        opt.mark_used(GAME, CARD, CardEffectId(0), 1);
        assert_eq!(opt.records_for(GAME), 1);
    }

    #[test]
    fn test_reset_for_turn_purges_old_records_only() {
        let mut opt = OncePerTurnTracker::new();
        opt.mark_used(GAME, CARD, CardEffectId(0), 1);
        opt.mark_used(GAME, CARD, CardEffectId(1), 2);
        opt.mark_used(GameId(2), CARD, CardEffectId(0), 1);

        assert_eq!(opt.reset_for_turn(GAME, 2), 1);
        assert_eq!(opt.reset_for_turn(GAME, 2), 0);
        assert!(!opt.can_activate(GAME, CARD, CardEffectId(1), 2));
        assert_eq!(opt.records_for(GameId(2)), 1);
    }

    #[test]
    fn test_explicit_reset() {
        let mut opt = OncePerTurnTracker::new();
        opt.mark_used(GAME, CARD, CardEffectId(0), 1);
        assert!(opt.reset(GAME, CARD, CardEffectId(0), 1));
        assert!(opt.can_activate(GAME, CARD, CardEffectId(0), 1));
        assert!(!opt.reset(GAME, CARD, CardEffectId(0), 1));
    }

    #[test]
    fn test_clear_game() {
        let mut opt = OncePerTurnTracker::new();
        opt.mark_used(GAME, CARD, CardEffectId(0), 1);
        opt.mark_used(GAME, CARD, CardEffectId(1), 1);
        assert_eq!(opt.clear_game(GAME), 2);
        assert_eq!(opt.records_for(GAME), 0);
    }
}
