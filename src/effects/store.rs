//! Effect store - the durable collection of active effects.
//!
//! Records are keyed by [`EffectId`] and indexed by game. IDs are
//! allocated monotonically and every listing walks the per-game index in
//! insertion order, so modifier folding is deterministic.
//!
//! The store never schedules itself: callers run
//! [`sweep_expired`](EffectStore::sweep_expired) at every phase transition
//! and at end of turn.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::effect::{ActiveEffect, NewEffect};
use crate::core::{EffectId, GameId, InstanceId, Phase, Result};

/// Durable collection of active effect records, scoped by game.
#[derive(Clone, Debug, Default)]
pub struct EffectStore {
    /// All records, ordered by ID (= insertion order).
    effects: BTreeMap<EffectId, ActiveEffect>,

    /// Index by game, in insertion order.
    by_game: FxHashMap<GameId, Vec<EffectId>>,

    /// Next effect ID to allocate.
    next_id: u64,
}

impl EffectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new active effect and return its ID.
    ///
    /// The only validation is that turn/phase-relative durations carry
    /// their anchors. Anchors given for permanent effects are dropped.
    pub fn activate(&mut self, game: GameId, effect: NewEffect) -> Result<EffectId> {
        effect.validate()?;

        self.next_id += 1;
        let id = EffectId::new(self.next_id);

        let permanent = !effect.duration.needs_turn();
        let record = ActiveEffect {
            id,
            game,
            source: effect.source,
            effect_type: effect.effect_type,
            targets: effect.targets,
            duration: effect.duration,
            data: effect.data,
            applied_turn: if permanent { None } else { effect.applied_turn },
            applied_phase: if permanent { None } else { effect.applied_phase },
        };

        debug!(
            game = %game,
            effect = %id,
            source = %record.source,
            effect_type = %record.effect_type,
            duration = %record.duration,
            "effect activated"
        );

        self.by_game.entry(game).or_default().push(id);
        self.effects.insert(id, record);
        Ok(id)
    }

    /// Get an effect by ID.
    #[must_use]
    pub fn get(&self, id: EffectId) -> Option<&ActiveEffect> {
        self.effects.get(&id)
    }

    /// All active effects of a game, in insertion order.
    pub fn list_active(&self, game: GameId) -> Vec<&ActiveEffect> {
        self.iter_game(game).collect()
    }

    /// Active effects created by one source card.
    pub fn list_for_source(&self, game: GameId, source: InstanceId) -> Vec<&ActiveEffect> {
        self.iter_game(game).filter(|e| e.source == source).collect()
    }

    /// Stat-modifying effects, optionally only those targeting `target`.
    ///
    /// Returned in insertion order, which is the order they are folded in.
    pub fn list_modifiers(&self, game: GameId, target: Option<InstanceId>) -> Vec<&ActiveEffect> {
        self.iter_game(game)
            .filter(|e| e.effect_type.is_modifier())
            .filter(|e| target.is_none_or(|card| e.affects(card)))
            .collect()
    }

    /// Remove an effect. Unknown IDs are a no-op so retries are safe.
    pub fn remove(&mut self, id: EffectId) -> Option<ActiveEffect> {
        let record = self.effects.remove(&id)?;
        self.unindex(record.game, &[id]);
        debug!(game = %record.game, effect = %id, "effect removed");
        Some(record)
    }

    /// Remove every effect a source card created. Returns the count.
    pub fn remove_for_source(&mut self, game: GameId, source: InstanceId) -> usize {
        self.remove_where(game, |e| e.source == source)
    }

    /// Drop `card` from every effect's targets.
    ///
    /// Modifiers left with no targets are removed. Returns how many
    /// records were removed.
    pub fn detach_target(&mut self, game: GameId, card: InstanceId) -> usize {
        let ids: Vec<EffectId> = self
            .iter_game(game)
            .filter(|e| e.affects(card))
            .map(|e| e.id)
            .collect();

        for id in &ids {
            if let Some(record) = self.effects.get_mut(id) {
                record.targets.retain(|t| *t != card);
            }
        }

        self.remove_where(game, |e| {
            ids.contains(&e.id) && e.targets.is_empty() && e.effect_type.is_modifier()
        })
    }

    /// Remove every effect whose expiry rule holds. Returns the count.
    ///
    /// Idempotent: a second call with the same turn and phase removes nothing.
    pub fn sweep_expired(&mut self, game: GameId, current_turn: u32, current_phase: Phase) -> usize {
        let removed = self.remove_where(game, |e| e.is_expired(current_turn, current_phase));
        trace!(game = %game, turn = current_turn, phase = %current_phase, removed, "expiry sweep");
        removed
    }

    /// Remove every effect of a game. Returns the count.
    pub fn remove_all(&mut self, game: GameId) -> usize {
        let Some(ids) = self.by_game.remove(&game) else {
            return 0;
        };
        for id in &ids {
            self.effects.remove(id);
        }
        debug!(game = %game, removed = ids.len(), "game effects torn down");
        ids.len()
    }

    /// Remove every effect of a game matching a predicate. Returns the count.
    pub(crate) fn remove_where(
        &mut self,
        game: GameId,
        predicate: impl Fn(&ActiveEffect) -> bool,
    ) -> usize {
        let doomed: Vec<EffectId> = self
            .iter_game(game)
            .filter(|e| predicate(e))
            .map(|e| e.id)
            .collect();

        for id in &doomed {
            if let Some(record) = self.effects.remove(id) {
                debug!(game = %game, effect = %id, effect_type = %record.effect_type, "effect removed");
            }
        }
        self.unindex(game, &doomed);
        doomed.len()
    }

    /// Number of effects across all games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Is the store empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn iter_game(&self, game: GameId) -> impl Iterator<Item = &ActiveEffect> + '_ {
        self.by_game
            .get(&game)
            .into_iter()
            .flatten()
            .filter_map(|id| self.effects.get(id))
    }

    fn unindex(&mut self, game: GameId, ids: &[EffectId]) {
        if ids.is_empty() {
            return;
        }
        if let Some(list) = self.by_game.get_mut(&game) {
            list.retain(|id| !ids.contains(id));
            if list.is_empty() {
                self.by_game.remove(&game);
            }
        }
    }
}
