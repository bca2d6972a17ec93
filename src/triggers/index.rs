//! Trigger registration and lookup over the effect store.

use tracing::debug;

use crate::core::{EffectId, GameId, GameState, InstanceId, Result, RulesError};
use crate::effects::{ActiveEffect, EffectData, EffectStore, EffectType, NewEffect, TriggerData};
use crate::stack::Activation;

/// Trigger operations. Stateless; all records live in the [`EffectStore`].
pub struct TriggerIndex;

impl TriggerIndex {
    /// Register a trigger of `source` on `event`. Event names may not be empty.
    pub fn register(
        store: &mut EffectStore,
        game: GameId,
        source: InstanceId,
        event: &str,
        data: TriggerData,
    ) -> Result<EffectId> {
        if event.is_empty() {
            return Err(RulesError::Parse("trigger without event name".to_string()));
        }
        let id = store.activate(
            game,
            NewEffect::new(source, EffectType::trigger(event), EffectData::Trigger(data)),
        )?;
        debug!(game = %game, card = %source, event, effect = %id, "trigger registered");
        Ok(id)
    }

    /// Triggers listening for `event`, in registration order.
    pub fn find_triggered<'a>(store: &'a EffectStore, game: GameId, event: &str) -> Vec<&'a ActiveEffect> {
        store
            .list_active(game)
            .into_iter()
            .filter(|e| matches!(&e.effect_type, EffectType::Trigger(name) if name == event))
            .collect()
    }

    /// Remove a card's triggers, leaving its other effects alone.
    pub fn clear_for_card(store: &mut EffectStore, game: GameId, source: InstanceId) -> usize {
        store.remove_where(game, |e| e.source == source && e.effect_type.is_trigger())
    }

    /// Remove every trigger of a game.
    pub fn clear_for_game(store: &mut EffectStore, game: GameId) -> usize {
        store.remove_where(game, |e| e.effect_type.is_trigger())
    }

    /// Chain activations offered by triggers on `event`.
    ///
    /// Each activation is controlled by the source card's owner and carries
    /// the trigger's `optional` flag. Triggers whose source card no longer
    /// exists are skipped.
    pub fn candidate_activations(
        store: &EffectStore,
        state: &GameState,
        event: &str,
    ) -> Vec<Activation> {
        Self::find_triggered(store, state.game, event)
            .into_iter()
            .filter_map(|effect| {
                let data = effect.trigger_data()?;
                let (_, _, card) = state.find_card(effect.source)?;
                let activation = Activation::new(effect.source, card.owner, data.effect_id, data.callback.clone())
                    .with_speed(data.spell_speed);
                Some(if data.optional { activation.optional() } else { activation })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardInstance;
    use crate::core::{CardEffectId, Seat};
    use crate::effects::{EffectKind, ParsedEffect};
    use crate::stack::SpellSpeed;
    use crate::zones::ZoneKind;

    const GAME: GameId = GameId(1);

    fn draw() -> TriggerData {
        TriggerData::new(ParsedEffect::new(EffectKind::Draw))
    }

    #[test]
    fn test_register_stores_permanent_trigger() {
        let mut store = EffectStore::new();
        let id = TriggerIndex::register(&mut store, GAME, InstanceId(1), "summon", draw()).unwrap();

        let effect = store.get(id).unwrap();
        assert_eq!(effect.effect_type.to_string(), "trigger:summon");
        assert_eq!(effect.applied_turn, None);
        assert!(effect.trigger_data().is_some());
    }

    #[test]
    fn test_find_is_exact_match() {
        let mut store = EffectStore::new();
        TriggerIndex::register(&mut store, GAME, InstanceId(1), "summon", draw()).unwrap();
        TriggerIndex::register(&mut store, GAME, InstanceId(2), "summon_special", draw()).unwrap();

        let found = TriggerIndex::find_triggered(&store, GAME, "summon");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, InstanceId(1));
    }

    #[test]
    fn test_clear_for_card_keeps_other_effects() {
        let mut store = EffectStore::new();
        TriggerIndex::register(&mut store, GAME, InstanceId(1), "summon", draw()).unwrap();
        store
            .activate(
                GAME,
                NewEffect::new(InstanceId(1), EffectType::ModifyAttack, EffectData::StatDelta { amount: 100 })
                    .targeting([InstanceId(1)]),
            )
            .unwrap();

        assert_eq!(TriggerIndex::clear_for_card(&mut store, GAME, InstanceId(1)), 1);
        assert_eq!(store.list_active(GAME).len(), 1);
        assert_eq!(TriggerIndex::clear_for_game(&mut store, GAME), 0);
    }

    #[test]
    fn test_candidate_activations() {
        let mut state = GameState::new(GAME);
        state.put_card(Seat::Away, ZoneKind::Graveyard, CardInstance::trap(InstanceId(7), 7, "Spirit", Seat::Away));

        let mut store = EffectStore::new();
        let data = draw().for_effect(CardEffectId(1)).with_speed(SpellSpeed::Quick).optional();
        TriggerIndex::register(&mut store, GAME, InstanceId(7), "destroyed", data).unwrap();
        TriggerIndex::register(&mut store, GAME, InstanceId(99), "destroyed", draw()).unwrap();

        let candidates = TriggerIndex::candidate_activations(&store, &state, "destroyed");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].player, Seat::Away);
        assert_eq!(candidates[0].effect_id, CardEffectId(1));
        assert_eq!(candidates[0].spell_speed, SpellSpeed::Quick);
        assert!(candidates[0].optional);
    }

    #[test]
    fn test_mandatory_trigger_is_not_optional() {
        let mut state = GameState::new(GAME);
        state.put_card(Seat::Host, ZoneKind::Hand, CardInstance::spell(InstanceId(3), 3, "Pot", Seat::Host));

        let mut store = EffectStore::new();
        TriggerIndex::register(&mut store, GAME, InstanceId(3), "drawn", draw()).unwrap();

        let candidates = TriggerIndex::candidate_activations(&store, &state, "drawn");
        assert!(!candidates[0].optional);
    }

    #[test]
    fn test_empty_event_rejected() {
        let mut store = EffectStore::new();
        let err = TriggerIndex::register(&mut store, GAME, InstanceId(1), "", draw()).unwrap_err();
        assert!(matches!(err, RulesError::Parse(_)));
        assert!(store.is_empty());
    }
}
