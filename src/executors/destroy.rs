//! Destruction: send field cards to their owners' graveyards.

use tracing::debug;

use super::{EffectExecutor, ExecutionContext, ExecutionPayload, ExecutionResult};
use crate::effects::ParsedEffect;

/// Destroy executor.
///
/// A destroyed card loses every effect it created, and stops being a
/// target of other cards' effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct DestroyExecutor;

impl EffectExecutor for DestroyExecutor {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> ExecutionResult {
        let mut destroyed = Vec::new();
        for &target in ctx.targets {
            let eligible = ctx
                .state
                .find_card(target)
                .is_some_and(|(_, zone, card)| zone.is_field() && effect.target_type.matches(card.kind));
            if !eligible || ctx.state.send_to_graveyard(target).is_none() {
                continue;
            }

            let cleared = ctx.effects.remove_for_source(ctx.game, target)
                + ctx.effects.detach_target(ctx.game, target);
            debug!(game = %ctx.game, card = %target, cleared, "card destroyed");
            destroyed.push(target);
        }

        if destroyed.is_empty() {
            return ExecutionResult::failure("nothing on the field to destroy");
        }
        ExecutionResult::ok(
            format!("destroyed {} card(s)", destroyed.len()),
            ExecutionPayload::Destroyed(destroyed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardInstance, Stats};
    use crate::core::{GameId, GameState, InstanceId, RulesConfig, Seat};
    use crate::effects::{EffectData, EffectKind, EffectStore, EffectType, NewEffect, TargetType};
    use crate::zones::ZoneKind;

    const GAME: GameId = GameId(1);

    #[test]
    fn test_destroy_clears_effects() {
        let mut state = GameState::new(GAME);
        state.put_card(
            Seat::Away,
            ZoneKind::MonsterZone,
            CardInstance::monster(InstanceId(5), 5, "Ogre", Seat::Away, Stats::new(2000, 0)),
        );
        state.put_card(Seat::Away, ZoneKind::SpellTrapZone, CardInstance::spell(InstanceId(6), 6, "Axe", Seat::Away));

        let mut effects = EffectStore::new();
        effects
            .activate(
                GAME,
                NewEffect::new(InstanceId(6), EffectType::ContinuousBuff, EffectData::Buff { attack: 500, defense: 0 })
                    .targeting([InstanceId(5)]),
            )
            .unwrap();
        effects
            .activate(GAME, NewEffect::new(InstanceId(5), EffectType::trigger("battle"), EffectData::opaque()))
            .unwrap();

        let config = RulesConfig::default();
        let mut ctx = ExecutionContext {
            game: GAME,
            state: &mut state,
            effects: &mut effects,
            config: &config,
            player: Seat::Host,
            source: InstanceId(1),
            targets: &[InstanceId(5)],
        };
        let effect = ParsedEffect::new(EffectKind::Destroy).with_target(TargetType::Monster, 1);
        let result = DestroyExecutor.execute(&mut ctx, &effect);

        assert_eq!(result.payload, ExecutionPayload::Destroyed(vec![InstanceId(5)]));
        assert_eq!(state.find_card(InstanceId(5)).unwrap().1, ZoneKind::Graveyard);
        assert!(effects.list_active(GAME).is_empty());
    }

    #[test]
    fn test_destroy_respects_target_type() {
        let mut state = GameState::new(GAME);
        state.put_card(Seat::Away, ZoneKind::SpellTrapZone, CardInstance::trap(InstanceId(7), 7, "Hole", Seat::Away));
        let mut effects = EffectStore::new();
        let config = RulesConfig::default();
        let mut ctx = ExecutionContext {
            game: GAME,
            state: &mut state,
            effects: &mut effects,
            config: &config,
            player: Seat::Host,
            source: InstanceId(1),
            targets: &[InstanceId(7)],
        };
        let effect = ParsedEffect::new(EffectKind::Destroy).with_target(TargetType::Spell, 1);

        assert!(!DestroyExecutor.execute(&mut ctx, &effect).success);
        assert!(state.is_on_field(InstanceId(7)));
    }
}
