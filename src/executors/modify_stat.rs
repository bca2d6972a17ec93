//! Attack/defense modification.
//!
//! Registers one `modifyATK` or `modifyDEF` record per monster target on
//! the field. The record's lifetime comes from the parsed effect and is
//! anchored at the current turn and phase.

use super::{EffectExecutor, ExecutionContext, ExecutionPayload, ExecutionResult};
use crate::cards::CardKind;
use crate::effects::{EffectData, EffectKind, EffectType, NewEffect, ParsedEffect};

/// Stat modification executor (both `modifyATK` and `modifyDEF`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ModifyStatExecutor;

impl EffectExecutor for ModifyStatExecutor {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> ExecutionResult {
        let effect_type = match effect.kind {
            EffectKind::ModifyAttack => EffectType::ModifyAttack,
            EffectKind::ModifyDefense => EffectType::ModifyDefense,
            ref other => return ExecutionResult::failure(format!("`{other}` is not a stat change")),
        };

        let (turn, phase) = (ctx.state.turn_number, ctx.state.phase);
        let mut applied = Vec::new();
        for &target in ctx.targets {
            let on_field_monster = ctx
                .state
                .find_card(target)
                .is_some_and(|(_, zone, card)| zone.is_field() && card.kind == CardKind::Monster);
            if !on_field_monster {
                continue;
            }

            let request = NewEffect::new(
                ctx.source,
                effect_type.clone(),
                EffectData::StatDelta {
                    amount: effect.amount,
                },
            )
            .targeting([target])
            .lasting(effect.duration)
            .applied_at(turn, phase);

            match ctx.effects.activate(ctx.game, request) {
                Ok(id) => applied.push(id),
                Err(err) => return ExecutionResult::failure(err.to_string()),
            }
        }

        if applied.is_empty() {
            return ExecutionResult::failure("no monster on the field to modify");
        }
        ExecutionResult::ok(
            format!("{effect_type} {:+} on {} monster(s)", effect.amount, applied.len()),
            ExecutionPayload::EffectsApplied(applied),
        )
    }
}
