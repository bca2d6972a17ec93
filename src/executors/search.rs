//! Search: pick a card from the deck and add it to the hand.
//!
//! Two steps. Without a selection the executor reports the candidate pool
//! (filtered by card type and archetype, capped by
//! [`SearchPolicy`](crate::core::SearchPolicy)). With a selection it checks
//! the pick against that same pool and moves exactly that card.

use tracing::debug;

use super::{EffectExecutor, ExecutionContext, ExecutionPayload, ExecutionResult};
use crate::core::{GameState, InstanceId, SearchPolicy, Seat};
use crate::effects::ParsedEffect;
use crate::zones::ZoneKind;

/// Deck search executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchExecutor;

impl SearchExecutor {
    /// Deck cards `player` may pick, top of the deck first.
    #[must_use]
    pub fn candidates(
        state: &GameState,
        player: Seat,
        effect: &ParsedEffect,
        policy: &SearchPolicy,
    ) -> Vec<InstanceId> {
        state
            .zone(player, ZoneKind::Deck)
            .iter()
            .rev()
            .filter(|card| effect.target_type.matches(card.kind))
            .filter(|card| {
                effect
                    .archetype
                    .as_deref()
                    .is_none_or(|a| card.matches_archetype(a))
            })
            .map(|card| card.instance_id)
            .take(policy.pool_size(effect.target_count))
            .collect()
    }

    /// Move `chosen` from deck to hand if it is in the candidate pool.
    pub fn select(
        state: &mut GameState,
        player: Seat,
        effect: &ParsedEffect,
        policy: &SearchPolicy,
        chosen: InstanceId,
    ) -> ExecutionResult {
        let pool = Self::candidates(state, player, effect, policy);
        if !pool.contains(&chosen) {
            return ExecutionResult::failure(format!(
                "{chosen} is not among the {} searchable cards",
                pool.len()
            ));
        }

        match state.move_card(chosen, player, ZoneKind::Hand) {
            Some(from) => {
                debug!(game = %state.game, seat = %player, card = %chosen, "searched card added to hand");
                ExecutionResult::ok(
                    format!("added {chosen} to hand"),
                    ExecutionPayload::Moved {
                        card: chosen,
                        from,
                        to: ZoneKind::Hand,
                    },
                )
            }
            None => ExecutionResult::failure(format!("{chosen} is no longer in the deck")),
        }
    }
}

impl EffectExecutor for SearchExecutor {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> ExecutionResult {
        let policy = &ctx.config.search;
        match effect.selection {
            Some(chosen) => Self::select(ctx.state, ctx.player, effect, policy, chosen),
            None => {
                let pool = Self::candidates(ctx.state, ctx.player, effect, policy);
                if pool.is_empty() {
                    return ExecutionResult::failure(format!(
                        "no {} in deck matches the search",
                        effect.target_type
                    ));
                }
                ExecutionResult::ok(
                    format!("choose {} of {} cards", effect.target_count.max(1), pool.len()),
                    ExecutionPayload::Candidates(pool),
                )
            }
        }
    }
}
