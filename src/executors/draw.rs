//! Drawing cards from the top of the deck.

use tracing::debug;

use super::{EffectExecutor, ExecutionContext, ExecutionPayload, ExecutionResult};
use crate::effects::ParsedEffect;
use crate::zones::ZoneKind;

/// Draw executor. Draws `target_count` cards (at least one).
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawExecutor;

impl EffectExecutor for DrawExecutor {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> ExecutionResult {
        let count = effect.target_count.max(1) as usize;
        let available = ctx.state.zone(ctx.player, ZoneKind::Deck).len();
        if available < count {
            return ExecutionResult::failure(format!("cannot draw {count} from a deck of {available}"));
        }

        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(top) = ctx.state.zones[ctx.player].top(ZoneKind::Deck).map(|c| c.instance_id) else {
                break;
            };
            ctx.state.move_card(top, ctx.player, ZoneKind::Hand);
            drawn.push(top);
        }

        debug!(game = %ctx.game, seat = %ctx.player, drawn = drawn.len(), "cards drawn");
        ExecutionResult::ok(format!("drew {} card(s)", drawn.len()), ExecutionPayload::Drawn(drawn))
    }
}
