//! Negation.
//!
//! The executor only validates and reports. Marking the targeted chain
//! link as negated is the chain's job, driven by the
//! [`ExecutionPayload::Negated`] this returns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EffectExecutor, ExecutionContext, ExecutionPayload, ExecutionResult};
use crate::effects::ParsedEffect;

/// What a negation cancels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegationKind {
    /// The activation itself (the card is treated as never activated).
    Activation,
    /// Only the effect.
    Effect,
}

impl NegationKind {
    /// Read the kind from printed condition text.
    #[must_use]
    pub fn from_condition(condition: Option<&str>) -> Self {
        match condition {
            Some(text) if text.to_lowercase().contains("activation") => NegationKind::Activation,
            _ => NegationKind::Effect,
        }
    }
}

/// Negation executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NegateExecutor;

impl EffectExecutor for NegateExecutor {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> ExecutionResult {
        let Some(&target) = ctx.targets.first() else {
            return ExecutionResult::failure("negation needs a target");
        };
        let Some((_, _, card)) = ctx.state.find_card(target) else {
            return ExecutionResult::failure(format!("{target} does not exist"));
        };
        if !effect.target_type.matches(card.kind) {
            return ExecutionResult::failure(format!(
                "{target} is a {}, not a {}",
                card.kind, effect.target_type
            ));
        }

        let kind = NegationKind::from_condition(effect.condition.as_deref());
        debug!(game = %ctx.game, source = %ctx.source, target = %target, ?kind, "negation applies");
        ExecutionResult::ok(
            format!("negated {target}"),
            ExecutionPayload::Negated { kind, target },
        )
    }
}
