//! Effect executors - effect-type-specific handlers run during resolution.
//!
//! Each executor receives the mutable game state, the effect store, the
//! acting seat and the [`ParsedEffect`] being resolved, and reports an
//! [`ExecutionResult`]. Rule failures (bad target, pick outside the pool)
//! are `success: false` results, not errors.
//!
//! Executors never touch once-per-turn records or the chain. Legality
//! bookkeeping stays in one layer ([`Duel`](crate::rules::Duel) and
//! [`ChainStack`](crate::stack::ChainStack)).
//!
//! ## Built-in executors
//!
//! | Key         | Executor               |
//! |-------------|------------------------|
//! | `search`    | [`SearchExecutor`]     |
//! | `negate`    | [`NegateExecutor`]     |
//! | `modifyATK` | [`ModifyStatExecutor`] |
//! | `modifyDEF` | [`ModifyStatExecutor`] |
//! | `destroy`   | [`DestroyExecutor`]    |
//! | `draw`      | [`DrawExecutor`]       |

mod destroy;
mod draw;
mod modify_stat;
mod negate;
mod registry;
mod search;

pub use destroy::DestroyExecutor;
pub use draw::DrawExecutor;
pub use modify_stat::ModifyStatExecutor;
pub use negate::{NegateExecutor, NegationKind};
pub use registry::ExecutorRegistry;
pub use search::SearchExecutor;

use serde::{Deserialize, Serialize};

use crate::core::{EffectId, GameId, GameState, InstanceId, RulesConfig, Seat};
use crate::effects::{EffectStore, ParsedEffect};
use crate::zones::ZoneKind;

/// Everything an executor may read or write while resolving one effect.
pub struct ExecutionContext<'a> {
    /// Game being resolved.
    pub game: GameId,

    /// Authoritative state (patched in place).
    pub state: &'a mut GameState,

    /// Active effects of all games; executors only touch `game`'s records.
    pub effects: &'a mut EffectStore,

    /// Rules configuration.
    pub config: &'a RulesConfig,

    /// Seat resolving the effect.
    pub player: Seat,

    /// Card whose effect this is.
    pub source: InstanceId,

    /// Card targets, already checked to still exist.
    pub targets: &'a [InstanceId],
}

/// Extra data an executor reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPayload {
    #[default]
    None,

    /// Cards the player may choose from.
    Candidates(Vec<InstanceId>),

    /// A card changed zones.
    Moved {
        card: InstanceId,
        from: ZoneKind,
        to: ZoneKind,
    },

    /// The targeted activation or effect is negated.
    Negated {
        kind: NegationKind,
        target: InstanceId,
    },

    /// Effects registered in the store.
    EffectsApplied(Vec<EffectId>),

    /// Cards sent from the field to the graveyard.
    Destroyed(Vec<InstanceId>),

    /// Cards drawn.
    Drawn(Vec<InstanceId>),
}

/// Outcome of running an executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub payload: ExecutionPayload,
}

impl ExecutionResult {
    /// A successful result.
    pub fn ok(message: impl Into<String>, payload: ExecutionPayload) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload,
        }
    }

    /// A failed result with a human-readable reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: ExecutionPayload::None,
        }
    }
}

/// Handler for one effect type.
///
/// Implementations must be shareable across games resolved in parallel.
pub trait EffectExecutor: Send + Sync {
    /// Resolve `effect` for `ctx.player`.
    fn execute(&self, ctx: &mut ExecutionContext<'_>, effect: &ParsedEffect) -> ExecutionResult;
}
