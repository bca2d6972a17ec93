//! Chain of pending activations and its resolution.
//!
//! Cards activate onto a chain, players answer with faster (or equally
//! fast) responses, and once both players pass in a row the chain
//! resolves last-in, first-out. Priority alternates: only the seat holding
//! it may respond or pass.
//!
//! ## Key Types
//!
//! - [`SpellSpeed`]: 1 normal, 2 quick, 3 counter
//! - [`Activation`]: what a player asks to put on the chain
//! - [`ChainStack`]: the Idle -> Open -> Resolving -> Idle state machine
//!   for every game
//!
//! ## Example
//!
//! ```
//! use duel_rules::core::{CardEffectId, GameId, InstanceId, Seat};
//! use duel_rules::effects::{EffectKind, ParsedEffect};
//! use duel_rules::stack::{Activation, ChainStack, ChainStatus, PriorityOutcome, SpellSpeed};
//!
//! let mut chains = ChainStack::new();
//! let game = GameId(1);
//! let chain = chains.start_chain(game, Seat::Host).unwrap();
//!
//! let draw = Activation::new(InstanceId(4), Seat::Host, CardEffectId(0), ParsedEffect::new(EffectKind::Draw));
//! chains.add_to_chain(chain, draw).unwrap();
//!
//! // Priority is with the away seat, which declines to respond.
//! assert_eq!(chains.pass_priority(chain, Seat::Away).unwrap(), PriorityOutcome::Waiting(Seat::Host));
//! assert_eq!(chains.pass_priority(chain, Seat::Host).unwrap(), PriorityOutcome::Resolving);
//! assert_eq!(chains.status(game), ChainStatus::Resolving);
//! ```

mod chain;

pub use chain::{
    Activation, Chain, ChainLink, ChainResolution, ChainStack, ChainStatus, LinkOutcome,
    LinkStatus, LinkTarget, LinkTargets, PriorityOutcome, ResolveContext,
};

use serde::{Deserialize, Serialize};

use crate::core::RulesError;

/// How fast an activation is. Responses must be at least as fast as the
/// link they answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellSpeed {
    #[default]
    Normal = 1,
    Quick = 2,
    Counter = 3,
}

impl SpellSpeed {
    /// Numeric speed (1, 2 or 3).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// May an activation of this speed be chained onto a link of `top` speed?
    #[must_use]
    pub fn can_respond_to(self, top: SpellSpeed) -> bool {
        self >= top
    }
}

impl std::fmt::Display for SpellSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u8> for SpellSpeed {
    type Error = RulesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SpellSpeed::Normal),
            2 => Ok(SpellSpeed::Quick),
            3 => Ok(SpellSpeed::Counter),
            other => Err(RulesError::Parse(format!("spell speed must be 1, 2 or 3, got {other}"))),
        }
    }
}
