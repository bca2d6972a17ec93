//! Error taxonomy for the rules core.
//!
//! Only protocol violations and caller bugs are errors. Game-rule
//! failures inside an effect (bad target, search pick outside the pool)
//! are reported through [`ExecutionResult`](crate::executors::ExecutionResult)
//! so one invalid link never aborts a whole chain.

use thiserror::Error;

use super::ids::{CardEffectId, InstanceId};
use crate::stack::SpellSpeed;

/// Errors returned by the rules core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A record addressed by ID does not exist.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    /// The operation is not legal in the current state (chain protocol misuse).
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A target is not acceptable for the operation.
    #[error("illegal target: {0}")]
    IllegalTarget(String),

    /// A response was slower than the link it tried to chain onto.
    #[error("spell speed {attempted} cannot respond to spell speed {required}")]
    SpellSpeedTooLow {
        attempted: SpellSpeed,
        required: SpellSpeed,
    },

    /// A turn- or phase-relative duration was given without its anchor.
    #[error("duration `{duration}` requires an applied {anchor}")]
    MissingAnchor {
        duration: String,
        anchor: &'static str,
    },

    /// A duration value is out of range (e.g. `turns:0`).
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// No executor is registered for the effect type.
    #[error("no executor registered for effect type `{0}`")]
    UnknownEffectType(String),

    /// The once-per-turn limit for this card effect is used up.
    #[error("{effect} of {card} was already used on turn {turn}")]
    OncePerTurnExhausted {
        card: InstanceId,
        effect: CardEffectId,
        turn: u32,
    },

    /// A string could not be parsed into a rules value.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

impl RulesError {
    /// Shorthand for a [`RulesError::NotFound`].
    pub fn not_found(what: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            what,
            id: id.to_string(),
        }
    }
}

impl From<toml::de::Error> for RulesError {
    fn from(value: toml::de::Error) -> Self {
        Self::Config(value.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RulesError::not_found("chain", "Chain(4)");
        assert_eq!(err.to_string(), "chain Chain(4) not found");

        let err = RulesError::SpellSpeedTooLow {
            attempted: SpellSpeed::Normal,
            required: SpellSpeed::Quick,
        };
        assert_eq!(err.to_string(), "spell speed 1 cannot respond to spell speed 2");

        let err = RulesError::OncePerTurnExhausted {
            card: InstanceId(3),
            effect: CardEffectId(1),
            turn: 2,
        };
        assert_eq!(err.to_string(), "effect 1 of Card#3 was already used on turn 2");
    }
}
