//! Once-per-turn (OPT) activation limits.
//!
//! A ledger of `(game, card, effect, turn)` usage records. The ledger is
//! separate from chain bookkeeping: it answers "may this effect activate"
//! and records that it did, nothing more.

mod tracker;

pub use tracker::{OncePerTurnTracker, OptKey, OptRecord};
