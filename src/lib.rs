//! # duel-rules
//!
//! Rules-resolution core for a two-seat trading card game.
//!
//! ## Design Principles
//!
//! 1. **State is owned elsewhere**: the authoritative [`GameState`] lives in
//!    the host application and is reached through [`GameRecords`]. The core
//!    keeps only its own bookkeeping (effects, once-per-turn records,
//!    chains), every piece of it scoped by [`GameId`].
//!
//! 2. **No globals**: stores and registries are plain values owned by the
//!    caller. Two [`Duel`]s never share anything.
//!
//! 3. **Rule failures are results, protocol misuse is an error**: a search
//!    pick outside the pool is an unsuccessful [`ExecutionResult`]; adding
//!    to a resolving chain is a [`RulesError`].
//!
//! ## Modules
//!
//! - `core`: IDs, seats, game state, configuration, errors
//! - `zones`: the five per-seat zones
//! - `cards`: card instances and base stats
//! - `effects`: active effects, their store, stat folding
//! - `opt`: once-per-turn limits
//! - `triggers`: event triggers stored as effects
//! - `stack`: chains, spell speed, LIFO resolution
//! - `executors`: effect-type handlers and their registry
//! - `view`: viewer-specific masking
//! - `rules`: the [`Duel`] facade used by a turn controller

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod opt;
pub mod triggers;
pub mod stack;
pub mod executors;
pub mod view;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CardEffectId, ChainId, EffectId, GameId, InstanceId,
    Seat, SeatMap, Viewer,
    GameState, Phase,
    GameRecords, GameTable,
    RulesConfig, SearchPolicy, ViewPolicy,
    Result, RulesError,
};

pub use crate::zones::{SeatZones, ZoneKind, ZonePosition};

pub use crate::cards::{CardInstance, CardKind, Stats};

pub use crate::effects::{
    ActiveEffect, Duration, EffectData, EffectKind, EffectStore, EffectType,
    NewEffect, ParsedEffect, TargetType, TriggerData,
};

pub use crate::opt::OncePerTurnTracker;

pub use crate::triggers::TriggerIndex;

pub use crate::stack::{
    Activation, ChainResolution, ChainStack, ChainStatus, LinkStatus,
    LinkTarget, PriorityOutcome, SpellSpeed,
};

pub use crate::executors::{
    EffectExecutor, ExecutionContext, ExecutionPayload, ExecutionResult,
    ExecutorRegistry,
};

pub use crate::view::{PlayerView, ViewCard, ViewProjector};

pub use crate::rules::{ActivationReceipt, Duel};
