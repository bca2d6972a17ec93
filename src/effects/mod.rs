//! Effect system for card abilities.
//!
//! - [`ActiveEffect`]: an effect in force (modifier, continuous buff,
//!   registered trigger) with its duration and lifecycle anchors
//! - [`EffectStore`]: the per-game collection of active effects
//! - [`ParsedEffect`]: the descriptor a chain link hands to an executor
//! - [`effective_stats`]: folding modifiers onto base stats

pub mod effect;
pub mod parsed;
pub mod stats;
pub mod store;

pub use effect::{
    ActiveEffect, Duration, EffectData, EffectTargets, EffectType, NewEffect, TriggerData,
    TRIGGER_PREFIX,
};
pub use parsed::{EffectKind, ParsedEffect, TargetType};
pub use stats::effective_stats;
pub use store::EffectStore;
