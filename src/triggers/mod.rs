//! Triggers: deferred effects that react to named game events.
//!
//! Triggers are not a separate table. Each one is an
//! [`ActiveEffect`](crate::effects::ActiveEffect) of type
//! `trigger:<event>` with a permanent duration, stored in the
//! [`EffectStore`](crate::effects::EffectStore) like any other effect, so
//! clearing a card's or a game's effects clears its triggers too.
//!
//! Events are plain strings chosen by the host ("summon", "destroyed",
//! "battle_damage", ...). Matching is exact.
//!
//! ## Example
//!
//! ```
//! use duel_rules::core::{GameId, InstanceId};
//! use duel_rules::effects::{EffectKind, EffectStore, ParsedEffect, TriggerData};
//! use duel_rules::triggers::TriggerIndex;
//!
//! let mut store = EffectStore::new();
//! let game = GameId(1);
//! let draw = TriggerData::new(ParsedEffect::new(EffectKind::Draw));
//!
//! TriggerIndex::register(&mut store, game, InstanceId(3), "destroyed", draw).unwrap();
//!
//! assert_eq!(TriggerIndex::find_triggered(&store, game, "destroyed").len(), 1);
//! assert!(TriggerIndex::find_triggered(&store, game, "summon").is_empty());
//! ```

mod index;

pub use index::TriggerIndex;
