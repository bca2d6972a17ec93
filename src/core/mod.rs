//! Core types: identifiers, seats, game state, errors, configuration.
//!
//! Everything else in the crate is built on these. The game state itself
//! is owned outside the core and reached through [`GameRecords`].

pub mod ids;
pub mod player;
pub mod config;
pub mod error;
pub mod state;
pub mod records;

pub use ids::{CardEffectId, ChainId, EffectId, GameId, InstanceId};
pub use player::{Seat, SeatMap, Viewer};
pub use config::{RulesConfig, SearchPolicy, ViewPolicy};
pub use error::{Result, RulesError};
pub use state::{GameState, Phase};
pub use records::{GameRecords, GameTable};
