//! Zone system for card locations.
//!
//! Every seat owns the same five zones: hand, monster zone, spell/trap
//! zone (backrow), graveyard and deck. Hand and deck are hidden zones;
//! the field zones are public except for face-down cards.
//!
//! ## Key Types
//!
//! - `ZoneKind`: Which of the five zones
//! - `SeatZones`: The zones of one seat
//! - `ZonePosition`: Position specifier for inserting cards

pub mod manager;

pub use manager::{SeatZones, ZoneKind, ZonePosition};
