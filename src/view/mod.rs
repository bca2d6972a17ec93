//! Viewer-specific projections of game state.
//!
//! A [`PlayerView`] is what one participant (or a spectator) is allowed to
//! see. It is derived from the authoritative state on demand and never
//! stored.
//!
//! ## Masking rules
//!
//! - Hand and deck of a seat the viewer does not own: every card becomes a
//!   placeholder, so counts survive but identities do not.
//! - Face-down cards on the field: a placeholder for every viewer except
//!   the seat that owns the zone. The placeholder keeps the instance ID as
//!   `slot` so the card can still be targeted.
//! - Everything else (graveyards, face-up field cards) is copied as is.

mod projector;

pub use projector::{project, HiddenCard, PlayerView, SeatView, ViewCard, ViewProjector};
