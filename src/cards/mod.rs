//! Card instances.
//!
//! The rules core only needs a card's printed identity, base stats,
//! owner and facing. Everything else about a card (text, art, rarity)
//! belongs to the catalogue outside the core.

pub mod instance;

pub use instance::{CardInstance, CardKind, Stats};
