//! Turn-level entry point to the rules core.
//!
//! [`Duel`] ties the effect store, once-per-turn ledger, chains,
//! executors and view projection together for the turn/phase controller.
//! Each subsystem is also usable on its own.

pub mod duel;

pub use duel::{ActivationReceipt, Duel};
