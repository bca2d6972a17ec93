//! Access to externally owned game records.
//!
//! The authoritative game state lives in the application's store. The
//! rules core addresses it by [`GameId`] through the [`GameRecords`] trait
//! and never caches it. [`GameTable`] is an in-memory implementation for
//! tests and single-process hosts.

use rustc_hash::FxHashMap;

use super::error::{Result, RulesError};
use super::ids::GameId;
use super::state::GameState;

/// Read/patch access to game records by ID.
///
/// Implementations are expected to serialize mutations of the same game;
/// the core applies one mutation at a time and takes no locks itself.
pub trait GameRecords {
    /// Read a game's state.
    fn get(&self, game: GameId) -> Option<&GameState>;

    /// Get a game's state for patching.
    fn get_mut(&mut self, game: GameId) -> Option<&mut GameState>;

    /// Read a game's state, failing with `NotFound` if missing.
    fn require(&self, game: GameId) -> Result<&GameState> {
        self.get(game).ok_or_else(|| RulesError::not_found("game", game))
    }

    /// Get a game's state for patching, failing with `NotFound` if missing.
    fn require_mut(&mut self, game: GameId) -> Result<&mut GameState> {
        self.get_mut(game).ok_or_else(|| RulesError::not_found("game", game))
    }
}

/// In-memory game records.
#[derive(Clone, Debug, Default)]
pub struct GameTable {
    games: FxHashMap<GameId, GameState>,
}

impl GameTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a game's state.
    pub fn insert(&mut self, state: GameState) {
        self.games.insert(state.game, state);
    }

    /// Remove a finished game.
    pub fn remove(&mut self, game: GameId) -> Option<GameState> {
        self.games.remove(&game)
    }

    /// Number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Is the table empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameRecords for GameTable {
    fn get(&self, game: GameId) -> Option<&GameState> {
        self.games.get(&game)
    }

    fn get_mut(&mut self, game: GameId) -> Option<&mut GameState> {
        self.games.get_mut(&game)
    }
}
