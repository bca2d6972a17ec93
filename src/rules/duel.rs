//! The `Duel` facade: every rules subsystem behind one handle.
//!
//! A turn/phase controller drives the rules core through this type. It
//! owns the effect store, the once-per-turn ledger, the chains and the
//! executor registry for any number of games, and reaches each game's
//! authoritative state through [`GameRecords`].

use tracing::{debug, info};

use crate::core::{ChainId, EffectId, GameId, GameRecords, InstanceId, Phase, Result, RulesConfig, RulesError, Seat, Viewer};
use crate::effects::{EffectStore, TriggerData};
use crate::executors::ExecutorRegistry;
use crate::opt::OncePerTurnTracker;
use crate::stack::{Activation, ChainResolution, ChainStack, ChainStatus, PriorityOutcome, ResolveContext};
use crate::triggers::TriggerIndex;
use crate::view::{PlayerView, ViewProjector};

/// Where an activation landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationReceipt {
    pub chain: ChainId,
    /// 1-based chain link position.
    pub position: usize,
}

/// Rules core for a set of games.
#[derive(Debug)]
pub struct Duel {
    effects: EffectStore,
    opt: OncePerTurnTracker,
    chains: ChainStack,
    registry: ExecutorRegistry,
    projector: ViewProjector,
    config: RulesConfig,
}

impl Default for Duel {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl Duel {
    /// Create a rules core with the built-in executors.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            effects: EffectStore::new(),
            opt: OncePerTurnTracker::new(),
            chains: ChainStack::new(),
            registry: ExecutorRegistry::with_builtins(),
            projector: ViewProjector::new(config.view.clone()),
            config,
        }
    }

    /// Replace the executor registry (builder pattern).
    #[must_use]
    pub fn with_registry(mut self, registry: ExecutorRegistry) -> Self {
        self.registry = registry;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn effects(&self) -> &EffectStore {
        &self.effects
    }

    /// Effect store, for hosts that register continuous effects directly.
    pub fn effects_mut(&mut self) -> &mut EffectStore {
        &mut self.effects
    }

    #[must_use]
    pub fn opt(&self) -> &OncePerTurnTracker {
        &self.opt
    }

    /// Once-per-turn ledger, e.g. to reset a limit explicitly.
    pub fn opt_mut(&mut self) -> &mut OncePerTurnTracker {
        &mut self.opt
    }

    #[must_use]
    pub fn chains(&self) -> &ChainStack {
        &self.chains
    }

    /// Executor registry, for registering custom executors.
    pub fn registry_mut(&mut self) -> &mut ExecutorRegistry {
        &mut self.registry
    }

    // === Activation ===

    /// Put a card effect on the game's chain, opening one if needed.
    ///
    /// Once-per-turn effects are checked before anything changes and
    /// marked used only after the link is on the chain.
    pub fn activate(
        &mut self,
        records: &impl GameRecords,
        game: GameId,
        activation: Activation,
    ) -> Result<ActivationReceipt> {
        let state = records.require(game)?;
        let turn = state.turn_number;
        if state.find_card(activation.card).is_none() {
            return Err(RulesError::not_found("card", activation.card));
        }

        let (card, effect, limited) = (activation.card, activation.effect_id, activation.once_per_turn);
        if limited && !self.opt.can_activate(game, card, effect, turn) {
            debug!(game = %game, card = %card, effect = %effect, turn, "once-per-turn limit reached");
            return Err(RulesError::OncePerTurnExhausted { card, effect, turn });
        }

        let (chain, opened) = match self.chains.active_chain(game) {
            Some(existing) => (existing.id, false),
            None => (self.chains.start_chain(game, activation.player)?, true),
        };
        let position = match self.chains.add_to_chain(chain, activation) {
            Ok(position) => position,
            Err(err) => {
                if opened {
                    self.chains.clear_game(game);
                }
                return Err(err);
            }
        };

        if limited {
            self.opt.mark_used(game, card, effect, turn);
        }
        Ok(ActivationReceipt { chain, position })
    }

    /// Register a trigger for `source` on `event`.
    pub fn register_trigger(
        &mut self,
        game: GameId,
        source: InstanceId,
        event: &str,
        data: TriggerData,
    ) -> Result<EffectId> {
        TriggerIndex::register(&mut self.effects, game, source, event, data)
    }

    /// Activations offered by triggers on `event`. Nothing is put on the
    /// chain; the controller decides which to [`activate`](Self::activate).
    pub fn fire_event(&self, records: &impl GameRecords, game: GameId, event: &str) -> Result<Vec<Activation>> {
        let state = records.require(game)?;
        let candidates = TriggerIndex::candidate_activations(&self.effects, state, event);
        debug!(game = %game, event, candidates = candidates.len(), "event fired");
        Ok(candidates)
    }

    // === Chain ===

    /// Status of a game's chain.
    #[must_use]
    pub fn chain_status(&self, game: GameId) -> ChainStatus {
        self.chains.status(game)
    }

    /// Seat that may respond to or pass on a chain. `None` once it is resolving.
    #[must_use]
    pub fn priority_player(&self, chain: ChainId) -> Option<Seat> {
        self.chains.chain(chain).and_then(|c| c.priority_player)
    }

    /// Pass on behalf of `passer`, which must hold priority.
    pub fn pass_priority(&mut self, chain: ChainId, passer: Seat) -> Result<PriorityOutcome> {
        self.chains.pass_priority(chain, passer)
    }

    pub fn negate_link(&mut self, chain: ChainId, position: usize) -> Result<()> {
        self.chains.negate_link(chain, position)
    }

    /// Resolve a closed chain against the game's state.
    pub fn resolve(&mut self, records: &mut impl GameRecords, chain: ChainId) -> Result<ChainResolution> {
        let game = self
            .chains
            .chain(chain)
            .map(|c| c.game)
            .ok_or_else(|| RulesError::not_found("chain", chain))?;
        let state = records.require_mut(game)?;

        let mut ctx = ResolveContext {
            state,
            effects: &mut self.effects,
            registry: &self.registry,
            config: &self.config,
        };
        self.chains.resolve_chain(chain, &mut ctx)
    }

    // === Turn structure ===

    /// Enter a phase and sweep effects that expired. Returns the sweep count.
    pub fn change_phase(&mut self, records: &mut impl GameRecords, game: GameId, phase: Phase) -> Result<usize> {
        let state = records.require_mut(game)?;
        state.phase = phase;
        let swept = self.effects.sweep_expired(game, state.turn_number, phase);
        debug!(game = %game, phase = %phase, swept, "phase changed");
        Ok(swept)
    }

    /// Start the next turn: advance the counter, sweep expired effects and
    /// purge last turn's once-per-turn records. Returns the sweep count.
    pub fn begin_turn(&mut self, records: &mut impl GameRecords, game: GameId) -> Result<usize> {
        let state = records.require_mut(game)?;
        state.advance_turn();
        let (turn, phase) = (state.turn_number, state.phase);

        let swept = self.effects.sweep_expired(game, turn, phase);
        let purged = self.opt.reset_for_turn(game, turn);
        info!(game = %game, turn, turn_player = %state.turn_player, swept, purged, "turn started");
        Ok(swept)
    }

    /// A card left the field: drop the effects and triggers it created and
    /// detach it from effects targeting it. Returns the removal count.
    pub fn leave_field(&mut self, game: GameId, card: InstanceId) -> usize {
        let removed = self.effects.remove_for_source(game, card) + self.effects.detach_target(game, card);
        debug!(game = %game, card = %card, removed, "card left the field");
        removed
    }

    /// Tear down everything the core holds for a finished game.
    pub fn end_game(&mut self, game: GameId) {
        let effects = self.effects.remove_all(game);
        let opt = self.opt.clear_game(game);
        let chain = self.chains.clear_game(game);
        info!(game = %game, effects, opt, chain, "game torn down");
    }

    // === Views ===

    /// What `viewer` may see of a game.
    pub fn view(&self, records: &impl GameRecords, game: GameId, viewer: Viewer) -> Result<PlayerView> {
        let state = records.require(game)?;
        Ok(self.projector.project(state, viewer))
    }
}
