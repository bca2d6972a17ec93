//! Chain records and the chain state machine.
//!
//! Links are stored in an index-stable arena: position `n` is always
//! `links[n - 1]`, negation flips a flag instead of removing the slot, and
//! link targets can refer to lower positions by number.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::SpellSpeed;
use crate::core::{CardEffectId, ChainId, GameId, GameState, InstanceId, Result, RulesConfig, RulesError, Seat};
use crate::effects::{EffectStore, ParsedEffect};
use crate::executors::{ExecutionContext, ExecutionPayload, ExecutionResult, ExecutorRegistry};

/// Something a chain link targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// A card, which must still be on the field when the link resolves.
    Card(InstanceId),
    /// A lower link of the same chain (1-based position).
    Link(usize),
}

/// Target list of a link.
pub type LinkTargets = SmallVec<[LinkTarget; 2]>;

/// A request to put a card effect on the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub card: InstanceId,
    pub player: Seat,
    pub effect_id: CardEffectId,
    pub spell_speed: SpellSpeed,
    pub targets: LinkTargets,
    pub effect: ParsedEffect,

    /// Is this effect limited to once per turn?
    #[serde(default)]
    pub once_per_turn: bool,

    /// May the controller decline it? Set for optional triggers.
    #[serde(default)]
    pub optional: bool,
}

impl Activation {
    /// A normal-speed activation with no targets.
    #[must_use]
    pub fn new(card: InstanceId, player: Seat, effect_id: CardEffectId, effect: ParsedEffect) -> Self {
        Self {
            card,
            player,
            effect_id,
            spell_speed: SpellSpeed::Normal,
            targets: SmallVec::new(),
            effect,
            once_per_turn: false,
            optional: false,
        }
    }

    /// Set the spell speed (builder pattern).
    #[must_use]
    pub fn with_speed(mut self, spell_speed: SpellSpeed) -> Self {
        self.spell_speed = spell_speed;
        self
    }

    /// Add a target card (builder pattern).
    #[must_use]
    pub fn targeting_card(mut self, card: InstanceId) -> Self {
        self.targets.push(LinkTarget::Card(card));
        self
    }

    /// Add a target link (builder pattern).
    #[must_use]
    pub fn targeting_link(mut self, position: usize) -> Self {
        self.targets.push(LinkTarget::Link(position));
        self
    }

    /// Mark the effect once-per-turn (builder pattern).
    #[must_use]
    pub fn once_per_turn(mut self) -> Self {
        self.once_per_turn = true;
        self
    }

    /// Mark the activation as declinable (builder pattern).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// One slot of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// 1-based position (chain link 1 resolves last).
    pub position: usize,
    pub card: InstanceId,
    pub player: Seat,
    pub effect_id: CardEffectId,
    pub spell_speed: SpellSpeed,
    pub targets: LinkTargets,
    pub effect: ParsedEffect,
    pub negated: bool,
}

/// A chain in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub id: ChainId,
    pub game: GameId,

    /// Links, bottom (position 1) first.
    pub links: Vec<ChainLink>,

    /// Have both players passed?
    pub resolving: bool,

    /// Seat that may respond next. `None` once resolving.
    pub priority_player: Option<Seat>,

    /// Passes since the last link was added.
    pub consecutive_passes: u8,
}

impl Chain {
    /// The most recently added link.
    #[must_use]
    pub fn top(&self) -> Option<&ChainLink> {
        self.links.last()
    }

    /// Get a link by 1-based position.
    #[must_use]
    pub fn link(&self, position: usize) -> Option<&ChainLink> {
        position.checked_sub(1).and_then(|i| self.links.get(i))
    }

    fn link_mut(&mut self, position: usize) -> Option<&mut ChainLink> {
        position.checked_sub(1).and_then(|i| self.links.get_mut(i))
    }
}

/// Where a game's chain is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStatus {
    Idle,
    Open,
    Resolving,
}

/// Result of a priority pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOutcome {
    /// The chain stays open; this seat may respond.
    Waiting(Seat),
    /// Both players passed; the chain must now be resolved.
    Resolving,
}

/// Everything chain resolution needs besides the chain itself.
pub struct ResolveContext<'a> {
    pub state: &'a mut GameState,
    pub effects: &'a mut EffectStore,
    pub registry: &'a ExecutorRegistry,
    pub config: &'a RulesConfig,
}

/// What happened to one link during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// The executor ran (its result may still be a rule failure).
    Resolved(ExecutionResult),
    /// The link was negated and skipped.
    Negated,
    /// A target vanished before resolution.
    Fizzled { reason: String },
    /// No executor is registered for the link's effect type.
    Unhandled { effect_type: String },
}

/// Outcome of one link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOutcome {
    pub position: usize,
    pub card: InstanceId,
    pub status: LinkStatus,
}

/// Report of a resolved chain, outcomes in resolution order (top first).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResolution {
    pub chain: ChainId,
    pub game: GameId,
    pub outcomes: Vec<LinkOutcome>,
}

impl ChainResolution {
    /// Positions whose executor ran, in resolution order.
    #[must_use]
    pub fn resolved_positions(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, LinkStatus::Resolved(_)))
            .map(|o| o.position)
            .collect()
    }
}

/// Chains of every game. At most one chain per game exists at a time.
#[derive(Clone, Debug, Default)]
pub struct ChainStack {
    chains: FxHashMap<ChainId, Chain>,
    by_game: FxHashMap<GameId, ChainId>,
    next_id: u64,
}

impl ChainStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    /// Get a chain by ID.
    #[must_use]
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(&id)
    }

    /// The game's current chain, if any.
    #[must_use]
    pub fn active_chain(&self, game: GameId) -> Option<&Chain> {
        self.by_game.get(&game).and_then(|id| self.chains.get(id))
    }

    /// Lifecycle state of the game's chain.
    #[must_use]
    pub fn status(&self, game: GameId) -> ChainStatus {
        match self.active_chain(game) {
            None => ChainStatus::Idle,
            Some(chain) if chain.resolving => ChainStatus::Resolving,
            Some(_) => ChainStatus::Open,
        }
    }

    // === Building ===

    /// Open a chain. Fails if the game already has one.
    pub fn start_chain(&mut self, game: GameId, priority_player: Seat) -> Result<ChainId> {
        if let Some(existing) = self.by_game.get(&game) {
            return Err(RulesError::IllegalState(format!(
                "game {game} already has open chain {existing}"
            )));
        }

        self.next_id += 1;
        let id = ChainId::new(self.next_id);
        self.chains.insert(
            id,
            Chain {
                id,
                game,
                links: Vec::new(),
                resolving: false,
                priority_player: Some(priority_player),
                consecutive_passes: 0,
            },
        );
        self.by_game.insert(game, id);

        info!(game = %game, chain = %id, priority = %priority_player, "chain started");
        Ok(id)
    }

    /// Add a link. Returns its 1-based position.
    ///
    /// Once the chain has links only the seat holding priority may respond.
    /// Rejected activations leave the chain untouched. On success priority
    /// passes to the activator's opponent.
    pub fn add_to_chain(&mut self, chain: ChainId, activation: Activation) -> Result<usize> {
        let record = self.open_chain_mut(chain)?;
        if !record.links.is_empty() {
            Self::require_priority(record, activation.player)?;
        }

        if let Some(top) = record.top() {
            if !activation.spell_speed.can_respond_to(top.spell_speed) {
                debug!(
                    game = %record.game,
                    chain = %chain,
                    attempted = %activation.spell_speed,
                    required = %top.spell_speed,
                    "response too slow"
                );
                return Err(RulesError::SpellSpeedTooLow {
                    attempted: activation.spell_speed,
                    required: top.spell_speed,
                });
            }
        }

        let position = record.links.len() + 1;
        for target in &activation.targets {
            if let LinkTarget::Link(p) = *target {
                if p == 0 || p >= position {
                    return Err(RulesError::IllegalTarget(format!(
                        "chain link {p} is not below new link {position}"
                    )));
                }
            }
        }

        let next = activation.player.opponent();
        record.links.push(ChainLink {
            position,
            card: activation.card,
            player: activation.player,
            effect_id: activation.effect_id,
            spell_speed: activation.spell_speed,
            targets: activation.targets,
            effect: activation.effect,
            negated: false,
        });
        record.priority_player = Some(next);
        record.consecutive_passes = 0;

        info!(
            game = %record.game,
            chain = %chain,
            position,
            card = %activation.card,
            speed = %activation.spell_speed,
            "chain link added"
        );
        Ok(position)
    }

    /// Pass priority. Only the seat holding priority may pass; priority
    /// then moves to its opponent.
    ///
    /// Priority alternates, so the second consecutive pass always comes
    /// from the other seat and closes the chain for resolution.
    pub fn pass_priority(&mut self, chain: ChainId, passer: Seat) -> Result<PriorityOutcome> {
        let record = self.open_chain_mut(chain)?;
        Self::require_priority(record, passer)?;
        record.consecutive_passes += 1;

        if record.consecutive_passes >= 2 {
            record.resolving = true;
            record.priority_player = None;
            info!(game = %record.game, chain = %chain, links = record.links.len(), "chain resolving");
            return Ok(PriorityOutcome::Resolving);
        }

        let next = passer.opponent();
        record.priority_player = Some(next);
        debug!(game = %record.game, chain = %chain, passer = %passer, next = %next, "priority passed");
        Ok(PriorityOutcome::Waiting(next))
    }

    /// Mark a link negated. The slot stays in place.
    ///
    /// Allowed until the chain is resolved; a resolved chain no longer
    /// exists.
    pub fn negate_link(&mut self, chain: ChainId, position: usize) -> Result<()> {
        let record = self
            .chains
            .get_mut(&chain)
            .ok_or_else(|| RulesError::not_found("chain", chain))?;
        let game = record.game;
        let link = record
            .link_mut(position)
            .ok_or_else(|| RulesError::not_found("chain link", position))?;
        link.negated = true;
        debug!(game = %game, chain = %chain, position, "chain link negated");
        Ok(())
    }

    // === Resolution ===

    /// Resolve every link top-down, then delete the chain.
    ///
    /// Negated links are skipped. Links whose targets vanished fizzle and
    /// links without an executor are reported; either way the chain
    /// continues.
    pub fn resolve_chain(&mut self, chain: ChainId, ctx: &mut ResolveContext<'_>) -> Result<ChainResolution> {
        let record = self
            .chains
            .get(&chain)
            .ok_or_else(|| RulesError::not_found("chain", chain))?;
        if !record.resolving {
            return Err(RulesError::IllegalState(format!(
                "chain {chain} has not been closed by both players passing"
            )));
        }
        if record.game != ctx.state.game {
            return Err(RulesError::IllegalState(format!(
                "chain {chain} belongs to game {}, not {}",
                record.game, ctx.state.game
            )));
        }

        let Some(mut record) = self.chains.remove(&chain) else {
            return Err(RulesError::not_found("chain", chain));
        };
        self.by_game.remove(&record.game);

        let game = record.game;
        let mut outcomes = Vec::with_capacity(record.links.len());
        for index in (0..record.links.len()).rev() {
            let status = Self::resolve_link(&mut record, index, ctx);
            outcomes.push(LinkOutcome {
                position: index + 1,
                card: record.links[index].card,
                status,
            });
        }

        info!(game = %game, chain = %chain, links = outcomes.len(), "chain resolved");
        Ok(ChainResolution { chain, game, outcomes })
    }

    fn resolve_link(record: &mut Chain, index: usize, ctx: &mut ResolveContext<'_>) -> LinkStatus {
        let link = &record.links[index];
        let (game, position) = (record.game, link.position);

        if link.negated {
            debug!(game = %game, position, card = %link.card, "negated link skipped");
            return LinkStatus::Negated;
        }

        let mut cards: SmallVec<[InstanceId; 4]> = SmallVec::new();
        for target in &link.targets {
            let card = match *target {
                LinkTarget::Card(card) if ctx.state.is_on_field(card) => card,
                LinkTarget::Card(card) => {
                    return Self::fizzle(game, position, format!("{card} left the field"));
                }
                LinkTarget::Link(p) => match record.link(p) {
                    Some(other) if ctx.state.find_card(other.card).is_some() => other.card,
                    Some(other) => {
                        return Self::fizzle(game, position, format!("{} no longer exists", other.card));
                    }
                    None => return Self::fizzle(game, position, format!("chain link {p} is gone")),
                },
            };
            cards.push(card);
        }

        let key = link.effect.kind.as_str();
        let Some(executor) = ctx.registry.get(key) else {
            warn!(game = %game, position, effect_type = %key, "no executor for chain link");
            return LinkStatus::Unhandled {
                effect_type: key.to_string(),
            };
        };

        let mut exec = ExecutionContext {
            game,
            state: &mut *ctx.state,
            effects: &mut *ctx.effects,
            config: ctx.config,
            player: link.player,
            source: link.card,
            targets: &cards,
        };
        let result = executor.execute(&mut exec, &link.effect);
        debug!(game = %game, position, success = result.success, message = %result.message, "chain link resolved");

        if result.success {
            if let ExecutionPayload::Negated { .. } = result.payload {
                let negated: SmallVec<[usize; 2]> = link
                    .targets
                    .iter()
                    .filter_map(|t| match *t {
                        LinkTarget::Link(p) => Some(p),
                        LinkTarget::Card(_) => None,
                    })
                    .collect();
                for p in negated {
                    if let Some(target) = record.link_mut(p) {
                        target.negated = true;
                        debug!(game = %game, by = position, position = p, "chain link negated");
                    }
                }
            }
        }
        LinkStatus::Resolved(result)
    }

    fn fizzle(game: GameId, position: usize, reason: String) -> LinkStatus {
        info!(game = %game, position, reason = %reason, "chain link fizzled");
        LinkStatus::Fizzled { reason }
    }

    // === Teardown ===

    /// Drop the game's chain without resolving it. Returns whether one existed.
    pub fn clear_game(&mut self, game: GameId) -> bool {
        match self.by_game.remove(&game) {
            Some(id) => self.chains.remove(&id).is_some(),
            None => false,
        }
    }

    fn require_priority(record: &Chain, seat: Seat) -> Result<()> {
        if record.priority_player == Some(seat) {
            return Ok(());
        }
        debug!(game = %record.game, chain = %record.id, seat = %seat, "acted without priority");
        Err(RulesError::IllegalState(format!(
            "{seat} does not hold priority on chain {}",
            record.id
        )))
    }

    fn open_chain_mut(&mut self, chain: ChainId) -> Result<&mut Chain> {
        let record = self
            .chains
            .get_mut(&chain)
            .ok_or_else(|| RulesError::not_found("chain", chain))?;
        if record.resolving {
            return Err(RulesError::IllegalState(format!("chain {chain} is resolving")));
        }
        Ok(record)
    }
}
