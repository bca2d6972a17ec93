//! Parsed effect descriptors.
//!
//! A `ParsedEffect` is what a chain link resolves: which executor runs
//! (`kind`), what it may target, how many cards it picks, and the
//! free-form condition text the card was printed with. Card text parsing
//! happens outside the core; executors only see the parsed form.

use serde::{Deserialize, Serialize};

use super::effect::Duration;
use crate::cards::CardKind;
use crate::core::{InstanceId, RulesError};

/// Which executor handles an effect.
///
/// The string form is the registry key; `Custom` lets hosts plug in
/// executors the core does not ship.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Search,
    Negate,
    ModifyAttack,
    ModifyDefense,
    Destroy,
    Draw,
    Custom(String),
}

impl EffectKind {
    /// Registry key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            EffectKind::Search => "search",
            EffectKind::Negate => "negate",
            EffectKind::ModifyAttack => "modifyATK",
            EffectKind::ModifyDefense => "modifyDEF",
            EffectKind::Destroy => "destroy",
            EffectKind::Draw => "draw",
            EffectKind::Custom(key) => key,
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EffectKind {
    fn from(key: &str) -> Self {
        match key {
            "search" => EffectKind::Search,
            "negate" => EffectKind::Negate,
            "modifyATK" => EffectKind::ModifyAttack,
            "modifyDEF" => EffectKind::ModifyDefense,
            "destroy" => EffectKind::Destroy,
            "draw" => EffectKind::Draw,
            other => EffectKind::Custom(other.to_string()),
        }
    }
}

/// What an effect may target.
///
/// Card text uses a few aliases: "creature" means monster and
/// "equipment" means spell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    #[default]
    Any,
    Monster,
    Creature,
    Spell,
    Equipment,
    Trap,
}

impl TargetType {
    /// The card category this target type resolves to. `None` for `Any`.
    #[must_use]
    pub const fn category(self) -> Option<CardKind> {
        match self {
            TargetType::Any => None,
            TargetType::Monster | TargetType::Creature => Some(CardKind::Monster),
            TargetType::Spell | TargetType::Equipment => Some(CardKind::Spell),
            TargetType::Trap => Some(CardKind::Trap),
        }
    }

    /// Does a card of `kind` satisfy this target type?
    #[must_use]
    pub fn matches(self, kind: CardKind) -> bool {
        self.category().is_none_or(|c| c == kind)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetType::Any => "any",
            TargetType::Monster => "monster",
            TargetType::Creature => "creature",
            TargetType::Spell => "spell",
            TargetType::Equipment => "equipment",
            TargetType::Trap => "trap",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "card" => Ok(TargetType::Any),
            "monster" => Ok(TargetType::Monster),
            "creature" => Ok(TargetType::Creature),
            "spell" => Ok(TargetType::Spell),
            "equipment" => Ok(TargetType::Equipment),
            "trap" => Ok(TargetType::Trap),
            other => Err(RulesError::Parse(format!("unknown target type `{other}`"))),
        }
    }
}

/// A parsed effect, ready to hand to an executor.
///
/// ```
/// use duel_rules::effects::{EffectKind, ParsedEffect, TargetType};
///
/// let search = ParsedEffect::new(EffectKind::Search)
///     .with_target(TargetType::Monster, 1)
///     .with_archetype("Dragon");
///
/// assert_eq!(search.kind.as_str(), "search");
/// assert_eq!(search.target_count, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedEffect {
    /// Executor that handles this effect.
    pub kind: EffectKind,

    /// What the effect may target.
    #[serde(default)]
    pub target_type: TargetType,

    /// How many cards the effect picks.
    #[serde(default)]
    pub target_count: u32,

    /// Printed condition text (e.g. "negate the activation").
    #[serde(default)]
    pub condition: Option<String>,

    /// Archetype filter for searches.
    #[serde(default)]
    pub archetype: Option<String>,

    /// Magnitude for stat changes.
    #[serde(default)]
    pub amount: i32,

    /// How long effects registered by this one last.
    #[serde(default)]
    pub duration: Duration,

    /// Card chosen by the player, for effects that pick from a pool.
    #[serde(default)]
    pub selection: Option<InstanceId>,
}

impl ParsedEffect {
    /// Create a descriptor with no targets and no condition.
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            target_type: TargetType::Any,
            target_count: 0,
            condition: None,
            archetype: None,
            amount: 0,
            duration: Duration::Permanent,
            selection: None,
        }
    }

    /// Set the target type and count (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target_type: TargetType, count: u32) -> Self {
        self.target_type = target_type;
        self.target_count = count;
        self
    }

    /// Set the condition text (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Set the archetype filter (builder pattern).
    #[must_use]
    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    /// Set the magnitude (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the duration of registered effects (builder pattern).
    #[must_use]
    pub fn lasting(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the player's choice (builder pattern).
    #[must_use]
    pub fn with_selection(mut self, card: InstanceId) -> Self {
        self.selection = Some(card);
        self
    }
}
