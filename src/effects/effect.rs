//! Active effect records.
//!
//! An `ActiveEffect` is an effect instance currently in force (a stat
//! modifier, a continuous buff or debuff) or registered as a pending
//! trigger. Every record belongs to one game and one source card.
//!
//! ## Durations
//!
//! | Duration             | Expires when                                   |
//! |----------------------|------------------------------------------------|
//! | `permanent`          | never (explicit removal only)                  |
//! | `until_end_of_turn`  | `current_turn > applied_turn`                  |
//! | `until_end_of_phase` | turn or phase differs from the applied anchor  |
//! | `turns:N`            | `current_turn - applied_turn >= N`             |

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::parsed::ParsedEffect;
use crate::core::{CardEffectId, EffectId, GameId, InstanceId, Phase, RulesError};
use crate::stack::SpellSpeed;

/// Prefix of trigger effect types (`trigger:<event>`).
pub const TRIGGER_PREFIX: &str = "trigger:";

/// Effect type discriminant.
///
/// String forms: `modifyATK`, `modifyDEF`, `continuous_buff`,
/// `continuous_debuff`, `trigger:<event>`. Anything else is kept verbatim
/// as `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    ModifyAttack,
    ModifyDefense,
    ContinuousBuff,
    ContinuousDebuff,
    /// Deferred reaction to a named game event.
    Trigger(String),
    Other(String),
}

impl EffectType {
    /// Trigger type for a named event.
    #[must_use]
    pub fn trigger(event: impl Into<String>) -> Self {
        EffectType::Trigger(event.into())
    }

    /// Is this one of the stat-modifying types folded onto card stats?
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            EffectType::ModifyAttack
                | EffectType::ModifyDefense
                | EffectType::ContinuousBuff
                | EffectType::ContinuousDebuff
        )
    }

    /// Is this a registered trigger?
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        matches!(self, EffectType::Trigger(_))
    }
}

impl std::fmt::Display for EffectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectType::ModifyAttack => f.write_str("modifyATK"),
            EffectType::ModifyDefense => f.write_str("modifyDEF"),
            EffectType::ContinuousBuff => f.write_str("continuous_buff"),
            EffectType::ContinuousDebuff => f.write_str("continuous_debuff"),
            EffectType::Trigger(event) => write!(f, "{TRIGGER_PREFIX}{event}"),
            EffectType::Other(name) => f.write_str(name),
        }
    }
}

impl std::str::FromStr for EffectType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "modifyATK" => EffectType::ModifyAttack,
            "modifyDEF" => EffectType::ModifyDefense,
            "continuous_buff" => EffectType::ContinuousBuff,
            "continuous_debuff" => EffectType::ContinuousDebuff,
            "" => return Err(RulesError::Parse("empty effect type".to_string())),
            other => match other.strip_prefix(TRIGGER_PREFIX) {
                Some("") => return Err(RulesError::Parse("trigger without event name".to_string())),
                Some(event) => EffectType::Trigger(event.to_string()),
                None => EffectType::Other(other.to_string()),
            },
        })
    }
}

/// How long an effect stays in force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    #[default]
    Permanent,
    UntilEndOfTurn,
    UntilEndOfPhase,
    /// Lasts N turns (N >= 1).
    Turns(u32),
}

impl Duration {
    /// Does this duration need an applied turn anchor?
    #[must_use]
    pub const fn needs_turn(self) -> bool {
        !matches!(self, Duration::Permanent)
    }

    /// Does this duration need an applied phase anchor?
    #[must_use]
    pub const fn needs_phase(self) -> bool {
        matches!(self, Duration::UntilEndOfPhase)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Duration::Permanent => f.write_str("permanent"),
            Duration::UntilEndOfTurn => f.write_str("until_end_of_turn"),
            Duration::UntilEndOfPhase => f.write_str("until_end_of_phase"),
            Duration::Turns(n) => write!(f, "turns:{n}"),
        }
    }
}

impl std::str::FromStr for Duration {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permanent" => Ok(Duration::Permanent),
            "until_end_of_turn" => Ok(Duration::UntilEndOfTurn),
            "until_end_of_phase" => Ok(Duration::UntilEndOfPhase),
            other => {
                let count = other
                    .strip_prefix("turns:")
                    .ok_or_else(|| RulesError::Parse(format!("unknown duration `{other}`")))?;
                let n: u32 = count
                    .parse()
                    .map_err(|_| RulesError::Parse(format!("bad turn count in `{other}`")))?;
                if n == 0 {
                    return Err(RulesError::InvalidDuration(other.to_string()));
                }
                Ok(Duration::Turns(n))
            }
        }
    }
}

/// Data carried by a registered trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerData {
    /// Effect to put on the chain when the event fires. Its `kind` is the
    /// executor registry key, so the callback is resolved by lookup.
    pub callback: ParsedEffect,

    /// Which of the source card's effects this is.
    pub effect_id: CardEffectId,

    /// Spell speed of the triggered activation.
    pub spell_speed: SpellSpeed,

    /// May the controller decline to activate it?
    pub optional: bool,
}

impl TriggerData {
    /// A mandatory, normal-speed trigger for the card's first effect.
    #[must_use]
    pub fn new(callback: ParsedEffect) -> Self {
        Self {
            callback,
            effect_id: CardEffectId::new(0),
            spell_speed: SpellSpeed::Normal,
            optional: false,
        }
    }

    /// Set which card effect this is (builder pattern).
    #[must_use]
    pub fn for_effect(mut self, effect_id: CardEffectId) -> Self {
        self.effect_id = effect_id;
        self
    }

    /// Set the spell speed (builder pattern).
    #[must_use]
    pub fn with_speed(mut self, spell_speed: SpellSpeed) -> Self {
        self.spell_speed = spell_speed;
        self
    }

    /// Let the controller decline (builder pattern).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Effect-type-specific payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectData {
    /// Single-stat change (`modifyATK` / `modifyDEF`).
    StatDelta { amount: i32 },

    /// Attack and defense change (`continuous_buff` adds, `continuous_debuff` subtracts).
    Buff { attack: i32, defense: i32 },

    /// Registered trigger.
    Trigger(TriggerData),

    /// Payload the core does not interpret, kept for the host.
    Opaque(FxHashMap<String, i64>),
}

impl EffectData {
    /// Empty opaque payload.
    #[must_use]
    pub fn opaque() -> Self {
        EffectData::Opaque(FxHashMap::default())
    }
}

/// Target list of an effect.
pub type EffectTargets = SmallVec<[InstanceId; 4]>;

/// An effect instance currently in force or registered as a trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// Store-assigned ID.
    pub id: EffectId,

    /// Owning game.
    pub game: GameId,

    /// Card that created the effect.
    pub source: InstanceId,

    /// Discriminant.
    pub effect_type: EffectType,

    /// Affected cards, in order, without duplicates. Empty for triggers.
    pub targets: EffectTargets,

    /// Lifetime rule.
    pub duration: Duration,

    /// Type-specific payload.
    pub data: EffectData,

    /// Turn the effect was applied on. `None` for permanent effects.
    pub applied_turn: Option<u32>,

    /// Phase the effect was applied in. `None` for permanent effects.
    pub applied_phase: Option<Phase>,
}

impl ActiveEffect {
    /// Does the effect's expiry rule hold at `(current_turn, current_phase)`?
    #[must_use]
    pub fn is_expired(&self, current_turn: u32, current_phase: Phase) -> bool {
        let Some(applied_turn) = self.applied_turn else {
            return false;
        };

        match self.duration {
            Duration::Permanent => false,
            Duration::UntilEndOfTurn => current_turn > applied_turn,
            Duration::UntilEndOfPhase => {
                current_turn != applied_turn || self.applied_phase != Some(current_phase)
            }
            Duration::Turns(n) => current_turn.saturating_sub(applied_turn) >= n,
        }
    }

    /// Does this effect apply to `card`?
    #[must_use]
    pub fn affects(&self, card: InstanceId) -> bool {
        self.targets.contains(&card)
    }

    /// The trigger payload, if this is a trigger.
    #[must_use]
    pub fn trigger_data(&self) -> Option<&TriggerData> {
        match &self.data {
            EffectData::Trigger(data) => Some(data),
            _ => None,
        }
    }
}

/// Request to activate an effect (everything but the ID and game).
///
/// ```
/// use duel_rules::core::{InstanceId, Phase};
/// use duel_rules::effects::{Duration, EffectData, EffectType, NewEffect};
///
/// let buff = NewEffect::new(InstanceId(1), EffectType::ModifyAttack, EffectData::StatDelta { amount: 500 })
///     .targeting([InstanceId(2)])
///     .lasting(Duration::UntilEndOfTurn)
///     .applied_at(3, Phase::Main1);
///
/// assert_eq!(buff.targets.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEffect {
    pub source: InstanceId,
    pub effect_type: EffectType,
    pub targets: EffectTargets,
    pub duration: Duration,
    pub data: EffectData,
    pub applied_turn: Option<u32>,
    pub applied_phase: Option<Phase>,
}

impl NewEffect {
    /// A permanent effect with no targets.
    #[must_use]
    pub fn new(source: InstanceId, effect_type: EffectType, data: EffectData) -> Self {
        Self {
            source,
            effect_type,
            targets: SmallVec::new(),
            duration: Duration::Permanent,
            data,
            applied_turn: None,
            applied_phase: None,
        }
    }

    /// Add targets, skipping duplicates (builder pattern).
    #[must_use]
    pub fn targeting(mut self, targets: impl IntoIterator<Item = InstanceId>) -> Self {
        for target in targets {
            if !self.targets.contains(&target) {
                self.targets.push(target);
            }
        }
        self
    }

    /// Set the duration (builder pattern).
    #[must_use]
    pub fn lasting(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Anchor the effect to a turn and phase (builder pattern).
    #[must_use]
    pub fn applied_at(mut self, turn: u32, phase: Phase) -> Self {
        self.applied_turn = Some(turn);
        self.applied_phase = Some(phase);
        self
    }

    /// Anchor the effect to a turn only (builder pattern).
    #[must_use]
    pub fn applied_on_turn(mut self, turn: u32) -> Self {
        self.applied_turn = Some(turn);
        self
    }

    /// Check that the duration has the anchors it needs.
    pub fn validate(&self) -> Result<(), RulesError> {
        if let Duration::Turns(0) = self.duration {
            return Err(RulesError::InvalidDuration("turns:0".to_string()));
        }
        if self.duration.needs_turn() && self.applied_turn.is_none() {
            return Err(RulesError::MissingAnchor {
                duration: self.duration.to_string(),
                anchor: "turn",
            });
        }
        if self.duration.needs_phase() && self.applied_phase.is_none() {
            return Err(RulesError::MissingAnchor {
                duration: self.duration.to_string(),
                anchor: "phase",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(duration: Duration, turn: Option<u32>, phase: Option<Phase>) -> ActiveEffect {
        ActiveEffect {
            id: EffectId(1),
            game: GameId(1),
            source: InstanceId(1),
            effect_type: EffectType::ModifyAttack,
            targets: SmallVec::new(),
            duration,
            data: EffectData::StatDelta { amount: 100 },
            applied_turn: turn,
            applied_phase: phase,
        }
    }

    #[test]
    fn test_effect_type_strings() {
        for text in ["modifyATK", "modifyDEF", "continuous_buff", "continuous_debuff", "trigger:on_summon", "burn"] {
            let parsed: EffectType = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
        assert_eq!("trigger:on_summon".parse::<EffectType>().unwrap(), EffectType::trigger("on_summon"));
        assert!("trigger:".parse::<EffectType>().is_err());
    }

    #[test]
    fn test_duration_strings() {
        assert_eq!("turns:3".parse::<Duration>().unwrap(), Duration::Turns(3));
        assert_eq!(Duration::Turns(2).to_string(), "turns:2");
        assert_eq!("until_end_of_phase".parse::<Duration>().unwrap(), Duration::UntilEndOfPhase);
        assert!(matches!("turns:0".parse::<Duration>(), Err(RulesError::InvalidDuration(_))));
        assert!("forever".parse::<Duration>().is_err());
    }

    #[test]
    fn test_permanent_never_expires() {
        let e = effect(Duration::Permanent, None, None);
        assert!(!e.is_expired(1, Phase::End));
        assert!(!e.is_expired(1000, Phase::Draw));
    }

    #[test]
    fn test_until_end_of_turn() {
        let e = effect(Duration::UntilEndOfTurn, Some(3), Some(Phase::Main1));
        assert!(!e.is_expired(3, Phase::Main1));
        assert!(!e.is_expired(3, Phase::End));
        assert!(e.is_expired(4, Phase::Draw));
    }

    #[test]
    fn test_until_end_of_phase() {
        let e = effect(Duration::UntilEndOfPhase, Some(3), Some(Phase::Battle));
        assert!(!e.is_expired(3, Phase::Battle));
        assert!(e.is_expired(3, Phase::Main2));
        assert!(e.is_expired(4, Phase::Battle));
    }

    #[test]
    fn test_turns_n() {
        let e = effect(Duration::Turns(2), Some(5), Some(Phase::Main1));
        assert!(!e.is_expired(5, Phase::End));
        assert!(!e.is_expired(6, Phase::End));
        assert!(e.is_expired(7, Phase::Draw));
    }

    #[test]
    fn test_new_effect_dedups_targets() {
        let new = NewEffect::new(InstanceId(1), EffectType::ContinuousBuff, EffectData::opaque())
            .targeting([InstanceId(2), InstanceId(3), InstanceId(2)]);
        assert_eq!(new.targets.as_slice(), &[InstanceId(2), InstanceId(3)]);
    }

    #[test]
    fn test_validate_anchors() {
        let base = NewEffect::new(InstanceId(1), EffectType::ModifyAttack, EffectData::StatDelta { amount: 1 });
        assert!(base.clone().validate().is_ok());

        let missing_turn = base.clone().lasting(Duration::UntilEndOfTurn);
        assert!(matches!(missing_turn.validate(), Err(RulesError::MissingAnchor { anchor: "turn", .. })));

        let missing_phase = base.clone().lasting(Duration::UntilEndOfPhase).applied_on_turn(2);
        assert!(matches!(missing_phase.validate(), Err(RulesError::MissingAnchor { anchor: "phase", .. })));

        let zero = base.lasting(Duration::Turns(0)).applied_on_turn(1);
        assert!(matches!(zero.validate(), Err(RulesError::InvalidDuration(_))));
    }
}
