//! Stat calculation.
//!
//! Modifiers are not written onto cards. A card's current attack and
//! defense are its base stats with every live modifier folded on, in
//! insertion order, recomputed on every read.

use super::effect::{ActiveEffect, EffectData, EffectType};
use super::store::EffectStore;
use crate::cards::{CardInstance, Stats};
use crate::core::GameId;

/// Fold modifiers onto base stats. Arithmetic saturates at the `i32`
/// bounds and the result is clamped at zero.
///
/// Modifiers whose payload does not match their type are ignored.
///
/// ```
/// use duel_rules::cards::Stats;
/// use duel_rules::effects::effective_stats;
///
/// assert_eq!(effective_stats(Stats::new(1500, 1000), std::iter::empty()), Stats::new(1500, 1000));
/// ```
pub fn effective_stats<'a>(base: Stats, modifiers: impl IntoIterator<Item = &'a ActiveEffect>) -> Stats {
    let folded = modifiers.into_iter().fold(base, |mut stats, effect| {
        match (&effect.effect_type, &effect.data) {
            (EffectType::ModifyAttack, EffectData::StatDelta { amount }) => {
                stats.attack = stats.attack.saturating_add(*amount);
            }
            (EffectType::ModifyDefense, EffectData::StatDelta { amount }) => {
                stats.defense = stats.defense.saturating_add(*amount);
            }
            (EffectType::ContinuousBuff, EffectData::Buff { attack, defense }) => {
                stats.attack = stats.attack.saturating_add(*attack);
                stats.defense = stats.defense.saturating_add(*defense);
            }
            (EffectType::ContinuousDebuff, EffectData::Buff { attack, defense }) => {
                stats.attack = stats.attack.saturating_sub(*attack);
                stats.defense = stats.defense.saturating_sub(*defense);
            }
            _ => {}
        }
        stats
    });

    Stats::new(folded.attack.max(0), folded.defense.max(0))
}

impl EffectStore {
    /// Current stats of a card in `game`. `None` for cards without stats.
    #[must_use]
    pub fn effective_stats(&self, game: GameId, card: &CardInstance) -> Option<Stats> {
        let base = card.stats?;
        Some(effective_stats(
            base,
            self.list_modifiers(game, Some(card.instance_id)),
        ))
    }
}
