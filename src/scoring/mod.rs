//! Damage-potential scoring: a pure function over a single medal record plus
//! a set of toggles. Missing optional fields resolve to neutral defaults
//! (0 for additive terms, 1 for multiplicative terms), never to errors; the
//! only failure mode is a buff tier outside its documented table range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::medal::{AttributeBuffKind, Medal, SelfBuffs, SpecialAttack};

pub mod tables;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("general attack up tier {tier} outside supported range 1..=15")]
    GeneralTierOutOfRange { tier: u8 },
    #[error("{kind} tier {tier} outside supported range 1..=17")]
    AttributeTierOutOfRange { kind: AttributeBuffKind, tier: u8 },
}

/// Scoring toggles. Each term is only evaluated (and its tier only looked up)
/// when the corresponding toggle is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    pub include_general_attack_up: bool,
    pub include_attribute_attack_up: bool,
    pub include_supernova: bool,
}

/// Computes the damage-potential score for one medal.
///
/// The term order is fixed for floating-point reproducibility:
///
/// ```text
/// (strength + strength_plus + supernova_strength_plus)
///   * special_attack * supernova_multiplier
///   * ((1 + guilt/100) + guilt_buff/100)
///   * general_attack_up * attribute_attack_up * attribute_boost
/// ```
///
/// `strength_plus` is read only from the medal's own ability self-buffs;
/// `supernova_strength_plus` only from the supernova's. The supernova
/// multiplier stacks with the medal's own special-attack multiplier.
pub fn damage_potential(medal: &Medal, options: ScoreOptions) -> Result<f64, ScoreError> {
    let self_buffs = medal.self_buffs();
    let supernova = medal.supernova.as_ref();

    let strength_plus = self_buffs.and_then(|b| b.strength_plus).unwrap_or(0.0);
    let supernova_strength_plus = if options.include_supernova {
        supernova
            .and_then(|s| s.self_buffs.as_ref())
            .and_then(|b| b.strength_plus)
            .unwrap_or(0.0)
    } else {
        0.0
    };
    let base = medal.strength + strength_plus + supernova_strength_plus;

    let special = medal
        .special_attack
        .as_ref()
        .map(SpecialAttack::potential)
        .unwrap_or(1.0);
    let supernova_multiplier = if options.include_supernova {
        supernova.and_then(|s| s.multiplier).unwrap_or(1.0)
    } else {
        1.0
    };

    let guilt = 1.0 + f64::from(medal.guilt.unwrap_or(0)) / 100.0;
    let guilt_buff = f64::from(self_buffs.and_then(|b| b.guilt_buff).unwrap_or(0)) / 100.0;

    let general_up = match self_buffs.and_then(|b| b.general_attack_up) {
        Some(tier) if options.include_general_attack_up => tables::general_attack_up(tier)?,
        _ => 1.0,
    };

    let attribute_up = match self_buffs {
        Some(buffs) if options.include_attribute_attack_up => attribute_multiplier(medal, buffs)?,
        _ => 1.0,
    };

    let attribute_boost = if self_buffs.is_some_and(|b| b.attribute_always) {
        1.5
    } else {
        1.0
    };

    Ok(base
        * special
        * supernova_multiplier
        * (guilt + guilt_buff)
        * general_up
        * attribute_up
        * attribute_boost)
}

/// Sums the attribute-attack-up contributions whose buff kind matches the
/// medal's Direction/Attribute tags. Every buff present is looked up (so an
/// out-of-range tier is rejected even on a non-matching slot). A matching sum
/// of exactly 0 yields multiplier 1, never 0.
pub fn attribute_multiplier(medal: &Medal, buffs: &SelfBuffs) -> Result<f64, ScoreError> {
    let mut sum = 0.0;
    for buff in &buffs.attribute_buffs {
        let value = tables::attribute_attack_up(buff.kind, buff.tier)?;
        if buff.kind.applies_to(medal) {
            sum += value;
        }
    }
    Ok(if sum == 0.0 { 1.0 } else { sum })
}
