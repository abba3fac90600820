//! Tier → multiplier lookup tables for the self-buff terms of the
//! damage-potential formula. Out-of-range tiers are rejected instead of
//! propagating NaN through the arithmetic.

use crate::data::medal::AttributeBuffKind;
use crate::scoring::ScoreError;

/// General-attack-up multipliers, indexed by tier 1..=15.
pub const GENERAL_ATTACK_UP: [f64; 15] = [
    1.2, 1.35, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0, 2.1, 2.2, 2.3, 2.4, 2.5, 2.6, 2.7,
];

/// Attribute-attack-up multipliers, indexed by tier 1..=17. Shared by all
/// five attribute-buff kinds.
pub const ATTRIBUTE_ATTACK_UP: [f64; 17] = [
    0.25, 0.55, 0.9, 1.1, 1.3, 1.5, 1.7, 1.9, 2.1, 2.3, 2.5, 2.7, 2.9, 3.1, 3.3, 3.5, 3.7,
];

pub fn general_attack_up(tier: u8) -> Result<f64, ScoreError> {
    match tier {
        1..=15 => Ok(GENERAL_ATTACK_UP[usize::from(tier) - 1]),
        _ => Err(ScoreError::GeneralTierOutOfRange { tier }),
    }
}

pub fn attribute_attack_up(kind: AttributeBuffKind, tier: u8) -> Result<f64, ScoreError> {
    match tier {
        1..=17 => Ok(ATTRIBUTE_ATTACK_UP[usize::from(tier) - 1]),
        _ => Err(ScoreError::AttributeTierOutOfRange { kind, tier }),
    }
}
