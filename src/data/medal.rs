//! Medal records: the scoring-domain catalog. Records are variant-shaped, so
//! every conditionally-present field is structurally optional here; neutral
//! defaults (0 / multiplier 1) are applied by the scorer, never baked into
//! the data model.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{read_json, CatalogError};

pub const MEDALS_FILE: &str = "medals.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Upright,
    Reversed,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upright => "Upright",
            Self::Reversed => "Reversed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Power,
    Speed,
    Magic,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Speed => "Speed",
            Self::Magic => "Magic",
        }
    }
}

/// Special-attack multiplier: either a single value or a conditional
/// low/high pair (e.g. "more damage the lower the user's HP").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecialAttack {
    Fixed(f64),
    Conditional { low: f64, high: f64, condition: String },
}

impl SpecialAttack {
    /// The value the damage-potential formula uses: the fixed multiplier, or
    /// the high end of a conditional pair.
    pub fn potential(&self) -> f64 {
        match self {
            Self::Fixed(value) => *value,
            Self::Conditional { high, .. } => *high,
        }
    }
}

/// The five attribute-buff slots a self-buff can occupy. Each matches exactly
/// one Direction or Attribute tag on the owning medal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeBuffKind {
    UprightAction,
    ReversedAction,
    PowerAction,
    SpeedAction,
    MagicAction,
}

impl AttributeBuffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UprightAction => "upright_action",
            Self::ReversedAction => "reversed_action",
            Self::PowerAction => "power_action",
            Self::SpeedAction => "speed_action",
            Self::MagicAction => "magic_action",
        }
    }

    /// Whether this buff slot matches the medal's Direction/Attribute tags.
    pub fn applies_to(self, medal: &Medal) -> bool {
        match self {
            Self::UprightAction => medal.direction == Some(Direction::Upright),
            Self::ReversedAction => medal.direction == Some(Direction::Reversed),
            Self::PowerAction => medal.attribute == Some(Attribute::Power),
            Self::SpeedAction => medal.attribute == Some(Attribute::Speed),
            Self::MagicAction => medal.attribute == Some(Attribute::Magic),
        }
    }
}

impl std::fmt::Display for AttributeBuffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBuff {
    pub kind: AttributeBuffKind,
    pub tier: u8,
}

/// Passive bonuses granted by an ability (or a supernova) to the medal itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfBuffs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength_plus: Option<f64>,
    /// General-attack-up tier, 1..=15.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_attack_up: Option<u8>,
    /// Attribute-attack-up buffs, tier 1..=17 each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_buffs: Vec<AttributeBuff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guilt_buff: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub attribute_always: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_buffs: Option<SelfBuffs>,
}

/// Alternate ability mode present on a subset of medals. Only `strength_plus`
/// is read from its self-buffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supernova {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_buffs: Option<SelfBuffs>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medal {
    pub id: u32,
    pub name: String,
    pub rarity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    pub strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_attack: Option<SpecialAttack>,
    /// Guilt percent, 0..=100 and above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guilt: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<Ability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supernova: Option<Supernova>,
}

impl Medal {
    /// Self-buffs from the medal's own ability (not the supernova's).
    pub fn self_buffs(&self) -> Option<&SelfBuffs> {
        self.ability.as_ref()?.self_buffs.as_ref()
    }
}

/// On-disk shape of data/medals.json. Holes in the dense id range are simply
/// absent records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedalFile {
    #[serde(default)]
    pub data_version: Option<String>,
    pub medals: Vec<Medal>,
}

#[derive(Debug, Clone, Default)]
pub struct MedalCatalog {
    medals: BTreeMap<u32, Medal>,
}

impl MedalCatalog {
    pub fn from_medals(medals: Vec<Medal>) -> Self {
        Self {
            medals: medals.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Medal> {
        self.medals.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Medal> {
        self.medals.values()
    }

    pub fn len(&self) -> usize {
        self.medals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medals.is_empty()
    }
}

pub fn load_medal_file(path: &Path) -> Result<MedalFile, CatalogError> {
    read_json(path)
}

pub fn load_medal_catalog(path: &Path) -> Result<MedalCatalog, CatalogError> {
    Ok(MedalCatalog::from_medals(load_medal_file(path)?.medals))
}
