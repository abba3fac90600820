//! Accessory and material records: the crafting-domain catalogs. Accessories
//! form a dependency graph through their component slots; materials are always
//! terminal leaves.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{read_json, CatalogError};

pub const ACCESSORIES_FILE: &str = "accessories.json";
pub const MATERIALS_FILE: &str = "materials.json";

/// A recipe holds at most this many component slots.
pub const MAX_COMPONENT_SLOTS: usize = 5;

/// Display-only stat line on an accessory (e.g. "HP +2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: String,
    pub amount: String,
}

/// One recipe slot. Exactly one of `material_id` / `accessory_id` must be set;
/// both kept optional so malformed records survive loading and are reported by
/// validation or at aggregation time instead of being silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_id: Option<u32>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ComponentRef {
    Material(u32),
    Accessory(u32),
}

impl ComponentSlot {
    /// Resolves the slot to its single reference. None if the slot names
    /// neither or both of a material and an accessory.
    pub fn resolve(&self) -> Option<ComponentRef> {
        match (self.material_id, self.accessory_id) {
            (Some(id), None) => Some(ComponentRef::Material(id)),
            (None, Some(id)) => Some(ComponentRef::Accessory(id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_jp: Option<String>,
    pub rarity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    pub bp_cost: u64,
    /// Terminal leaf: never expanded, even when bp_cost is 0.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub uncraftable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_jp: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryFile {
    #[serde(default)]
    pub data_version: Option<String>,
    pub accessories: Vec<Accessory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialFile {
    #[serde(default)]
    pub data_version: Option<String>,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Default)]
pub struct CraftCatalog {
    accessories: BTreeMap<u32, Accessory>,
    materials: BTreeMap<u32, Material>,
}

impl CraftCatalog {
    pub fn from_parts(accessories: Vec<Accessory>, materials: Vec<Material>) -> Self {
        Self {
            accessories: accessories.into_iter().map(|a| (a.id, a)).collect(),
            materials: materials.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn accessory(&self, id: u32) -> Option<&Accessory> {
        self.accessories.get(&id)
    }

    pub fn material(&self, id: u32) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn accessories(&self) -> impl Iterator<Item = &Accessory> {
        self.accessories.values()
    }

    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }
}

pub fn load_accessory_file(path: &Path) -> Result<AccessoryFile, CatalogError> {
    read_json(path)
}

pub fn load_material_file(path: &Path) -> Result<MaterialFile, CatalogError> {
    read_json(path)
}

pub fn load_craft_catalog(dir: &Path) -> Result<CraftCatalog, CatalogError> {
    let accessories = load_accessory_file(&dir.join(ACCESSORIES_FILE))?.accessories;
    let materials = load_material_file(&dir.join(MATERIALS_FILE))?.materials;
    Ok(CraftCatalog::from_parts(accessories, materials))
}
