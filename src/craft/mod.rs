//! Crafting-cost aggregation: depth-first expansion of an accessory's recipe
//! graph into summed leaf quantities and a total BP cost. Accumulators are
//! constructed fresh per call and returned, so concurrent or repeated calls
//! never observe each other's state.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::data::craft::{Accessory, ComponentRef, CraftCatalog};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftError {
    #[error("accessory id {0} not found in catalog")]
    UnknownAccessory(u32),
    #[error("material id {material_id} referenced by accessory {accessory_id} not found in catalog")]
    UnknownMaterial { material_id: u32, accessory_id: u32 },
    #[error("accessory {accessory_id} component slot {slot} references neither or both of a material and an accessory")]
    MalformedSlot { accessory_id: u32, slot: usize },
    #[error("cyclic recipe: accessory {repeated} already on expansion path {path:?}")]
    CyclicRecipe { path: Vec<u32>, repeated: u32 },
}

/// Aggregation result: total crafting cost plus summed leaf quantities by id.
/// Only uncraftable accessories appear in `accessory_totals`; intermediate
/// craftable accessories are expanded away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CraftSummary {
    pub total_bp: u64,
    pub material_totals: BTreeMap<u32, u64>,
    pub accessory_totals: BTreeMap<u32, u64>,
}

/// Recursively expands the recipe of `root_id` down to its leaves.
///
/// Each craftable accessory contributes its own `bp_cost` once per unit
/// crafted; uncraftable accessories and materials are terminal leaves whose
/// quantities accumulate in the summary (an uncraftable leaf never
/// contributes BP). A cycle in the accessory graph is reported as
/// [`CraftError::CyclicRecipe`] instead of recursing unboundedly.
pub fn aggregate(catalog: &CraftCatalog, root_id: u32) -> Result<CraftSummary, CraftError> {
    let root = catalog
        .accessory(root_id)
        .ok_or(CraftError::UnknownAccessory(root_id))?;

    let mut summary = CraftSummary::default();
    let mut path = Vec::new();
    expand(catalog, root, 1, &mut summary, &mut path)?;
    Ok(summary)
}

/// One expansion step, carrying the multiplier accumulated along the path
/// (crafting N of the parent means N × quantity of each component).
fn expand(
    catalog: &CraftCatalog,
    accessory: &Accessory,
    count: u64,
    summary: &mut CraftSummary,
    path: &mut Vec<u32>,
) -> Result<(), CraftError> {
    summary.total_bp += accessory.bp_cost * count;
    path.push(accessory.id);

    for (slot, component) in accessory.components.iter().enumerate() {
        let reference = component.resolve().ok_or(CraftError::MalformedSlot {
            accessory_id: accessory.id,
            slot,
        })?;
        let quantity = count * u64::from(component.quantity);

        match reference {
            ComponentRef::Material(material_id) => {
                if catalog.material(material_id).is_none() {
                    return Err(CraftError::UnknownMaterial {
                        material_id,
                        accessory_id: accessory.id,
                    });
                }
                *summary.material_totals.entry(material_id).or_insert(0) += quantity;
            }
            ComponentRef::Accessory(child_id) => {
                let child = catalog
                    .accessory(child_id)
                    .ok_or(CraftError::UnknownAccessory(child_id))?;
                if child.uncraftable {
                    *summary.accessory_totals.entry(child_id).or_insert(0) += quantity;
                } else {
                    if path.contains(&child_id) {
                        return Err(CraftError::CyclicRecipe {
                            path: path.clone(),
                            repeated: child_id,
                        });
                    }
                    expand(catalog, child, quantity, summary, path)?;
                }
            }
        }
    }

    path.pop();
    Ok(())
}

/// One row of the single-level ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLine {
    #[serde(flatten)]
    pub reference: ComponentRef,
    pub name: String,
    pub quantity: u32,
    /// Whether the referenced accessory can itself be expanded further.
    pub craftable: bool,
}

/// The recipe of `root_id` read verbatim: each slot resolved and
/// name-annotated, with no recursion and no summing.
pub fn direct_components(
    catalog: &CraftCatalog,
    root_id: u32,
) -> Result<Vec<ComponentLine>, CraftError> {
    let root = catalog
        .accessory(root_id)
        .ok_or(CraftError::UnknownAccessory(root_id))?;

    let mut lines = Vec::with_capacity(root.components.len());
    for (slot, component) in root.components.iter().enumerate() {
        let reference = component.resolve().ok_or(CraftError::MalformedSlot {
            accessory_id: root_id,
            slot,
        })?;
        let line = match reference {
            ComponentRef::Material(material_id) => {
                let material =
                    catalog
                        .material(material_id)
                        .ok_or(CraftError::UnknownMaterial {
                            material_id,
                            accessory_id: root_id,
                        })?;
                ComponentLine {
                    reference,
                    name: material.name.clone(),
                    quantity: component.quantity,
                    craftable: false,
                }
            }
            ComponentRef::Accessory(child_id) => {
                let child = catalog
                    .accessory(child_id)
                    .ok_or(CraftError::UnknownAccessory(child_id))?;
                ComponentLine {
                    reference,
                    name: child.name.clone(),
                    quantity: component.quantity,
                    craftable: !child.uncraftable,
                }
            }
        };
        lines.push(line);
    }
    Ok(lines)
}
