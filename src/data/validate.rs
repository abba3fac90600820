//! Catalog validation: structural checks over the loaded datasets, reported
//! with a severity per finding so the CLI can fail on errors while still
//! surfacing oddities worth a look.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::data::craft::{Accessory, ComponentRef, Material, MAX_COMPONENT_SLOTS};
use crate::data::medal::Medal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Checks the medal dataset as loaded from file (before the id map collapses
/// duplicates).
pub fn validate_medals(medals: &[Medal]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids = BTreeSet::new();

    for medal in medals {
        let context = format!("medal[{}] '{}'", medal.id, medal.name);

        if !seen_ids.insert(medal.id) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate id {}", medal.id),
            );
        }
        if medal.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "empty name");
        }
        if medal.strength < 0.0 {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                format!("negative strength {}", medal.strength),
            );
        }

        if let Some(buffs) = medal.self_buffs() {
            if let Some(tier) = buffs.general_attack_up {
                if !(1..=15).contains(&tier) {
                    report.push(
                        ValidationSeverity::Error,
                        context.clone(),
                        format!("general attack up tier {tier} outside 1..=15"),
                    );
                }
            }
            let mut seen_kinds = BTreeSet::new();
            for buff in &buffs.attribute_buffs {
                if !(1..=17).contains(&buff.tier) {
                    report.push(
                        ValidationSeverity::Error,
                        context.clone(),
                        format!("{} tier {} outside 1..=17", buff.kind.as_str(), buff.tier),
                    );
                }
                if !seen_kinds.insert(buff.kind) {
                    report.push(
                        ValidationSeverity::Warning,
                        context.clone(),
                        format!("duplicate {} buff; contributions will sum", buff.kind.as_str()),
                    );
                }
            }
        }

        if let Some(supernova) = &medal.supernova {
            if supernova.multiplier.is_none() {
                report.push(
                    ValidationSeverity::Info,
                    context,
                    "supernova without multiplier; defaults to 1",
                );
            }
        }
    }

    report
}

/// Checks the crafting datasets as loaded from file: slot shape, reference
/// integrity, and acyclicity of the accessory graph.
pub fn validate_craft(accessories: &[Accessory], materials: &[Material]) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut material_ids = BTreeSet::new();
    for material in materials {
        let context = format!("material[{}] '{}'", material.id, material.name);
        if !material_ids.insert(material.id) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate id {}", material.id),
            );
        }
        if material.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context, "empty name");
        }
    }

    let mut by_id = BTreeMap::new();
    for accessory in accessories {
        let context = format!("accessory[{}] '{}'", accessory.id, accessory.name);
        if by_id.insert(accessory.id, accessory).is_some() {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate id {}", accessory.id),
            );
        }
        if accessory.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "empty name");
        }
        if accessory.components.len() > MAX_COMPONENT_SLOTS {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "{} component slots exceeds the maximum of {MAX_COMPONENT_SLOTS}",
                    accessory.components.len()
                ),
            );
        }
        if accessory.uncraftable {
            if !accessory.components.is_empty() {
                report.push(
                    ValidationSeverity::Warning,
                    context.clone(),
                    "uncraftable accessory has components; they are never expanded",
                );
            }
            if accessory.bp_cost > 0 {
                report.push(
                    ValidationSeverity::Warning,
                    context.clone(),
                    format!(
                        "uncraftable accessory has bp_cost {}; leaves never contribute BP",
                        accessory.bp_cost
                    ),
                );
            }
        }
    }

    for accessory in accessories {
        for (slot, component) in accessory.components.iter().enumerate() {
            let context = format!("accessory[{}].components[{slot}]", accessory.id);
            let Some(reference) = component.resolve() else {
                report.push(
                    ValidationSeverity::Error,
                    context,
                    "slot references neither or both of a material and an accessory",
                );
                continue;
            };
            if component.quantity == 0 {
                report.push(ValidationSeverity::Error, context.clone(), "zero quantity");
            }
            match reference {
                ComponentRef::Material(id) if !material_ids.contains(&id) => {
                    report.push(
                        ValidationSeverity::Error,
                        context,
                        format!("unknown material id {id}"),
                    );
                }
                ComponentRef::Accessory(id) if !by_id.contains_key(&id) => {
                    report.push(
                        ValidationSeverity::Error,
                        context,
                        format!("unknown accessory id {id}"),
                    );
                }
                _ => {}
            }
        }
    }

    if let Some(cycle) = find_cycle(&by_id) {
        report.push(
            ValidationSeverity::Error,
            "accessory graph",
            format!("recipe cycle: {cycle:?}"),
        );
    }

    report
}

/// DFS over craftable-accessory edges only (uncraftable leaves are never
/// expanded by aggregation, so they cannot close a cycle). Returns the
/// in-progress path when a back-edge is found.
fn find_cycle(by_id: &BTreeMap<u32, &Accessory>) -> Option<Vec<u32>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        InProgress,
        Done,
    }

    fn visit(
        id: u32,
        by_id: &BTreeMap<u32, &Accessory>,
        marks: &mut BTreeMap<u32, Mark>,
        path: &mut Vec<u32>,
    ) -> bool {
        match marks.get(&id) {
            Some(Mark::Done) => return false,
            Some(Mark::InProgress) => {
                path.push(id);
                return true;
            }
            None => {}
        }
        marks.insert(id, Mark::InProgress);
        path.push(id);

        if let Some(accessory) = by_id.get(&id) {
            for component in &accessory.components {
                if let Some(ComponentRef::Accessory(child)) = component.resolve() {
                    let craftable = by_id.get(&child).map_or(false, |c| !c.uncraftable);
                    if craftable && visit(child, by_id, marks, path) {
                        return true;
                    }
                }
            }
        }

        path.pop();
        marks.insert(id, Mark::Done);
        false
    }

    let mut marks = BTreeMap::new();
    for (&id, accessory) in by_id {
        if accessory.uncraftable {
            continue;
        }
        let mut path = Vec::new();
        if visit(id, by_id, &mut marks, &mut path) {
            return Some(path);
        }
    }
    None
}
