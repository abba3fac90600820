//! JSON payload builders for the local API. Each function is a pure view over
//! the startup-loaded catalogs; all heavy lifting happens in the scoring and
//! craft engines.

use serde_json::json;
use thiserror::Error;

use crate::craft::{self, CraftError};
use crate::data::Catalogs;
use crate::scoring::{damage_potential, ScoreOptions};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Display rounding only; engine values stay unrounded.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse `name=1` / `name=true` out of the query string.
fn parse_flag(path: &str, name: &str) -> bool {
    let query = path.split('?').nth(1).unwrap_or("");
    query.split('&').any(|pair| {
        let pair = pair.trim();
        pair == format!("{name}=1") || pair.eq_ignore_ascii_case(&format!("{name}=true"))
    })
}

/// Parse the numeric id segment directly after `prefix`.
fn path_id(path: &str, prefix: &str) -> Result<u32, ApiError> {
    let rest = path
        .strip_prefix(prefix)
        .ok_or_else(|| ApiError::BadRequest(format!("expected path under {prefix}")))?;
    let id_part = rest.split(['/', '?']).next().unwrap_or("");
    id_part
        .parse::<u32>()
        .map_err(|_| ApiError::BadRequest(format!("invalid id '{id_part}'")))
}

pub fn health_payload() -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&json!({
        "status": "ok",
        "service": "darkroad-api",
        "version": env!("CARGO_PKG_VERSION")
    }))?)
}

pub fn medals_payload(catalogs: &Catalogs) -> Result<String, ApiError> {
    let list: Vec<_> = catalogs
        .medals
        .iter()
        .map(|medal| {
            json!({
                "id": medal.id,
                "name": medal.name,
                "rarity": medal.rarity,
                "direction": medal.direction.map(|d| d.as_str()),
                "attribute": medal.attribute.map(|a| a.as_str()),
                "strength": medal.strength,
                "defense": medal.defense,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json!({ "medals": list }))?)
}

/// `GET /api/medals/{id}/score?general=1&attribute=1&supernova=1`
pub fn medal_score_payload(catalogs: &Catalogs, path: &str) -> Result<String, ApiError> {
    let id = path_id(path, "/api/medals/")?;
    let medal = catalogs
        .medals
        .get(id)
        .ok_or_else(|| ApiError::NotFound(format!("medal id {id} not found")))?;

    let options = ScoreOptions {
        include_general_attack_up: parse_flag(path, "general"),
        include_attribute_attack_up: parse_flag(path, "attribute"),
        include_supernova: parse_flag(path, "supernova"),
    };
    let score =
        damage_potential(medal, options).map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(serde_json::to_string_pretty(&json!({
        "medal_id": id,
        "name": medal.name,
        "options": options,
        "damage_potential": score,
        "display": round2(score),
    }))?)
}

pub fn accessories_payload(catalogs: &Catalogs) -> Result<String, ApiError> {
    let list: Vec<_> = catalogs
        .craft
        .accessories()
        .map(|accessory| {
            json!({
                "id": accessory.id,
                "name": accessory.name,
                "rarity": accessory.rarity,
                "bp_cost": accessory.bp_cost,
                "uncraftable": accessory.uncraftable,
                "effect": accessory.effect,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json!({ "accessories": list }))?)
}

pub fn materials_payload(catalogs: &Catalogs) -> Result<String, ApiError> {
    let list: Vec<_> = catalogs
        .craft
        .materials()
        .map(|material| {
            json!({
                "id": material.id,
                "name": material.name,
                "text": material.text,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json!({ "materials": list }))?)
}

/// `GET /api/accessories/{id}/components` — single-level ingredient list.
pub fn components_payload(catalogs: &Catalogs, path: &str) -> Result<String, ApiError> {
    let id = path_id(path, "/api/accessories/")?;
    let accessory = catalogs
        .craft
        .accessory(id)
        .ok_or_else(|| ApiError::NotFound(format!("accessory id {id} not found")))?;

    let components =
        craft::direct_components(&catalogs.craft, id).map_err(map_craft_error)?;
    Ok(serde_json::to_string_pretty(&json!({
        "accessory_id": id,
        "name": accessory.name,
        "components": components,
    }))?)
}

/// `GET /api/accessories/{id}/craft` — full recursive aggregation.
pub fn craft_payload(catalogs: &Catalogs, path: &str) -> Result<String, ApiError> {
    let id = path_id(path, "/api/accessories/")?;
    let accessory = catalogs
        .craft
        .accessory(id)
        .ok_or_else(|| ApiError::NotFound(format!("accessory id {id} not found")))?;

    let summary = craft::aggregate(&catalogs.craft, id).map_err(map_craft_error)?;
    let materials: Vec<_> = summary
        .material_totals
        .iter()
        .map(|(&material_id, &quantity)| {
            json!({
                "id": material_id,
                "name": catalogs.craft.material(material_id).map(|m| m.name.as_str()),
                "quantity": quantity,
            })
        })
        .collect();
    let accessories: Vec<_> = summary
        .accessory_totals
        .iter()
        .map(|(&accessory_id, &quantity)| {
            json!({
                "id": accessory_id,
                "name": catalogs.craft.accessory(accessory_id).map(|a| a.name.as_str()),
                "quantity": quantity,
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&json!({
        "accessory_id": id,
        "name": accessory.name,
        "total_bp": summary.total_bp,
        "materials": materials,
        "accessories": accessories,
    }))?)
}

pub fn data_version_payload(catalogs: &Catalogs) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&json!({
        "datasets": catalogs.registry
    }))?)
}

// Engine errors surfacing here are data faults, not caller faults; the root
// id was already resolved by the payload function.
fn map_craft_error(err: CraftError) -> ApiError {
    ApiError::Internal(err.to_string())
}
