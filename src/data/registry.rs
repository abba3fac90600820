//! Dataset provenance: source and version per catalog, shown by the API as
//! "data as of". Missing or unreadable registry is not an error; the app just
//! reports nothing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSetEntry {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub path: String,
}

pub type Registry = HashMap<String, DataSetEntry>;

pub const REGISTRY_FILE: &str = "registry.json";

pub fn load_registry(path: &Path) -> Registry {
    let Ok(raw) = fs::read_to_string(path) else {
        return Registry::new();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}
