//! Static catalogs: the medal table (scoring domain) and the
//! accessory/material tables (crafting domain), plus the provenance registry.
//! Everything is loaded once at startup and treated as immutable afterwards.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod craft;
pub mod medal;
pub mod registry;
pub mod validate;

use craft::CraftCatalog;
use medal::MedalCatalog;
use registry::Registry;

pub const DEFAULT_DATA_DIR: &str = "data";

/// Directory holding the catalog JSON files. Overridable via DARKROAD_DATA_DIR.
pub fn data_dir() -> PathBuf {
    env::var("DARKROAD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// All catalogs the app works over. Loaded once, then read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub medals: MedalCatalog,
    pub craft: CraftCatalog,
    pub registry: Registry,
}

impl Catalogs {
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        Ok(Self {
            medals: medal::load_medal_catalog(&dir.join(medal::MEDALS_FILE))?,
            craft: craft::load_craft_catalog(dir)?,
            registry: registry::load_registry(&dir.join(registry::REGISTRY_FILE)),
        })
    }

    pub fn load_default() -> Result<Self, CatalogError> {
        Self::load_from_dir(&data_dir())
    }
}
