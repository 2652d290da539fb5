//! Schema definitions for RON content files

pub mod thing;

pub use thing::ThingSchema;

use roe_core::{CategoryDef, RegionProfile, TerrainDef};
use serde::Deserialize;

/// `(things: [...])`
#[derive(Debug, Deserialize)]
pub(crate) struct ThingFile {
    pub things: Vec<ThingSchema>,
}

/// `(categories: [...])`
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryFile {
    pub categories: Vec<CategoryDef>,
}

/// `(terrains: [...])`
#[derive(Debug, Deserialize)]
pub(crate) struct TerrainFile {
    pub terrains: Vec<TerrainDef>,
}

/// `(regions: [...])`
#[derive(Debug, Deserialize)]
pub(crate) struct RegionFile {
    pub regions: Vec<RegionProfile>,
}
