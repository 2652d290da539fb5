//! Thing definition schema

use roe_core::{hash, DefName, ItemProps, SeedLink, ShortHash, ThingDef};
use serde::{Deserialize, Serialize};

/// A thing as written in content files
///
/// Authors may pin the compact identifier; otherwise it is derived from the
/// name with the same hash the allocator probes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThingSchema {
    pub name: DefName,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_hash: Option<u16>,
    #[serde(default)]
    pub market_value: f64,
    #[serde(default)]
    pub categories: Vec<DefName>,
    #[serde(default)]
    pub item: Option<ItemProps>,
    #[serde(default)]
    pub seed: Option<SeedLink>,
}

impl ThingSchema {
    /// Resolve into the definition registered with the database
    pub fn into_def(self) -> ThingDef {
        let short_hash = match self.short_hash {
            Some(raw) => ShortHash(raw),
            None => hash::short_hash(self.name.as_str()),
        };
        ThingDef {
            name: self.name,
            label: self.label,
            description: self.description,
            short_hash,
            market_value: self.market_value,
            categories: self.categories,
            item: self.item,
            seed: self.seed,
        }
    }
}
