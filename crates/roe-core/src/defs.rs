//! Host definitions and the definition database

use crate::{Affinity, DefName, Error, Result, ShortHash};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Item attributes carried by haulable things
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProps {
    pub max_hit_points: f32,
    pub mass: f32,
    pub flammability: f32,
    /// Hit points lost per day while unroofed
    pub deterioration_rate: f32,
    pub stack_limit: u32,
    #[serde(default)]
    pub rot: Option<Rottable>,
}

/// Decay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rottable {
    pub days_to_rot_start: f32,
    pub rot_destroys: bool,
}

/// Extension linking a generated seed back to its species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLink {
    pub linked_source: DefName,
    pub affinity: Affinity,
}

/// A thing (item type) definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThingDef {
    pub name: DefName,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_hash: ShortHash,
    #[serde(default)]
    pub market_value: f64,
    #[serde(default)]
    pub categories: Vec<DefName>,
    #[serde(default)]
    pub item: Option<ItemProps>,
    #[serde(default)]
    pub seed: Option<SeedLink>,
}

impl ThingDef {
    /// Create a bare thing definition
    pub fn new(name: impl Into<DefName>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: String::new(),
            short_hash: ShortHash::default(),
            market_value: 0.0,
            categories: Vec::new(),
            item: None,
            seed: None,
        }
    }

    /// Set the market value
    pub fn with_market_value(mut self, value: f64) -> Self {
        self.market_value = value;
        self
    }

    /// Add a category
    pub fn with_category(mut self, category: impl Into<DefName>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Pin the compact identifier
    pub fn with_short_hash(mut self, hash: u16) -> Self {
        self.short_hash = ShortHash(hash);
        self
    }

    /// Check whether the thing belongs to a category
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.as_str() == category)
    }
}

/// A thing category definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: DefName,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub parent: Option<DefName>,
}

impl CategoryDef {
    /// Create a top-level category
    pub fn new(name: impl Into<DefName>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            parent: None,
        }
    }
}

/// A terrain definition. Liquid terrain carries the `Water` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDef {
    pub name: DefName,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TerrainDef {
    /// Create a terrain with no tags
    pub fn new(name: impl Into<DefName>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            tags: Vec::new(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check if the terrain carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// One entry of a ranked fish list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishChance {
    pub source: DefName,
    pub chance: f32,
}

impl FishChance {
    /// Create a fish list entry
    pub fn new(source: impl Into<DefName>, chance: f32) -> Self {
        Self {
            source: source.into(),
            chance,
        }
    }
}

/// Species occurring in a region, partitioned by affinity and rarity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishTable {
    pub freshwater_common: Vec<FishChance>,
    pub freshwater_uncommon: Vec<FishChance>,
    pub saltwater_common: Vec<FishChance>,
    pub saltwater_uncommon: Vec<FishChance>,
}

impl FishTable {
    /// The four lists in classification order: fresh common, fresh
    /// uncommon, salt common, salt uncommon
    pub fn ranked(&self) -> [(&[FishChance], Affinity); 4] {
        [
            (self.freshwater_common.as_slice(), Affinity::Fresh),
            (self.freshwater_uncommon.as_slice(), Affinity::Fresh),
            (self.saltwater_common.as_slice(), Affinity::Salt),
            (self.saltwater_uncommon.as_slice(), Affinity::Salt),
        ]
    }
}

/// A region (biome) profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub name: DefName,
    #[serde(default)]
    pub label: String,
    /// Regions without water life have no table
    #[serde(default)]
    pub fish: Option<FishTable>,
}

impl RegionProfile {
    /// Create a region with a fish table
    pub fn new(name: impl Into<DefName>, fish: FishTable) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            fish: Some(fish),
        }
    }
}

/// Every definition the host has registered
#[derive(Debug, Clone, Default)]
pub struct DefDatabase {
    things: IndexMap<DefName, ThingDef>,
    /// Index: category -> thing names
    by_category: IndexMap<DefName, Vec<DefName>>,
    categories: IndexMap<DefName, CategoryDef>,
    terrains: IndexMap<DefName, TerrainDef>,
    regions: IndexMap<DefName, RegionProfile>,
}

impl DefDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a thing definition
    pub fn add_thing(&mut self, def: ThingDef) -> Result<()> {
        if self.things.contains_key(&def.name) {
            return Err(Error::DuplicateDefinition(def.name.to_string()));
        }
        for category in &def.categories {
            self.by_category
                .entry(category.clone())
                .or_default()
                .push(def.name.clone());
        }
        self.things.insert(def.name.clone(), def);
        Ok(())
    }

    /// Look up a thing by name
    pub fn thing(&self, name: &str) -> Option<&ThingDef> {
        self.things.get(name)
    }

    /// Check if a thing is registered
    pub fn contains_thing(&self, name: &str) -> bool {
        self.things.contains_key(name)
    }

    /// All things in registration order
    pub fn things(&self) -> impl Iterator<Item = &ThingDef> {
        self.things.values()
    }

    /// Number of registered things
    pub fn thing_count(&self) -> usize {
        self.things.len()
    }

    /// Things belonging to a category, in registration order
    pub fn things_in_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a ThingDef> + 'a {
        self.by_category
            .get(category)
            .into_iter()
            .flatten()
            .filter_map(move |name| self.things.get(name))
    }

    /// Compact identifiers of every registered thing
    pub fn short_hashes(&self) -> impl Iterator<Item = ShortHash> + '_ {
        self.things.values().map(|def| def.short_hash)
    }

    /// Register a category
    pub fn add_category(&mut self, def: CategoryDef) -> Result<()> {
        if self.categories.contains_key(&def.name) {
            return Err(Error::DuplicateDefinition(def.name.to_string()));
        }
        self.categories.insert(def.name.clone(), def);
        Ok(())
    }

    /// Look up a category by name
    pub fn category(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.get(name)
    }

    /// Register a terrain
    pub fn add_terrain(&mut self, def: TerrainDef) -> Result<()> {
        if self.terrains.contains_key(&def.name) {
            return Err(Error::DuplicateDefinition(def.name.to_string()));
        }
        self.terrains.insert(def.name.clone(), def);
        Ok(())
    }

    /// Look up a terrain by name
    pub fn terrain(&self, name: &str) -> Option<&TerrainDef> {
        self.terrains.get(name)
    }

    /// Register a region profile
    pub fn add_region(&mut self, def: RegionProfile) -> Result<()> {
        if self.regions.contains_key(&def.name) {
            return Err(Error::DuplicateDefinition(def.name.to_string()));
        }
        self.regions.insert(def.name.clone(), def);
        Ok(())
    }

    /// All region profiles in registration order
    pub fn regions(&self) -> impl Iterator<Item = &RegionProfile> {
        self.regions.values()
    }
}
