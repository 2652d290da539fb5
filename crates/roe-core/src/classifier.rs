//! Species affinity classification from region profiles
//!
//! Regions list the species that occur in their fresh and salt water. The
//! classifier walks every region once and gives each species the affinity of
//! the first list it appears in:
//!
//! 1. regions in registration order
//! 2. within a region: freshwater common, freshwater uncommon, saltwater
//!    common, saltwater uncommon
//!
//! First write wins. A species listed as both fresh and salt in one region
//! is Fresh; across regions the earlier region decides. Species no region
//! lists get the configured default.

use crate::{Affinity, DefDatabase, DefName};
use std::collections::HashMap;
use tracing::{debug, info};

/// Cached species -> affinity classification
///
/// # Example
///
/// ```
/// use roe_core::{Affinity, DefDatabase, DefName, FishChance, FishTable, RegionProfile, SourceClassifier};
///
/// let mut db = DefDatabase::new();
/// db.add_region(RegionProfile::new("Coast", FishTable {
///     saltwater_common: vec![FishChance::new("Fish_Cod", 1.0)],
///     ..FishTable::default()
/// })).unwrap();
///
/// let mut classifier = SourceClassifier::new(Affinity::Fresh);
/// assert_eq!(classifier.classify(&db, &DefName::new("Fish_Cod")), Affinity::Salt);
/// assert_eq!(classifier.classify(&db, &DefName::new("Fish_Carp")), Affinity::Fresh);
/// ```
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    default: Affinity,
    cache: Option<HashMap<DefName, Affinity>>,
}

impl SourceClassifier {
    /// Create a classifier falling back to `default` for unlisted species
    pub fn new(default: Affinity) -> Self {
        Self {
            default,
            cache: None,
        }
    }

    /// Affinity of a species, analyzing the regions on first use
    pub fn classify(&mut self, db: &DefDatabase, source: &DefName) -> Affinity {
        let default = self.default;
        self.analyze(db).get(source).copied().unwrap_or(default)
    }

    /// Build the cache if it has not been built yet and return it
    pub fn analyze(&mut self, db: &DefDatabase) -> &HashMap<DefName, Affinity> {
        self.cache.get_or_insert_with(|| Self::scan(db))
    }

    /// Cached affinity without triggering analysis; `None` for unlisted or
    /// not yet analyzed species
    pub fn lookup(&self, source: &str) -> Option<Affinity> {
        self.cache.as_ref().and_then(|cache| cache.get(source).copied())
    }

    /// Check if the scan has run
    pub fn is_analyzed(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop the cache; the next classification rescans every region
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Affinity used for unlisted species
    pub fn default_affinity(&self) -> Affinity {
        self.default
    }

    fn scan(db: &DefDatabase) -> HashMap<DefName, Affinity> {
        let mut affinities = HashMap::new();
        for region in db.regions() {
            let Some(fish) = &region.fish else {
                continue;
            };
            for (list, affinity) in fish.ranked() {
                for entry in list {
                    affinities.entry(entry.source.clone()).or_insert_with(|| {
                        debug!(source = %entry.source, region = %region.name, %affinity, "classified species");
                        affinity
                    });
                }
            }
        }
        info!(species = affinities.len(), "analyzed water affinities");
        affinities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FishChance, FishTable, RegionProfile};

    fn region(name: &str, table: FishTable) -> RegionProfile {
        RegionProfile::new(name, table)
    }

    #[test]
    fn test_salt_only_species() {
        let mut db = DefDatabase::new();
        db.add_region(region(
            "Ocean",
            FishTable {
                saltwater_common: vec![FishChance::new("X", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();

        let mut classifier = SourceClassifier::new(Affinity::Fresh);
        assert_eq!(classifier.classify(&db, &DefName::new("X")), Affinity::Salt);
    }

    #[test]
    fn test_fresh_region_first_wins() {
        let mut db = DefDatabase::new();
        db.add_region(region(
            "Forest",
            FishTable {
                freshwater_common: vec![FishChance::new("X", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();
        db.add_region(region(
            "Coast",
            FishTable {
                saltwater_common: vec![FishChance::new("X", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();

        let mut classifier = SourceClassifier::new(Affinity::Salt);
        assert_eq!(classifier.classify(&db, &DefName::new("X")), Affinity::Fresh);
    }

    #[test]
    fn test_earlier_salt_region_wins() {
        let mut db = DefDatabase::new();
        db.add_region(region(
            "Coast",
            FishTable {
                saltwater_uncommon: vec![FishChance::new("Salmon", 0.2)],
                ..FishTable::default()
            },
        ))
        .unwrap();
        db.add_region(region(
            "Forest",
            FishTable {
                freshwater_common: vec![FishChance::new("Salmon", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();

        let mut classifier = SourceClassifier::new(Affinity::Fresh);
        assert_eq!(classifier.classify(&db, &DefName::new("Salmon")), Affinity::Salt);
    }

    #[test]
    fn test_fresh_beats_salt_within_region() {
        let mut db = DefDatabase::new();
        db.add_region(region(
            "Estuary",
            FishTable {
                freshwater_uncommon: vec![FishChance::new("Salmon", 0.1)],
                saltwater_common: vec![FishChance::new("Salmon", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();

        let mut classifier = SourceClassifier::new(Affinity::Salt);
        assert_eq!(classifier.classify(&db, &DefName::new("Salmon")), Affinity::Fresh);
    }

    #[test]
    fn test_unlisted_species_gets_default() {
        let db = DefDatabase::new();
        let mut classifier = SourceClassifier::new(Affinity::Salt);
        assert_eq!(classifier.classify(&db, &DefName::new("Trout")), Affinity::Salt);
        assert!(classifier.is_analyzed());
        assert_eq!(classifier.lookup("Trout"), None);
    }

    #[test]
    fn test_region_without_table_skipped() {
        let mut db = DefDatabase::new();
        let mut desert = region("Desert", FishTable::default());
        desert.fish = None;
        db.add_region(desert).unwrap();

        let mut classifier = SourceClassifier::new(Affinity::Fresh);
        assert!(classifier.analyze(&db).is_empty());
    }

    #[test]
    fn test_cache_built_once_until_invalidated() {
        let mut db = DefDatabase::new();
        let mut classifier = SourceClassifier::new(Affinity::Fresh);
        assert!(!classifier.is_analyzed());
        assert_eq!(classifier.classify(&db, &DefName::new("Cod")), Affinity::Fresh);

        db.add_region(region(
            "Ocean",
            FishTable {
                saltwater_common: vec![FishChance::new("Cod", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();

        // Cached result stands until the cache is dropped
        assert_eq!(classifier.classify(&db, &DefName::new("Cod")), Affinity::Fresh);

        classifier.invalidate();
        assert_eq!(classifier.classify(&db, &DefName::new("Cod")), Affinity::Salt);
        assert_eq!(classifier.lookup("Cod"), Some(Affinity::Salt));
    }
}
