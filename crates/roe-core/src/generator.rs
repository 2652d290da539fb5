//! Seed definition generation
//!
//! Runs once at startup, after the host has registered all of its own
//! definitions and before anything looks generated seeds up by name. For
//! every source species a `Seed_<name>` thing is synthesized from a fixed
//! template, linked back to the species and its water affinity, given a
//! compact identifier and registered.
//!
//! Generation only adds definitions. A seed name that already exists is
//! skipped with a warning, and one species failing never stops the pass.

use crate::{
    Affinity, DefDatabase, DefName, Error, IdentifierAllocator, ItemProps, Result, Rottable,
    SeedLink, Settings, SourceCatalog, SourceClassifier, ThingDef,
};
use tracing::{error, info, warn};

/// Prefix of every generated seed definition
pub const SEED_PREFIX: &str = "Seed_";

/// Name of the seed generated for `source`
pub fn seed_name(source: &str) -> DefName {
    DefName::new(format!("{SEED_PREFIX}{source}"))
}

/// Fixed attributes shared by every generated seed
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeedTemplate {
    pub max_hit_points: f32,
    pub mass: f32,
    pub flammability: f32,
    pub deterioration_rate: f32,
    pub stack_limit: u32,
    pub days_to_rot_start: f32,
    pub rot_destroys: bool,
    /// Seed market value relative to the source species
    pub market_value_factor: f64,
}

impl Default for SeedTemplate {
    fn default() -> Self {
        Self {
            max_hit_points: 25.0,
            mass: 0.1,
            flammability: 0.5,
            deterioration_rate: 1.0,
            stack_limit: 10,
            days_to_rot_start: 5.0,
            rot_destroys: true,
            market_value_factor: 2.0,
        }
    }
}

impl SeedTemplate {
    fn item_props(&self) -> ItemProps {
        ItemProps {
            max_hit_points: self.max_hit_points,
            mass: self.mass,
            flammability: self.flammability,
            deterioration_rate: self.deterioration_rate,
            stack_limit: self.stack_limit,
            rot: Some(Rottable {
                days_to_rot_start: self.days_to_rot_start,
                rot_destroys: self.rot_destroys,
            }),
        }
    }
}

/// Outcome of a generation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Seeds registered in this pass
    pub generated: Vec<DefName>,
    /// Sources whose seed name already existed
    pub skipped: Vec<DefName>,
    /// Sources that could not be generated
    pub failed: Vec<(DefName, Error)>,
}

impl GenerationReport {
    /// Number of seeds registered
    pub fn count(&self) -> usize {
        self.generated.len()
    }
}

/// Synthesizes and registers seed definitions
#[derive(Debug, Clone)]
pub struct DefinitionGenerator {
    template: SeedTemplate,
    seed_category: DefName,
}

impl DefinitionGenerator {
    /// Create a generator filing seeds under the configured category
    pub fn new(settings: &Settings) -> Self {
        Self {
            template: SeedTemplate::default(),
            seed_category: settings.seed_category.clone(),
        }
    }

    /// Generate one seed per source, in order
    ///
    /// `allocator` must hold the identifier snapshot taken for this pass.
    pub fn generate_all(
        &self,
        db: &mut DefDatabase,
        sources: &[DefName],
        classifier: &mut SourceClassifier,
        allocator: &mut IdentifierAllocator,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();

        let categorise = db.category(self.seed_category.as_str()).is_some();
        if !categorise {
            error!(
                category = %self.seed_category,
                "seed category not found; seeds will not appear under it"
            );
        }

        for source in sources {
            let name = seed_name(source.as_str());
            if db.contains_thing(name.as_str()) {
                warn!(seed = %name, %source, "seed definition already exists, skipping");
                report.skipped.push(source.clone());
                continue;
            }

            match self.generate_one(db, source, classifier, allocator, categorise) {
                Ok(def) => report.generated.push(def),
                Err(err) => {
                    error!(%source, error = %err, "failed to generate seed definition");
                    report.failed.push((source.clone(), err));
                }
            }
        }

        info!(
            generated = report.count(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "generated seed definitions"
        );
        report
    }

    fn generate_one(
        &self,
        db: &mut DefDatabase,
        source: &DefName,
        classifier: &mut SourceClassifier,
        allocator: &mut IdentifierAllocator,
        categorise: bool,
    ) -> Result<DefName> {
        let source_def = db
            .thing(source.as_str())
            .ok_or_else(|| Error::DefinitionNotFound(source.to_string()))?;
        let affinity = classifier.classify(db, source);

        let mut def = self.synthesize(source_def, affinity);
        if categorise {
            def.categories.push(self.seed_category.clone());
        }
        def.short_hash = allocator.allocate(def.name.as_str());

        let name = def.name.clone();
        db.add_thing(def)?;
        Ok(name)
    }

    /// Build the seed definition for a source; the compact identifier is
    /// left unassigned
    pub fn synthesize(&self, source: &ThingDef, affinity: Affinity) -> ThingDef {
        ThingDef {
            name: seed_name(source.name.as_str()),
            label: format!("{} seed", source.label),
            description: format!(
                "Spawn of the {}. Can be used to stock {} sources.",
                source.label,
                affinity.adjective()
            ),
            short_hash: Default::default(),
            market_value: source.market_value * self.template.market_value_factor,
            categories: Vec::new(),
            item: Some(self.template.item_props()),
            seed: Some(SeedLink {
                linked_source: source.name.clone(),
                affinity,
            }),
        }
    }
}

/// Startup pass: discover sources, snapshot identifiers, generate seeds
pub fn generate_seed_defs(db: &mut DefDatabase, settings: &Settings) -> GenerationReport {
    let mut catalog = SourceCatalog::new(settings.source_category.clone());
    let sources = catalog.discover(db).to_vec();
    let mut classifier = SourceClassifier::new(settings.default_affinity);
    let mut allocator = IdentifierAllocator::collect_existing(db);
    DefinitionGenerator::new(settings).generate_all(db, &sources, &mut classifier, &mut allocator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryDef, FishChance, FishTable, RegionProfile, ShortHash};

    fn fish_db() -> DefDatabase {
        let mut db = DefDatabase::new();
        db.add_category(CategoryDef::new("Fish", "fish")).unwrap();
        db.add_category(CategoryDef::new("SeedItems", "seeds")).unwrap();
        db.add_thing(
            ThingDef::new("Fish_Trout", "trout")
                .with_category("Fish")
                .with_market_value(10.0)
                .with_short_hash(1),
        )
        .unwrap();
        db.add_thing(
            ThingDef::new("Fish_Cod", "cod")
                .with_category("Fish")
                .with_market_value(4.0)
                .with_short_hash(2),
        )
        .unwrap();
        db.add_region(RegionProfile::new(
            "Coast",
            FishTable {
                saltwater_common: vec![FishChance::new("Fish_Cod", 1.0)],
                ..FishTable::default()
            },
        ))
        .unwrap();
        db
    }

    #[test]
    fn test_seed_name() {
        assert_eq!(seed_name("Fish_Trout").as_str(), "Seed_Fish_Trout");
    }

    #[test]
    fn test_generates_one_per_source() {
        let mut db = fish_db();
        let report = generate_seed_defs(&mut db, &Settings::default());

        assert_eq!(report.count(), 2);
        assert!(report.skipped.is_empty());
        assert!(report.failed.is_empty());

        let trout = db.thing("Seed_Fish_Trout").unwrap();
        assert_eq!(trout.label, "trout seed");
        assert_eq!(trout.market_value, 20.0);
        assert!(trout.in_category("SeedItems"));
        assert_eq!(
            trout.seed,
            Some(SeedLink {
                linked_source: DefName::new("Fish_Trout"),
                affinity: Affinity::Fresh,
            })
        );

        let cod = db.thing("Seed_Fish_Cod").unwrap();
        assert_eq!(cod.seed.as_ref().unwrap().affinity, Affinity::Salt);
        assert!(cod.description.contains("saltwater"));
    }

    #[test]
    fn test_fixed_attributes() {
        let mut db = fish_db();
        generate_seed_defs(&mut db, &Settings::default());

        let item = db.thing("Seed_Fish_Cod").unwrap().item.clone().unwrap();
        assert_eq!(item.max_hit_points, 25.0);
        assert_eq!(item.mass, 0.1);
        assert_eq!(item.flammability, 0.5);
        assert_eq!(item.deterioration_rate, 1.0);
        assert_eq!(item.stack_limit, 10);
        assert_eq!(
            item.rot,
            Some(Rottable {
                days_to_rot_start: 5.0,
                rot_destroys: true
            })
        );
    }

    #[test]
    fn test_identifiers_unique() {
        let mut db = fish_db();
        generate_seed_defs(&mut db, &Settings::default());

        let mut hashes: Vec<ShortHash> = db.short_hashes().collect();
        hashes.sort();
        hashes.dedup();
        assert_eq!(hashes.len(), db.thing_count());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut db = fish_db();
        let first = generate_seed_defs(&mut db, &Settings::default());
        let things = db.thing_count();
        let trout_hash = db.thing("Seed_Fish_Trout").unwrap().short_hash;

        let second = generate_seed_defs(&mut db, &Settings::default());
        assert_eq!(first.count(), 2);
        assert_eq!(second.count(), 0);
        assert_eq!(second.skipped.len(), 2);
        assert_eq!(db.thing_count(), things);
        assert_eq!(db.thing("Seed_Fish_Trout").unwrap().short_hash, trout_hash);
    }

    #[test]
    fn test_existing_seed_name_skipped() {
        let mut db = fish_db();
        db.add_thing(ThingDef::new("Seed_Fish_Trout", "hand made").with_short_hash(3))
            .unwrap();

        let report = generate_seed_defs(&mut db, &Settings::default());
        assert_eq!(report.generated, vec![DefName::new("Seed_Fish_Cod")]);
        assert_eq!(report.skipped, vec![DefName::new("Fish_Trout")]);
        assert_eq!(db.thing("Seed_Fish_Trout").unwrap().label, "hand made");
    }

    #[test]
    fn test_missing_category_degrades() {
        let mut db = DefDatabase::new();
        db.add_thing(ThingDef::new("Fish_Pike", "pike").with_category("Fish"))
            .unwrap();

        let report = generate_seed_defs(&mut db, &Settings::default());
        assert_eq!(report.count(), 1);
        assert!(db.thing("Seed_Fish_Pike").unwrap().categories.is_empty());
    }

    #[test]
    fn test_unknown_source_fails_alone() {
        let mut db = fish_db();
        let generator = DefinitionGenerator::new(&Settings::default());
        let mut classifier = SourceClassifier::new(Affinity::Fresh);
        let mut allocator = IdentifierAllocator::collect_existing(&db);
        let sources = [DefName::new("Fish_Ghost"), DefName::new("Fish_Trout")];

        let report = generator.generate_all(&mut db, &sources, &mut classifier, &mut allocator);
        assert_eq!(report.generated, vec![DefName::new("Seed_Fish_Trout")]);
        assert_eq!(
            report.failed,
            vec![(
                DefName::new("Fish_Ghost"),
                Error::DefinitionNotFound("Fish_Ghost".to_string())
            )]
        );
    }

    #[test]
    fn test_trout_with_default_affinity() {
        let mut db = DefDatabase::new();
        db.add_thing(
            ThingDef::new("Trout", "trout")
                .with_category("Fish")
                .with_market_value(10.0),
        )
        .unwrap();
        let settings = Settings::default().with_default_affinity(Affinity::Salt);

        let report = generate_seed_defs(&mut db, &settings);
        assert_eq!(report.generated, vec![DefName::new("Seed_Trout")]);
        let seed = db.thing("Seed_Trout").unwrap();
        assert_eq!(seed.market_value, 20.0);
        assert_eq!(seed.seed.as_ref().unwrap().affinity, Affinity::Salt);
        assert_ne!(seed.short_hash, db.thing("Trout").unwrap().short_hash);
    }
}
