//! Roe Core - Seed definitions and stocked water for host simulations
//!
//! This crate provides the host-independent parts of the roe system:
//! - Definition identifiers and the definition database (`DefName`, `DefDatabase`)
//! - Water affinity classification of source species (`SourceClassifier`)
//! - Collision-free compact identifiers (`IdentifierAllocator`)
//! - Startup generation of `Seed_<name>` definitions (`generate_seed_defs`)
//! - The per-map stocked ledger and its capacity bonuses (`StockedLedger`)
//! - The seeding action run by the host's job system (`SeedAction`)
//!
//! ## Host Integration
//!
//! The host exposes its map through two traits:
//! - [`SeedingSite`] - bounds, terrain and water body affinity
//! - [`CapacityField`] - per-body capacity magnitude and system delta
//!
//! [`TileMap`] is an in-memory implementation of both.
//!
//! ## Example
//!
//! ```
//! use roe_core::{
//!     generate_seed_defs, Cell, DefDatabase, SeedAction, SeedItem, Seeder, Settings,
//!     StockedLedger, TerrainDef, ThingDef, TileMap,
//! };
//!
//! struct Fisher;
//!
//! impl Seeder for Fisher {
//!     fn label(&self) -> &str {
//!         "Fisher"
//!     }
//!     fn grant_experience(&mut self, _xp: u32) {}
//! }
//!
//! let settings = Settings::default();
//! let mut db = DefDatabase::new();
//! db.add_thing(ThingDef::new("Trout", "trout").with_category("Fish")).unwrap();
//! db.add_terrain(TerrainDef::new("WaterShallow").with_tag("Water")).unwrap();
//! generate_seed_defs(&mut db, &settings);
//!
//! let mut map = TileMap::new(8, 8);
//! let lake = map.add_body(None, 400);
//! map.flood(Cell::new(2, 3), lake, "WaterShallow");
//!
//! let mut ledger = StockedLedger::new(settings.capacity_bonus);
//! let mut item = SeedItem::new("Seed_Trout", 3);
//! let seeded = SeedAction::new(&db, &settings)
//!     .request_seed(&mut map, &mut ledger, &mut item, Cell::new(2, 3), &mut Fisher)
//!     .unwrap();
//!
//! assert_eq!(seeded.species.as_str(), "Trout");
//! assert_eq!(ledger.query(Cell::new(2, 3)).unwrap().as_str(), "Trout");
//! assert_eq!(item.stack_count, 2);
//! ```

mod affinity;
mod allocator;
mod capacity;
mod catalog;
mod classifier;
mod config;
mod defs;
mod error;
mod generator;
pub mod hash;
mod identity;
pub mod ledger;
mod map;
pub mod seeding;
mod validate;

pub use affinity::Affinity;
pub use allocator::{IdentifierAllocator, NameHasher, SHORT_HASH_SPACE};
pub use capacity::{apply_delta, CapacityField};
pub use catalog::SourceCatalog;
pub use classifier::SourceClassifier;
pub use config::{Settings, DEFAULT_CAPACITY_BONUS, DEFAULT_XP_PER_SEEDING};
pub use defs::{
    CategoryDef, DefDatabase, FishChance, FishTable, ItemProps, RegionProfile, Rottable,
    SeedLink, TerrainDef, ThingDef,
};
pub use error::{Error, Result};
pub use generator::{
    generate_seed_defs, seed_name, DefinitionGenerator, GenerationReport, SEED_PREFIX,
};
pub use identity::{BodyId, Cell, DefName, MapId, ShortHash};
pub use ledger::{LedgerSnapshot, PendingLedger, StockedLedger, StockedLocation};
pub use map::{TileMap, WaterBody};
pub use seeding::{
    terrain_affinity, validate_target, RejectReason, SeedAction, SeedFailure, SeedItem, Seeded,
    Seeder, SeedingSite,
};
pub use validate::{validate_generated, ValidationReport};
