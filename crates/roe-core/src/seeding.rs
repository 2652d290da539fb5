//! Seeding action
//!
//! The terminal step of the host's seeding job calls [`SeedAction::request_seed`]
//! once the seeder stands next to the target with one seed item reserved.
//! The action either completes fully (ledger entry, experience, one item
//! consumed) or changes nothing.

use crate::{
    Affinity, CapacityField, Cell, DefDatabase, DefName, Error, Settings, StockedLedger,
};
use tracing::{debug, error, info};

/// Terrain tag carried by every liquid terrain
pub const WATER_TAG: &str = "Water";
/// Terrain tag marking fresh water
pub const FRESH_WATER_TAG: &str = "FreshWater";
/// Terrain tag marking salt water
pub const SALT_WATER_TAG: &str = "SaltWater";

/// Read access to the map a seeding targets
pub trait SeedingSite {
    fn in_bounds(&self, cell: Cell) -> bool;

    /// Terrain definition name at `cell`
    fn terrain_at(&self, cell: Cell) -> Option<&DefName>;

    /// Affinity of the water body at `cell`, when the host tracks one
    fn body_affinity(&self, cell: Cell) -> Option<Affinity>;
}

/// The actor performing the seeding
pub trait Seeder {
    /// Short label used in messages
    fn label(&self) -> &str;

    fn grant_experience(&mut self, xp: u32);
}

/// A stack of seed items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedItem {
    pub def: DefName,
    pub stack_count: u32,
}

impl SeedItem {
    /// Create a stack of `stack_count` items
    pub fn new(def: impl Into<DefName>, stack_count: u32) -> Self {
        Self {
            def: def.into(),
            stack_count,
        }
    }

    /// Remove one item from the stack; `false` if it was already empty
    pub fn consume_one(&mut self) -> bool {
        if self.stack_count == 0 {
            return false;
        }
        self.stack_count -= 1;
        true
    }

    /// Check if the stack is empty
    pub fn is_spent(&self) -> bool {
        self.stack_count == 0
    }
}

/// Why a target was refused; shown to the player
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("out of bounds")]
    OutOfBounds,

    #[error("not water")]
    NotWater,

    #[error("{} seeds require {}", capitalize(.label), .required.adjective())]
    WrongAffinity { label: String, required: Affinity },
}

/// Terminal state of a seeding attempt that did not succeed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeedFailure {
    /// Expected outcome; the job ends incompletable
    #[error("{0}")]
    Rejected(#[from] RejectReason),

    /// The seed item itself is broken; the job ends errored
    #[error("seeding failed: {0}")]
    Errored(#[from] Error),
}

/// A completed seeding
#[derive(Debug, Clone, PartialEq)]
pub struct Seeded {
    pub cell: Cell,
    pub species: DefName,
    pub species_label: String,
    /// Capacity bonus applied to the water body
    pub bonus: i64,
    pub xp_granted: u32,
    /// Whether the host should play its splash effect
    pub show_ripple: bool,
}

impl Seeded {
    /// Player-facing success message
    pub fn message(&self, seeder: &str) -> String {
        format!(
            "{} successfully seeded {} with {}",
            seeder, self.cell, self.species_label
        )
    }
}

/// Affinity of the water at `cell`
///
/// Terrain tags decide first, then the water body the host tracks, then the
/// configured default.
pub fn terrain_affinity<S: SeedingSite + ?Sized>(
    db: &DefDatabase,
    site: &S,
    cell: Cell,
    default: Affinity,
) -> Affinity {
    if let Some(terrain) = site.terrain_at(cell).and_then(|t| db.terrain(t.as_str())) {
        if terrain.has_tag(FRESH_WATER_TAG) {
            return Affinity::Fresh;
        }
        if terrain.has_tag(SALT_WATER_TAG) {
            return Affinity::Salt;
        }
    }
    site.body_affinity(cell).unwrap_or(default)
}

/// Check that `cell` can receive a seed of `required` affinity
pub fn validate_target<S: SeedingSite + ?Sized>(
    db: &DefDatabase,
    settings: &Settings,
    site: &S,
    cell: Cell,
    species_label: &str,
    required: Affinity,
) -> Result<(), RejectReason> {
    if !site.in_bounds(cell) {
        return Err(RejectReason::OutOfBounds);
    }

    let is_water = site
        .terrain_at(cell)
        .and_then(|t| db.terrain(t.as_str()))
        .is_some_and(|t| t.has_tag(WATER_TAG));
    if !is_water {
        return Err(RejectReason::NotWater);
    }

    if settings.enforce_affinity
        && terrain_affinity(db, site, cell, settings.default_affinity) != required
    {
        return Err(RejectReason::WrongAffinity {
            label: species_label.to_string(),
            required,
        });
    }
    Ok(())
}

/// The seeding action surface
#[derive(Debug, Clone, Copy)]
pub struct SeedAction<'a> {
    db: &'a DefDatabase,
    settings: &'a Settings,
}

impl<'a> SeedAction<'a> {
    /// Create the action over loaded definitions
    pub fn new(db: &'a DefDatabase, settings: &'a Settings) -> Self {
        Self { db, settings }
    }

    /// Whether the host should offer the seeding option on `item`
    pub fn offers_seeding(&self, item: &SeedItem) -> bool {
        self.settings.enable_context_menu_seeding
            && !item.is_spent()
            && self
                .db
                .thing(item.def.as_str())
                .is_some_and(|def| def.seed.is_some())
    }

    /// Seed `target` with one item from `item`
    ///
    /// The seed's linkage is checked before anything is mutated, so an
    /// errored or rejected attempt leaves map, ledger, seeder and item as
    /// they were.
    pub fn request_seed<M, P>(
        &self,
        map: &mut M,
        ledger: &mut StockedLedger,
        item: &mut SeedItem,
        target: Cell,
        seeder: &mut P,
    ) -> Result<Seeded, SeedFailure>
    where
        M: SeedingSite + CapacityField + ?Sized,
        P: Seeder + ?Sized,
    {
        if item.is_spent() {
            return Err(Error::InvalidOperation(format!("{} stack is empty", item.def)).into());
        }

        let (species, required, species_label) = match self.resolve(&item.def) {
            Ok(resolved) => resolved,
            Err(err) => {
                error!(item = %item.def, error = %err, "seed item has no usable linkage");
                return Err(err.into());
            }
        };

        if let Err(reason) =
            validate_target(self.db, self.settings, &*map, target, &species_label, required)
        {
            debug!(%target, %species, %reason, "seeding rejected");
            return Err(reason.into());
        }

        let bonus = ledger.mark_stocked(map, target, species.clone());

        let xp_granted = self.settings.xp_per_seeding;
        if xp_granted > 0 {
            seeder.grant_experience(xp_granted);
        }
        item.consume_one();

        info!(seeder = seeder.label(), %target, %species, bonus, "seeded water");
        Ok(Seeded {
            cell: target,
            species,
            species_label,
            bonus,
            xp_granted,
            show_ripple: self.settings.show_ripple_on_success,
        })
    }

    fn resolve(&self, seed: &DefName) -> Result<(DefName, Affinity, String), Error> {
        let def = self
            .db
            .thing(seed.as_str())
            .ok_or_else(|| Error::DefinitionNotFound(seed.to_string()))?;
        let link = def
            .seed
            .as_ref()
            .ok_or_else(|| Error::MissingSeedLink(seed.to_string()))?;
        let source = self
            .db
            .thing(link.linked_source.as_str())
            .ok_or_else(|| Error::DefinitionNotFound(link.linked_source.to_string()))?;
        Ok((link.linked_source.clone(), link.affinity, source.label.clone()))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
