//! Settings - Player-adjustable behaviour of seeding and generation
//!
//! Settings are plain serde data so hosts can persist them with whatever
//! format their settings panel uses; `roe-script` loads them from RON.
//! Every field has a default, so partial files are accepted.

use crate::{Affinity, DefName};
use serde::{Deserialize, Serialize};

/// Default capacity bonus applied per stocking event
pub const DEFAULT_CAPACITY_BONUS: i64 = 100;

/// Default experience granted per successful seeding
pub const DEFAULT_XP_PER_SEEDING: u32 = 50;

/// Configuration for seed generation and the seeding action
///
/// # Example
///
/// ```
/// use roe_core::{Affinity, Settings};
///
/// let settings = Settings::default();
/// assert!(settings.enforce_affinity);
/// assert_eq!(settings.default_affinity, Affinity::Fresh);
/// assert_eq!(settings.capacity_bonus, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Offer the "seed water source" option on seed items
    pub enable_context_menu_seeding: bool,
    /// Reject seeding when the terrain's affinity differs from the seed's
    pub enforce_affinity: bool,
    /// Ask the host for a splash effect after a successful seeding
    pub show_ripple_on_success: bool,
    /// Affinity for species no region lists and for untagged terrain
    pub default_affinity: Affinity,
    /// Experience granted to the seeder; `0` disables the grant
    pub xp_per_seeding: u32,
    /// Capacity delta applied to a water body per stocked cell
    pub capacity_bonus: i64,
    /// Category whose members get a seed definition
    pub source_category: DefName,
    /// Category generated seeds are filed under
    pub seed_category: DefName,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_context_menu_seeding: true,
            enforce_affinity: true,
            show_ripple_on_success: true,
            default_affinity: Affinity::Fresh,
            xp_per_seeding: DEFAULT_XP_PER_SEEDING,
            capacity_bonus: DEFAULT_CAPACITY_BONUS,
            source_category: DefName::new("Fish"),
            seed_category: DefName::new("SeedItems"),
        }
    }
}

impl Settings {
    /// Set the fallback affinity
    pub fn with_default_affinity(mut self, affinity: Affinity) -> Self {
        self.default_affinity = affinity;
        self
    }

    /// Enable or disable the affinity check
    pub fn with_enforce_affinity(mut self, enforce: bool) -> Self {
        self.enforce_affinity = enforce;
        self
    }

    /// Set the bonus per stocked cell
    pub fn with_capacity_bonus(mut self, bonus: i64) -> Self {
        self.capacity_bonus = bonus;
        self
    }
}
