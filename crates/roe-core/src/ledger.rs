//! Stocked cell ledger
//!
//! One ledger per map records which cells have been stocked with which
//! species, and the capacity bonus each stocking applied to the water body
//! containing the cell. Re-stocking a cell replaces its entry: the old bonus
//! is reversed before the new one is applied, so a cell never contributes
//! more than one bonus.
//!
//! The host rebuilds its capacity field independently of this ledger, so the
//! bonuses must be put back after every load. A deserialized ledger is a
//! [`PendingLedger`]; the only way to get a usable [`StockedLedger`] out of
//! it is [`PendingLedger::restore_after_reload`], which consumes it. That
//! makes restoration happen exactly once per load.
//!
//! # Example
//!
//! ```
//! use roe_core::{Affinity, CapacityField, Cell, PendingLedger, StockedLedger, TileMap};
//!
//! let mut map = TileMap::new(20, 20);
//! let lake = map.add_body(Some(Affinity::Fresh), 400);
//! map.flood(Cell::new(3, 4), lake, "WaterShallow");
//!
//! let mut ledger = StockedLedger::new(100);
//! ledger.mark_stocked(&mut map, Cell::new(3, 4), "Fish_Trout");
//! assert_eq!(map.magnitude(lake), Some(500));
//!
//! // Save, then the host reloads and rebuilds its field
//! let saved = ledger.snapshot();
//! map.rebuild_capacity();
//!
//! let ledger = PendingLedger::from(saved).restore_after_reload(&mut map, 100);
//! assert_eq!(ledger.query(Cell::new(3, 4)).unwrap().as_str(), "Fish_Trout");
//! assert_eq!(map.magnitude(lake), Some(500));
//! ```

use crate::capacity::apply_delta;
use crate::config::DEFAULT_CAPACITY_BONUS;
use crate::{BodyId, CapacityField, Cell, DefName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Ledger entry for one stocked cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockedLocation {
    pub species: DefName,
    /// Bonus currently applied on behalf of this cell; `0` when the cell
    /// was not in a water body
    pub bonus: i64,
}

/// Persisted form of a ledger
///
/// Two ordered lists: the species stocked per cell, and the bonus applied
/// per cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSnapshot {
    pub stocked: Vec<(Cell, DefName)>,
    pub bonuses: Vec<(Cell, i64)>,
}

impl LedgerSnapshot {
    /// Number of stocked cells in the snapshot
    pub fn len(&self) -> usize {
        self.stocked.len()
    }

    /// Check if the snapshot holds no stocked cell
    pub fn is_empty(&self) -> bool {
        self.stocked.is_empty()
    }
}

/// A loaded ledger whose bonuses have not been re-applied yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingLedger {
    entries: IndexMap<Cell, StockedLocation>,
}

impl From<LedgerSnapshot> for PendingLedger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        let mut bonuses: HashMap<Cell, i64> = snapshot.bonuses.into_iter().collect();
        let mut entries: IndexMap<Cell, StockedLocation> = IndexMap::new();

        for (cell, species) in snapshot.stocked {
            if let Some(existing) = entries.get_mut(&cell) {
                warn!(%cell, "cell saved twice, keeping the later species");
                existing.species = species;
                continue;
            }
            let bonus = bonuses.remove(&cell).unwrap_or_else(|| {
                warn!(%cell, "stocked cell saved without a bonus");
                0
            });
            entries.insert(cell, StockedLocation { species, bonus });
        }

        for cell in bonuses.keys() {
            warn!(%cell, "dropping saved bonus for a cell that is not stocked");
        }

        Self { entries }
    }
}

impl PendingLedger {
    /// Number of entries awaiting restoration
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there is nothing to restore
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-apply every recorded bonus to the freshly rebuilt field
    ///
    /// Call once after loading and before the first tick. Per water body
    /// the expected total is compared with the delta the field reports as
    /// already applied by this system, and only the difference is applied.
    /// A host that did not reset its field therefore never receives a bonus
    /// twice, and a body the save no longer backs is brought back to zero.
    /// Entries whose cell is no longer in a water body keep their
    /// species but lose their bonus.
    pub fn restore_after_reload<F: CapacityField + ?Sized>(
        self,
        field: &mut F,
        bonus_per_stocking: i64,
    ) -> StockedLedger {
        let mut ledger = StockedLedger {
            entries: self.entries,
            bonus_per_stocking,
        };

        let mut expected: IndexMap<BodyId, i64> = IndexMap::new();
        for (cell, entry) in ledger.entries.iter_mut() {
            if entry.bonus == 0 {
                continue;
            }
            match field.body_at(*cell) {
                Some(body) => *expected.entry(body).or_insert(0) += entry.bonus,
                None => {
                    warn!(%cell, bonus = entry.bonus, "stocked cell is no longer water, dropping its bonus");
                    entry.bonus = 0;
                }
            }
        }

        // Bodies adjusted before the reload but absent from the save go back to 0
        let mut targets = expected.clone();
        for body in field.adjusted_bodies() {
            targets.entry(body).or_insert(0);
        }

        for (&body, &total) in &targets {
            let retained = field.system_delta(body);
            if retained != 0 {
                warn!(
                    %body,
                    retained,
                    expected = total,
                    "capacity field kept earlier adjustments across reload, applying the difference"
                );
            }
            let missing = total - retained;
            if missing == 0 {
                continue;
            }
            if !apply_delta(field, body, missing) {
                warn!(%body, "water body vanished during restore, dropping its bonuses");
                for (cell, entry) in ledger.entries.iter_mut() {
                    if field.body_at(*cell) == Some(body) {
                        entry.bonus = 0;
                    }
                }
            }
        }

        info!(
            entries = ledger.len(),
            bodies = expected.len(),
            "restored stocked cell bonuses"
        );
        ledger
    }
}

/// Live ledger of stocked cells on one map
#[derive(Debug, Clone, PartialEq)]
pub struct StockedLedger {
    entries: IndexMap<Cell, StockedLocation>,
    bonus_per_stocking: i64,
}

impl Default for StockedLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY_BONUS)
    }
}

impl StockedLedger {
    /// Create an empty ledger applying `bonus_per_stocking` per stocked cell
    pub fn new(bonus_per_stocking: i64) -> Self {
        Self {
            entries: IndexMap::new(),
            bonus_per_stocking,
        }
    }

    /// Stock `cell` with `species`, returning the bonus applied
    ///
    /// A previous entry for the cell is reversed first. The bonus goes to
    /// the water body containing the cell; a cell outside any body is still
    /// recorded, with a bonus of `0`.
    pub fn mark_stocked<F: CapacityField + ?Sized>(
        &mut self,
        field: &mut F,
        cell: Cell,
        species: impl Into<DefName>,
    ) -> i64 {
        let species = species.into();
        if let Some(previous) = self.entries.get(&cell) {
            let bonus = previous.bonus;
            reverse_bonus(field, cell, bonus);
        }

        let mut applied = 0;
        if let Some(body) = field.body_at(cell) {
            if apply_delta(field, body, self.bonus_per_stocking) {
                applied = self.bonus_per_stocking;
            }
        }
        if applied == 0 {
            debug!(%cell, "stocked cell outside any water body, no bonus applied");
        }

        info!(%cell, %species, bonus = applied, "stocked cell");
        self.entries.insert(
            cell,
            StockedLocation {
                species,
                bonus: applied,
            },
        );
        applied
    }

    /// Remove the entry for `cell` and reverse its bonus
    ///
    /// Unstocking a cell that is not stocked does nothing.
    pub fn unstock<F: CapacityField + ?Sized>(
        &mut self,
        field: &mut F,
        cell: Cell,
    ) -> Option<StockedLocation> {
        let removed = self.entries.shift_remove(&cell)?;
        reverse_bonus(field, cell, removed.bonus);
        info!(%cell, species = %removed.species, "unstocked cell");
        Some(removed)
    }

    /// Species stocked at `cell`
    pub fn query(&self, cell: Cell) -> Option<&DefName> {
        self.entries.get(&cell).map(|e| &e.species)
    }

    /// Entry recorded for `cell`
    pub fn get(&self, cell: Cell) -> Option<&StockedLocation> {
        self.entries.get(&cell)
    }

    /// Check if `cell` is stocked
    pub fn is_stocked(&self, cell: Cell) -> bool {
        self.entries.contains_key(&cell)
    }

    /// Stocked cells in the order they were first stocked
    pub fn stocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries.keys().copied()
    }

    /// Entries in the order their cells were first stocked
    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &StockedLocation)> {
        self.entries.iter()
    }

    /// Number of stocked cells
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no cell is stocked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of recorded bonuses per water body
    pub fn applied_by_body<F: CapacityField + ?Sized>(&self, field: &F) -> IndexMap<BodyId, i64> {
        let mut totals = IndexMap::new();
        for (cell, entry) in &self.entries {
            if let Some(body) = field.body_at(*cell) {
                *totals.entry(body).or_insert(0) += entry.bonus;
            }
        }
        totals
    }

    /// Persisted form of the ledger
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            stocked: self
                .entries
                .iter()
                .map(|(cell, e)| (*cell, e.species.clone()))
                .collect(),
            bonuses: self.entries.iter().map(|(cell, e)| (*cell, e.bonus)).collect(),
        }
    }
}

fn reverse_bonus<F: CapacityField + ?Sized>(field: &mut F, cell: Cell, bonus: i64) {
    if bonus == 0 {
        return;
    }
    match field.body_at(cell) {
        Some(body) if apply_delta(field, body, -bonus) => {}
        _ => warn!(%cell, bonus, "could not reverse bonus, cell is no longer in a water body"),
    }
}
