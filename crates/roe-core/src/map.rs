//! In-memory host map
//!
//! A minimal map with terrain and water bodies that implements both
//! [`SeedingSite`] and [`CapacityField`]. Hosts with their own map types
//! implement the traits directly; this one backs tests and tools.

use crate::{Affinity, BodyId, CapacityField, Cell, DefName, SeedingSite};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Capacity state of one water body
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBody {
    /// Affinity the host reports for the body, if it knows one
    pub affinity: Option<Affinity>,
    /// Magnitude the host computes on its own
    pub base_magnitude: i64,
    magnitude: i64,
    system_delta: i64,
}

impl WaterBody {
    /// Current magnitude
    pub fn magnitude(&self) -> i64 {
        self.magnitude
    }

    /// Total delta applied by the ledger
    pub fn system_delta(&self) -> i64 {
        self.system_delta
    }
}

/// Grid map with terrain, water bodies and capacity
#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    terrain: HashMap<Cell, DefName>,
    cell_bodies: HashMap<Cell, BodyId>,
    bodies: IndexMap<BodyId, WaterBody>,
    next_body: u32,
}

impl TileMap {
    /// Create a map with no terrain set
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            terrain: HashMap::new(),
            cell_bodies: HashMap::new(),
            bodies: IndexMap::new(),
            next_body: 0,
        }
    }

    /// Set the terrain at `cell`
    pub fn set_terrain(&mut self, cell: Cell, terrain: impl Into<DefName>) {
        self.terrain.insert(cell, terrain.into());
    }

    /// Add a water body with the magnitude the host would compute for it
    pub fn add_body(&mut self, affinity: Option<Affinity>, base_magnitude: i64) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        self.bodies.insert(
            id,
            WaterBody {
                affinity,
                base_magnitude,
                magnitude: base_magnitude,
                system_delta: 0,
            },
        );
        id
    }

    /// Make `cell` part of `body`, with the given terrain
    pub fn flood(&mut self, cell: Cell, body: BodyId, terrain: impl Into<DefName>) {
        self.set_terrain(cell, terrain);
        self.cell_bodies.insert(cell, body);
    }

    /// Get a water body
    pub fn body(&self, id: BodyId) -> Option<&WaterBody> {
        self.bodies.get(&id)
    }

    /// Recompute every body from scratch, as the host does when a save is
    /// loaded; adjustments made by this system are gone afterwards
    pub fn rebuild_capacity(&mut self) {
        for body in self.bodies.values_mut() {
            body.magnitude = body.base_magnitude;
            body.system_delta = 0;
        }
    }
}

impl SeedingSite for TileMap {
    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width && cell.z < self.height
    }

    fn terrain_at(&self, cell: Cell) -> Option<&DefName> {
        self.terrain.get(&cell)
    }

    fn body_affinity(&self, cell: Cell) -> Option<Affinity> {
        let body = self.cell_bodies.get(&cell)?;
        self.bodies.get(body)?.affinity
    }
}

impl CapacityField for TileMap {
    fn body_at(&self, cell: Cell) -> Option<BodyId> {
        self.cell_bodies.get(&cell).copied()
    }

    fn magnitude(&self, body: BodyId) -> Option<i64> {
        self.bodies.get(&body).map(|b| b.magnitude)
    }

    fn set_magnitude(&mut self, body: BodyId, value: i64) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.magnitude = value;
        }
    }

    fn system_delta(&self, body: BodyId) -> i64 {
        self.bodies.get(&body).map(|b| b.system_delta).unwrap_or(0)
    }

    fn set_system_delta(&mut self, body: BodyId, value: i64) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.system_delta = value;
        }
    }

    fn adjusted_bodies(&self) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|(_, b)| b.system_delta != 0)
            .map(|(id, _)| *id)
            .collect()
    }
}
