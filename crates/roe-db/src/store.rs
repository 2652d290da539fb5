//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use native_db::*;
use roe_core::{MapId, PendingLedger, StockedLedger};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models
        .define::<StoredLedger>()
        .expect("StoredLedger model definition is static");
    models
});

/// Database store for per-map stocked ledgers.
///
/// Loading never hands out a live ledger: the caller gets a
/// [`PendingLedger`] and restores it against the map it belongs to.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Save the ledger of a map, replacing any earlier save.
    pub fn save_ledger(&self, map: MapId, ledger: &StockedLedger) -> Result<()> {
        let stored = StoredLedger::from_ledger(map, ledger)?;
        let entries = stored.entries;
        let rw = self.db.rw_transaction()?;
        rw.upsert(stored)?;
        rw.commit()?;
        debug!(%map, entries, "saved ledger");
        Ok(())
    }

    /// Load the ledger of a map, if one was saved.
    pub fn load_ledger(&self, map: MapId) -> Result<Option<PendingLedger>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredLedger> = r.get().primary(map.raw())?;
        let pending = stored.map(|s| s.to_pending()).transpose()?;
        if let Some(pending) = &pending {
            info!(%map, entries = pending.len(), "loaded ledger");
        }
        Ok(pending)
    }

    /// Delete the ledger of a map.
    pub fn remove_ledger(&self, map: MapId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredLedger> = rw.get().primary(map.raw())?;
        if let Some(s) = stored {
            rw.remove(s)?;
        }
        rw.commit()?;
        Ok(())
    }

    /// Maps with a saved ledger, in key order.
    pub fn ledger_maps(&self) -> Result<Vec<MapId>> {
        Ok(self.stored_ledgers()?.into_iter().map(|s| MapId(s.map_id)).collect())
    }

    /// Clear all data.
    pub fn clear(&self) -> Result<()> {
        // Collect first, then delete in a separate transaction
        let stored = self.stored_ledgers()?;

        let rw = self.db.rw_transaction()?;
        for ledger in stored {
            rw.remove(ledger)?;
        }
        rw.commit()?;
        Ok(())
    }

    fn stored_ledgers(&self) -> Result<Vec<StoredLedger>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredLedger>()?;
        let iter = scan.all()?;
        let ledgers: std::result::Result<Vec<StoredLedger>, _> = iter.collect();
        ledgers.map_err(|e| Error::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roe_core::{Affinity, CapacityField, Cell, TileMap};

    fn stocked_lake() -> (TileMap, StockedLedger, roe_core::BodyId) {
        let mut map = TileMap::new(20, 20);
        let lake = map.add_body(Some(Affinity::Fresh), 800);
        let mut ledger = StockedLedger::new(100);
        for x in 0..3 {
            let cell = Cell::new(x, 5);
            map.flood(cell, lake, "WaterShallow");
            ledger.mark_stocked(&mut map, cell, "Trout");
        }
        (map, ledger, lake)
    }

    #[test]
    fn test_save_load_restore() {
        let store = Store::in_memory().unwrap();
        let (mut map, ledger, lake) = stocked_lake();
        store.save_ledger(MapId(1), &ledger).unwrap();

        map.rebuild_capacity();
        let restored = store
            .load_ledger(MapId(1))
            .unwrap()
            .unwrap()
            .restore_after_reload(&mut map, 100);

        assert_eq!(restored, ledger);
        assert_eq!(map.magnitude(lake), Some(1100));
    }

    #[test]
    fn test_missing_ledger() {
        let store = Store::in_memory().unwrap();
        assert!(store.load_ledger(MapId(9)).unwrap().is_none());
    }

    #[test]
    fn test_overwrite_and_remove() {
        let store = Store::in_memory().unwrap();
        let (mut map, mut ledger, _) = stocked_lake();
        store.save_ledger(MapId(1), &ledger).unwrap();
        store.save_ledger(MapId(2), &StockedLedger::default()).unwrap();

        ledger.unstock(&mut map, Cell::new(0, 5));
        store.save_ledger(MapId(1), &ledger).unwrap();
        assert_eq!(store.load_ledger(MapId(1)).unwrap().unwrap().len(), 2);
        assert_eq!(store.ledger_maps().unwrap(), vec![MapId(1), MapId(2)]);

        store.remove_ledger(MapId(1)).unwrap();
        assert_eq!(store.ledger_maps().unwrap(), vec![MapId(2)]);

        store.clear().unwrap();
        assert!(store.ledger_maps().unwrap().is_empty());
    }
}
