//! Ledger models for database storage.

use crate::error::Result;
use native_db::*;
use native_model::{native_model, Model};
use roe_core::{LedgerSnapshot, MapId, PendingLedger, StockedLedger};
use serde::{Deserialize, Serialize};

/// Stored ledger of one map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredLedger {
    /// Primary key - map ID.
    #[primary_key]
    pub map_id: u64,
    /// Number of stocked cells, for listing without decoding.
    pub entries: u64,
    /// Bincode-encoded `LedgerSnapshot`.
    pub data: Vec<u8>,
}

impl StoredLedger {
    /// Create from a live ledger.
    pub fn from_ledger(map: MapId, ledger: &StockedLedger) -> Result<Self> {
        let snapshot = ledger.snapshot();
        Ok(Self {
            map_id: map.raw(),
            // usize is at most 64 bits on every supported target
            entries: snapshot.len() as u64,
            data: bincode::serialize(&snapshot)?,
        })
    }

    /// Decode into a ledger awaiting restoration.
    pub fn to_pending(&self) -> Result<PendingLedger> {
        let snapshot: LedgerSnapshot = bincode::deserialize(&self.data)?;
        Ok(PendingLedger::from(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roe_core::{Affinity, Cell, TileMap};

    #[test]
    fn test_entry_count_matches_snapshot() {
        let mut map = TileMap::new(8, 8);
        let lake = map.add_body(Some(Affinity::Fresh), 300);
        let mut ledger = StockedLedger::new(100);
        for x in 0..4 {
            map.flood(Cell::new(x, 1), lake, "WaterShallow");
            ledger.mark_stocked(&mut map, Cell::new(x, 1), "Trout");
        }

        let stored = StoredLedger::from_ledger(MapId(3), &ledger).unwrap();
        assert_eq!(stored.map_id, 3);
        assert_eq!(stored.entries, 4);
        assert_eq!(stored.to_pending().unwrap().len(), 4);
    }

    #[test]
    fn test_corrupt_blob() {
        let stored = StoredLedger {
            map_id: 1,
            entries: 1,
            data: vec![0xFF],
        };
        assert!(matches!(
            stored.to_pending(),
            Err(crate::Error::Serialization(_))
        ));
    }
}
