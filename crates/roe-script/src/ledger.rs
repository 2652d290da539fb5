//! Textual form of the stocked ledger
//!
//! The text is the RON rendering of a [`LedgerSnapshot`]: the stocked
//! `(cell, species)` pairs followed by the `(cell, bonus)` pairs, both in
//! stocking order. Reading it back yields a [`PendingLedger`] that still
//! has to be restored against the map.

use crate::error::Result;
use roe_core::{LedgerSnapshot, PendingLedger, StockedLedger};
use ron::ser::PrettyConfig;

/// Render a ledger as pretty RON
pub fn ledger_to_ron(ledger: &StockedLedger) -> Result<String> {
    Ok(ron::ser::to_string_pretty(
        &ledger.snapshot(),
        PrettyConfig::default(),
    )?)
}

/// Parse a ledger rendered by [`ledger_to_ron`]
pub fn ledger_from_ron(content: &str) -> Result<PendingLedger> {
    let snapshot: LedgerSnapshot = ron::from_str(content)?;
    Ok(PendingLedger::from(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roe_core::{Affinity, CapacityField, Cell, TileMap};

    #[test]
    fn test_text_round_trip() {
        let mut map = TileMap::new(16, 16);
        let lake = map.add_body(Some(Affinity::Fresh), 500);
        map.flood(Cell::new(1, 2), lake, "WaterShallow");
        map.flood(Cell::new(3, 4), lake, "WaterShallow");

        let mut ledger = StockedLedger::new(100);
        ledger.mark_stocked(&mut map, Cell::new(3, 4), "Trout");
        ledger.mark_stocked(&mut map, Cell::new(1, 2), "Pike");

        let text = ledger_to_ron(&ledger).unwrap();
        assert!(text.find("Trout").unwrap() < text.find("Pike").unwrap());

        map.rebuild_capacity();
        let restored = ledger_from_ron(&text)
            .unwrap()
            .restore_after_reload(&mut map, 100);
        assert_eq!(restored, ledger);
        assert_eq!(map.magnitude(lake), Some(700));
    }

    #[test]
    fn test_hand_written_ledger() {
        let pending = ledger_from_ron(
            r#"(
                stocked: [((x: 0, z: 0), "Trout")],
                bonuses: [((x: 0, z: 0), 100)],
            )"#,
        )
        .unwrap();
        assert_eq!(pending.len(), 1);
    }
}
