//! Roe DB - Ledger persistence using native_db
//!
//! Stores the stocked ledger of each map, keyed by map ID. Ledgers come
//! back as `PendingLedger` values that must be restored before use.

mod error;
mod models;
mod store;

pub use error::{Error, Result};
pub use models::StoredLedger;
pub use store::Store;
