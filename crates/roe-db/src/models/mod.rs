//! Database models for persistent storage.

mod ledger;

pub use ledger::*;
