//! Roe Script - RON loader for content, settings and ledgers
//!
//! Loads from RON files:
//! - Things, categories, terrains and region profiles into a `DefDatabase`
//! - Player settings
//! - The textual form of a stocked ledger

mod error;
mod ledger;
mod loader;
mod schema;
mod settings;

pub use error::{Error, Result};
pub use ledger::{ledger_from_ron, ledger_to_ron};
pub use loader::Loader;
pub use schema::ThingSchema;
pub use settings::{load_settings_file, load_settings_str};
