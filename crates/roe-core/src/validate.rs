//! Post-generation check that every source species received its seed

use crate::{seed_name, DefDatabase, DefName, Settings};
use tracing::{error, info, warn};

/// Outcome of [`validate_generated`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of source species checked
    pub sources: usize,
    /// Sources with a seed definition
    pub found: usize,
    /// `(source, expected seed name)` for every source without one
    pub missing: Vec<(DefName, DefName)>,
    /// Whether the seed category exists
    pub category_present: bool,
    /// Seed definitions filed under the seed category
    pub categorised: usize,
}

impl ValidationReport {
    /// Check if every source has a seed and the category exists
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.category_present
    }
}

/// Check that every source in the configured category has a seed
pub fn validate_generated(db: &DefDatabase, settings: &Settings) -> ValidationReport {
    let mut report = ValidationReport::default();

    for source in db.things_in_category(settings.source_category.as_str()) {
        report.sources += 1;
        let expected = seed_name(source.name.as_str());
        if db.contains_thing(expected.as_str()) {
            report.found += 1;
        } else {
            warn!(source = %source.name, %expected, "missing seed definition");
            report.missing.push((source.name.clone(), expected));
        }
    }

    info!(
        found = report.found,
        sources = report.sources,
        "seed validation complete"
    );

    report.category_present = db.category(settings.seed_category.as_str()).is_some();
    if report.category_present {
        report.categorised = db
            .things_in_category(settings.seed_category.as_str())
            .filter(|def| def.seed.is_some())
            .count();
    } else {
        error!(
            category = %settings.seed_category,
            "seed category not found; seeds will not appear in storage filters"
        );
    }

    report
}
