//! Discovery of source species

use crate::{DefDatabase, DefName};
use tracing::{debug, info};

/// Cached list of every thing in the source category
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    category: DefName,
    cache: Option<Vec<DefName>>,
}

impl SourceCatalog {
    /// Create a catalog for `category`
    pub fn new(category: impl Into<DefName>) -> Self {
        Self {
            category: category.into(),
            cache: None,
        }
    }

    /// Names of all source things in registration order
    pub fn discover(&mut self, db: &DefDatabase) -> &[DefName] {
        let category = &self.category;
        self.cache.get_or_insert_with(|| {
            let sources: Vec<DefName> = db
                .things_in_category(category.as_str())
                .map(|def| def.name.clone())
                .collect();
            info!(%category, count = sources.len(), "discovered source species");
            debug!(sources = ?sources, "source species");
            sources
        })
    }

    /// Drop the cached list
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}
