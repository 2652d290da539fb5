//! Water affinity of species, seeds and terrain

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of water a species lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Affinity {
    #[default]
    Fresh,
    Salt,
}

impl Affinity {
    /// Adjective used in labels and player-facing messages
    pub fn adjective(self) -> &'static str {
        match self {
            Affinity::Fresh => "freshwater",
            Affinity::Salt => "saltwater",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.adjective())
    }
}
