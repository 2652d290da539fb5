//! RON content loader

use crate::error::{Error, Result};
use crate::schema::{CategoryFile, RegionFile, TerrainFile, ThingFile};
use roe_core::DefDatabase;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Loader for RON content files
///
/// Definitions are registered in the order they are read; that order is the
/// registration order classification and discovery observe later.
///
/// # Example
///
/// ```
/// use roe_script::Loader;
///
/// let mut loader = Loader::new();
/// loader
///     .load_things_str(r#"(things: [(name: "Trout", label: "trout", categories: ["Fish"])])"#)
///     .unwrap();
/// let db = loader.finish();
/// assert!(db.contains_thing("Trout"));
/// ```
pub struct Loader {
    db: DefDatabase,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            db: DefDatabase::new(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading content file");

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if filename.contains("thing") || content.contains("things:") {
            self.load_things_str(&content)
        } else if filename.contains("categor") || content.contains("categories:") {
            self.load_categories_str(&content)
        } else if filename.contains("terrain") || content.contains("terrains:") {
            self.load_terrains_str(&content)
        } else if filename.contains("region") || content.contains("regions:") {
            self.load_regions_str(&content)
        } else {
            Err(Error::InvalidSchema(format!(
                "{} is not a things, categories, terrains or regions file",
                path.display()
            )))
        }
    }

    /// Load things from a RON string
    pub fn load_things_str(&mut self, content: &str) -> Result<()> {
        let file: ThingFile = ron::from_str(content)?;
        let count = file.things.len();
        for thing in file.things {
            self.db.add_thing(thing.into_def())?;
        }
        info!(count, "loaded things");
        Ok(())
    }

    /// Load categories from a RON string
    pub fn load_categories_str(&mut self, content: &str) -> Result<()> {
        let file: CategoryFile = ron::from_str(content)?;
        let count = file.categories.len();
        for category in file.categories {
            self.db.add_category(category)?;
        }
        info!(count, "loaded categories");
        Ok(())
    }

    /// Load terrains from a RON string
    pub fn load_terrains_str(&mut self, content: &str) -> Result<()> {
        let file: TerrainFile = ron::from_str(content)?;
        let count = file.terrains.len();
        for terrain in file.terrains {
            self.db.add_terrain(terrain)?;
        }
        info!(count, "loaded terrains");
        Ok(())
    }

    /// Load region profiles from a RON string
    pub fn load_regions_str(&mut self, content: &str) -> Result<()> {
        let file: RegionFile = ron::from_str(content)?;
        let count = file.regions.len();
        for region in file.regions {
            self.db.add_region(region)?;
        }
        info!(count, "loaded region profiles");
        Ok(())
    }

    /// Load all RON files from a directory, recursing into subdirectories
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        // Sorted so registration order does not depend on the filesystem
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the database
    pub fn finish(self) -> DefDatabase {
        self.db
    }

    /// Get the current definitions (for inspection during loading)
    pub fn db(&self) -> &DefDatabase {
        &self.db
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roe_core::{generate_seed_defs, Affinity, Settings};

    const THINGS: &str = r#"
    (
        things: [
            (
                name: "Trout",
                label: "trout",
                market_value: 10.0,
                categories: ["Fish"],
            ),
            (
                name: "Cod",
                label: "cod",
                market_value: 4.0,
                categories: ["Fish"],
            ),
        ]
    )
    "#;

    const REGIONS: &str = r#"
    (
        regions: [
            (
                name: "TemperateForest",
                fish: Some((
                    freshwater_common: [(source: "Trout", chance: 0.6)],
                    saltwater_common: [(source: "Cod", chance: 0.5)],
                )),
            ),
        ]
    )
    "#;

    #[test]
    fn test_load_content() {
        let mut loader = Loader::new();
        loader.load_things_str(THINGS).unwrap();
        loader.load_regions_str(REGIONS).unwrap();
        loader
            .load_categories_str(r#"(categories: [(name: "SeedItems", label: "seeds")])"#)
            .unwrap();
        loader
            .load_terrains_str(r#"(terrains: [(name: "WaterShallow", tags: ["Water", "FreshWater"])])"#)
            .unwrap();

        let mut db = loader.finish();
        assert_eq!(db.things_in_category("Fish").count(), 2);
        assert!(db.terrain("WaterShallow").unwrap().has_tag("FreshWater"));

        let report = generate_seed_defs(&mut db, &Settings::default());
        assert_eq!(report.count(), 2);
        let cod = db.thing("Seed_Cod").unwrap();
        assert_eq!(cod.seed.as_ref().unwrap().affinity, Affinity::Salt);
        assert_eq!(cod.categories[0].as_str(), "SeedItems");
    }

    #[test]
    fn test_duplicate_thing() {
        let mut loader = Loader::new();
        loader.load_things_str(THINGS).unwrap();
        let err = loader.load_things_str(THINGS).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(name) if name == "Trout"));
    }

    #[test]
    fn test_wrong_file_shape() {
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_things_str(REGIONS),
            Err(Error::Ron(_))
        ));
    }

    #[test]
    fn test_load_directory() {
        let dir = std::env::temp_dir().join(format!("roe-script-loader-{}", std::process::id()));
        fs::create_dir_all(dir.join("regions")).unwrap();
        fs::write(dir.join("fish_things.ron"), THINGS).unwrap();
        fs::write(dir.join("regions").join("temperate.ron"), REGIONS).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut loader = Loader::new();
        loader.load_directory(&dir).unwrap();
        let db = loader.finish();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(db.thing_count(), 2);
        assert_eq!(db.regions().count(), 1);
    }

    #[test]
    fn test_load_directory_missing() {
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_directory("/nonexistent/roe/content"),
            Err(Error::Io(_))
        ));
    }
}
