//! Settings files

use crate::error::Result;
use roe_core::Settings;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse settings from RON; missing fields take their defaults
///
/// # Example
///
/// ```
/// use roe_core::Affinity;
///
/// let settings = roe_script::load_settings_str("(default_affinity: Salt, xp_per_seeding: 0)").unwrap();
/// assert_eq!(settings.default_affinity, Affinity::Salt);
/// assert_eq!(settings.xp_per_seeding, 0);
/// assert!(settings.enforce_affinity);
/// ```
pub fn load_settings_str(content: &str) -> Result<Settings> {
    Ok(ron::from_str(content)?)
}

/// Read settings from a RON file
pub fn load_settings_file(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let settings = load_settings_str(&fs::read_to_string(path)?)?;
    info!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
}
