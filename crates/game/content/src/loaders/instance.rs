//! Placed instance loader.

use std::path::Path;

use crate::instance::InstanceDef;
use crate::loaders::{LoadResult, read_file};

/// Loader for placed instances from RON files.
pub struct InstanceLoader;

impl InstanceLoader {
    /// Load instances from a RON file.
    ///
    /// File format: `Vec<InstanceDef>`
    ///
    /// ```ron
    /// [
    ///     (name: "cp1", class: "com_bldg_controlzone", properties: [("Team", "1")]),
    /// ]
    /// ```
    pub fn load(path: &Path) -> LoadResult<Vec<InstanceDef>> {
        let content = read_file(path)?;
        let instances: Vec<InstanceDef> = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse instance RON at {}: {}", path.display(), e)
        })?;

        Ok(instances)
    }
}
