//! Scene name table loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scene::SceneIndex;

/// Loader for scene region and path names from RON files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load the scene index from a RON file.
    ///
    /// ```ron
    /// (regions: ["cp1_capture"], paths: ["cp1_spawn"])
    /// ```
    pub fn load(path: &Path) -> LoadResult<SceneIndex> {
        let content = read_file(path)?;
        let scene: SceneIndex = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse scene RON at {}: {}", path.display(), e)
        })?;

        Ok(scene)
    }
}
