//! Content loaders for reading class, instance and scene data from files.
//!
//! Class and instance definitions are RON lists of raw assignments; the data
//! directory layout is described by a TOML [`ContentConfig`](crate::ContentConfig).

pub mod class;
pub mod config;
pub mod factory;
pub mod instance;
pub mod scene;

pub use class::ClassLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use instance::InstanceLoader;
pub use scene::SceneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
