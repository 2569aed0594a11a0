//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use crate::assets::{AssetCache, DirectoryAssetLoader};
use crate::class::ClassLibrary;
use crate::config::ContentConfig;
use crate::instance::InstanceDef;
use crate::loaders::{ClassLoader, ConfigLoader, InstanceLoader, LoadResult, SceneLoader};
use crate::scene::SceneIndex;

/// Content factory that loads class, instance and scene data from a data
/// directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── classes.ron
/// ├── instances.ron
/// ├── scene.ron
/// └── assets/
///     ├── rep_icon.tga
///     └── com_blg_commandpost_goodie.wav
/// ```
///
/// File names follow [`ContentConfig`].
pub struct ContentFactory {
    data_dir: PathBuf,
    config: ContentConfig,
}

impl ContentFactory {
    /// Creates a factory with the default layout.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(data_dir, ContentConfig::default())
    }

    /// Creates a factory with an explicit layout.
    pub fn with_config(data_dir: impl Into<PathBuf>, config: ContentConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
        }
    }

    /// Creates a factory using `config.toml` from the data directory when it
    /// exists, the default layout otherwise.
    pub fn open(data_dir: impl Into<PathBuf>) -> LoadResult<Self> {
        let data_dir = data_dir.into();
        let config_path = data_dir.join("config.toml");
        let config = if config_path.is_file() {
            ConfigLoader::load(&config_path)?
        } else {
            tracing::debug!(
                target: "content::factory",
                dir = %data_dir.display(),
                "no config.toml, using default layout"
            );
            ContentConfig::default()
        };
        Ok(Self::with_config(data_dir, config))
    }

    /// Load class definitions.
    pub fn load_classes(&self) -> LoadResult<ClassLibrary> {
        ClassLoader::load(&self.data_dir.join(&self.config.classes))
    }

    /// Load placed instances.
    pub fn load_instances(&self) -> LoadResult<Vec<InstanceDef>> {
        InstanceLoader::load(&self.data_dir.join(&self.config.instances))
    }

    /// Load the scene name tables. A missing scene file yields an empty index.
    pub fn load_scene(&self) -> LoadResult<SceneIndex> {
        let path = self.data_dir.join(&self.config.scene);
        if !path.is_file() {
            return Ok(SceneIndex::default());
        }
        SceneLoader::load(&path)
    }

    /// Asset cache over the configured asset directory.
    pub fn asset_cache(&self) -> AssetCache<DirectoryAssetLoader> {
        AssetCache::new(DirectoryAssetLoader::from_config(&self.data_dir, &self.config))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(factory.config(), &ContentConfig::default());
        assert_eq!(
            factory.asset_cache().loader().root(),
            Path::new("/tmp/data/assets")
        );
    }

    #[test]
    fn open_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::open(dir.path()).unwrap();

        assert_eq!(factory.config().classes, ContentConfig::DEFAULT_CLASSES);
        assert_eq!(factory.load_scene().unwrap(), SceneIndex::default());
        assert!(factory.load_classes().is_err());
    }
}
