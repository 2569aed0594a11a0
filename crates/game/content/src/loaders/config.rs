//! Content configuration loader.

use std::path::Path;

use crate::config::ContentConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for the data directory layout from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`ContentConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<ContentConfig> {
        let content = read_file(path)?;
        let config: ContentConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "classes = \"odf.ron\"\ntexture_extensions = [\"dds\"]\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();

        assert_eq!(config.classes, "odf.ron");
        assert_eq!(config.texture_extensions, ["dds"]);
        assert_eq!(config.scene, ContentConfig::DEFAULT_SCENE);
        assert_eq!(config.audio_extensions, ContentConfig::DEFAULT_AUDIO_EXTENSIONS);
    }
}
