/// Layout of a content data directory.
///
/// Every field has a default, so `config.toml` only lists what differs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentConfig {
    /// Class definition file, relative to the data directory.
    pub classes: String,
    /// Placed instances file, relative to the data directory.
    pub instances: String,
    /// Scene name tables file, relative to the data directory.
    pub scene: String,
    /// Directory searched for texture and audio files.
    pub asset_dir: String,
    /// Texture file extensions, tried in order.
    pub texture_extensions: Vec<String>,
    /// Audio file extensions, tried in order.
    pub audio_extensions: Vec<String>,
}

impl ContentConfig {
    pub const DEFAULT_CLASSES: &'static str = "classes.ron";
    pub const DEFAULT_INSTANCES: &'static str = "instances.ron";
    pub const DEFAULT_SCENE: &'static str = "scene.ron";
    pub const DEFAULT_ASSET_DIR: &'static str = "assets";
    pub const DEFAULT_TEXTURE_EXTENSIONS: &'static [&'static str] = &["tga", "png"];
    pub const DEFAULT_AUDIO_EXTENSIONS: &'static [&'static str] = &["wav", "ogg"];

    pub fn new() -> Self {
        Self {
            classes: Self::DEFAULT_CLASSES.to_string(),
            instances: Self::DEFAULT_INSTANCES.to_string(),
            scene: Self::DEFAULT_SCENE.to_string(),
            asset_dir: Self::DEFAULT_ASSET_DIR.to_string(),
            texture_extensions: owned(Self::DEFAULT_TEXTURE_EXTENSIONS),
            audio_extensions: owned(Self::DEFAULT_AUDIO_EXTENSIONS),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
