//! Texture and audio lookup with an explicit, scene-scoped cache.
//!
//! Decoding is not done here; an [`AssetLoader`] only locates the file a name
//! refers to. [`AssetCache`] remembers every answer (hits and misses) until
//! [`AssetCache::clear`] is called, typically when the scene unloads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use game_props::{AudioRef, TextureRef};
use tracing::debug;

use crate::config::ContentConfig;

/// Asset categories handled by the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AssetKind {
    Texture,
    Audio,
}

/// Locates assets by name.
pub trait AssetLoader {
    fn load_texture(&self, name: &str) -> Option<PathBuf>;

    fn load_audio(&self, name: &str) -> Option<PathBuf>;
}

/// Finds `<root>/<name>.<ext>`, trying each configured extension in order.
#[derive(Clone, Debug)]
pub struct DirectoryAssetLoader {
    root: PathBuf,
    texture_extensions: Vec<String>,
    audio_extensions: Vec<String>,
}

impl DirectoryAssetLoader {
    /// Loader over `root` with the default extensions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let config = ContentConfig::default();
        Self {
            root: root.into(),
            texture_extensions: config.texture_extensions,
            audio_extensions: config.audio_extensions,
        }
    }

    /// Loader over the asset directory of `data_dir` as laid out by `config`.
    pub fn from_config(data_dir: &Path, config: &ContentConfig) -> Self {
        Self {
            root: data_dir.join(&config.asset_dir),
            texture_extensions: config.texture_extensions.clone(),
            audio_extensions: config.audio_extensions.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find(&self, name: &str, extensions: &[String]) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        extensions
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

impl AssetLoader for DirectoryAssetLoader {
    fn load_texture(&self, name: &str) -> Option<PathBuf> {
        self.find(name, &self.texture_extensions)
    }

    fn load_audio(&self, name: &str) -> Option<PathBuf> {
        self.find(name, &self.audio_extensions)
    }
}

#[derive(Debug, Default)]
struct Slots {
    by_name: HashMap<String, Option<u32>>,
    paths: Vec<PathBuf>,
}

/// Memoizing front of an [`AssetLoader`].
///
/// Lookups take `&self` so the cache can sit behind a resolver; it is
/// single-threaded.
#[derive(Debug)]
pub struct AssetCache<L> {
    loader: L,
    textures: RefCell<Slots>,
    audio: RefCell<Slots>,
}

impl<L: AssetLoader> AssetCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            textures: RefCell::default(),
            audio: RefCell::default(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Texture handle for `name`, loading it on first use.
    pub fn texture(&self, name: &str) -> Option<TextureRef> {
        self.fetch(AssetKind::Texture, name)
            .map(|id| TextureRef::new(id, name))
    }

    /// Audio handle for `name`, loading it on first use.
    pub fn audio(&self, name: &str) -> Option<AudioRef> {
        self.fetch(AssetKind::Audio, name).map(|id| AudioRef::new(id, name))
    }

    /// File behind a handle id.
    pub fn path(&self, kind: AssetKind, id: u32) -> Option<PathBuf> {
        let slots = self.slots(kind).borrow();
        usize::try_from(id)
            .ok()
            .and_then(|index| slots.paths.get(index).cloned())
    }

    /// Number of assets of `kind` found so far.
    pub fn loaded(&self, kind: AssetKind) -> usize {
        self.slots(kind).borrow().paths.len()
    }

    /// Forgets every cached answer. Handles issued before are stale.
    pub fn clear(&self) {
        for kind in [AssetKind::Texture, AssetKind::Audio] {
            let mut slots = self.slots(kind).borrow_mut();
            slots.by_name.clear();
            slots.paths.clear();
        }
        debug!(target: "content::assets", "asset cache cleared");
    }

    fn slots(&self, kind: AssetKind) -> &RefCell<Slots> {
        match kind {
            AssetKind::Texture => &self.textures,
            AssetKind::Audio => &self.audio,
        }
    }

    fn fetch(&self, kind: AssetKind, name: &str) -> Option<u32> {
        if let Some(cached) = self.slots(kind).borrow().by_name.get(name) {
            return *cached;
        }

        let located = match kind {
            AssetKind::Texture => self.loader.load_texture(name),
            AssetKind::Audio => self.loader.load_audio(name),
        };

        let mut slots = self.slots(kind).borrow_mut();
        let id = match located {
            Some(path) => {
                let id = u32::try_from(slots.paths.len()).ok();
                if id.is_some() {
                    debug!(
                        target: "content::assets",
                        %kind,
                        name,
                        path = %path.display(),
                        "asset loaded"
                    );
                    slots.paths.push(path);
                }
                id
            }
            None => {
                debug!(target: "content::assets", %kind, name, "asset not found");
                None
            }
        };
        slots.by_name.insert(name.to_string(), id);
        id
    }
}
