use game_props::{AudioRef, ClassRef, PathRef, RegionRef, Resolver, TextureRef};

use crate::assets::{AssetCache, AssetLoader};
use crate::class::ClassLibrary;
use crate::scene::SceneIndex;

/// Resolves reference properties against loaded content.
///
/// Classes come from the class library, regions and paths from the scene
/// index, textures and audio through the asset cache.
pub struct ContentResolver<'a, L> {
    classes: &'a ClassLibrary,
    scene: &'a SceneIndex,
    assets: &'a AssetCache<L>,
}

impl<'a, L: AssetLoader> ContentResolver<'a, L> {
    pub fn new(
        classes: &'a ClassLibrary,
        scene: &'a SceneIndex,
        assets: &'a AssetCache<L>,
    ) -> Self {
        Self {
            classes,
            scene,
            assets,
        }
    }
}

impl<L: AssetLoader> Resolver for ContentResolver<'_, L> {
    fn class(&self, name: &str) -> Option<ClassRef> {
        self.classes.class_ref(name)
    }

    fn region(&self, name: &str) -> Option<RegionRef> {
        self.scene.region(name)
    }

    fn path(&self, name: &str) -> Option<PathRef> {
        self.scene.path(name)
    }

    fn texture(&self, name: &str) -> Option<TextureRef> {
        self.assets.texture(name)
    }

    fn audio(&self, name: &str) -> Option<AudioRef> {
        self.assets.audio(name)
    }
}
