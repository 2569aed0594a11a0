//! Scene name tables.

use game_props::{PathRef, RegionRef};

/// Named regions and paths of the loaded scene.
///
/// Handles are issued by position, so ids stay stable for the lifetime of the
/// scene. Names are matched exactly, as authored in the world file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneIndex {
    pub regions: Vec<String>,
    pub paths: Vec<String>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, name: impl Into<String>) -> Self {
        self.regions.push(name.into());
        self
    }

    pub fn with_path(mut self, name: impl Into<String>) -> Self {
        self.paths.push(name.into());
        self
    }

    pub fn region(&self, name: &str) -> Option<RegionRef> {
        position(&self.regions, name).map(|id| RegionRef::new(id, name))
    }

    pub fn path(&self, name: &str) -> Option<PathRef> {
        position(&self.paths, name).map(|id| PathRef::new(id, name))
    }
}

fn position(names: &[String], name: &str) -> Option<u32> {
    names
        .iter()
        .position(|candidate| candidate == name)
        .and_then(|index| u32::try_from(index).ok())
}
