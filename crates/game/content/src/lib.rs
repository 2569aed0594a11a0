//! Content collaborators for the property engine.
//!
//! This crate supplies everything `game-props` consumes but does not own:
//! - Class definitions with parent chains (override chains for binding)
//! - Placed instances with per-instance assignments
//! - Scene region/path tables and a scene-scoped asset cache (reference resolution)
//! - Entity classes declaring their property sets (soldier, grenade)
//! - RON/TOML loaders for a content data directory
//!
//! Loaders are behind the default `loaders` feature.

pub mod assets;
pub mod class;
pub mod config;
pub mod entity;
pub mod instance;
pub mod resolver;
pub mod scene;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use assets::{AssetCache, AssetKind, AssetLoader, DirectoryAssetLoader};
pub use class::{ClassChain, ClassDef, ClassLibrary};
pub use config::ContentConfig;
pub use entity::{ClassProperties, EntityClass, Grenade, Instance, Soldier};
pub use instance::InstanceDef;
pub use resolver::ContentResolver;
pub use scene::SceneIndex;

#[cfg(feature = "loaders")]
pub use loaders::{
    ClassLoader, ConfigLoader, ContentFactory, InstanceLoader, LoadResult, SceneLoader,
};
