//! Reference handles and the resolver seam.
//!
//! Reference-typed properties hold handles issued by other subsystems (class
//! table, scene, texture importer, sound loader). The engine never owns those
//! subsystems; it calls a [`Resolver`] by name and stores whatever comes back.
//! A miss is stored as `None`, never reported as an error.

use std::fmt;
use std::sync::Arc;

macro_rules! reference_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            id: u32,
            name: Arc<str>,
        }

        impl $name {
            /// Creates a handle for the resource `name` with a resolver-assigned id.
            pub fn new(id: u32, name: impl Into<Arc<str>>) -> Self {
                Self {
                    id,
                    name: name.into(),
                }
            }

            /// Resolver-assigned id.
            #[inline]
            pub fn id(&self) -> u32 {
                self.id
            }

            /// Name the resource was resolved from.
            #[inline]
            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", self.name, self.id)
            }
        }
    };
}

reference_handle!(
    /// Handle to an entity class definition.
    ClassRef
);
reference_handle!(
    /// Handle to a named scene region.
    RegionRef
);
reference_handle!(
    /// Handle to a named scene path.
    PathRef
);
reference_handle!(
    /// Handle to an imported texture.
    TextureRef
);
reference_handle!(
    /// Handle to a loaded audio clip.
    AudioRef
);

/// Name-to-handle lookups consumed by reference conversions.
///
/// Every method is a synchronous `name -> Option<handle>` call. Implementations
/// may load lazily and may be slow; the engine does not care. The default
/// methods resolve nothing, so a resolver only overrides the kinds it serves.
pub trait Resolver {
    /// Looks up an entity class by name.
    fn class(&self, name: &str) -> Option<ClassRef> {
        let _ = name;
        None
    }

    /// Looks up a scene region by name.
    fn region(&self, name: &str) -> Option<RegionRef> {
        let _ = name;
        None
    }

    /// Looks up a scene path by name.
    fn path(&self, name: &str) -> Option<PathRef> {
        let _ = name;
        None
    }

    /// Imports a texture by name.
    fn texture(&self, name: &str) -> Option<TextureRef> {
        let _ = name;
        None
    }

    /// Loads an audio clip by name.
    fn audio(&self, name: &str) -> Option<AudioRef> {
        let _ = name;
        None
    }
}

/// Resolver that never finds anything.
///
/// Useful for registries that hold only primitive properties, and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResolver;

impl Resolver for NullResolver {}
