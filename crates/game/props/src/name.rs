//! Case-insensitive property names and typed keys.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

use crate::handle::PropertyType;

/// A property name normalized for lookup.
///
/// Content files spell the same property `MaxHealth`, `maxhealth` or
/// `MAXHEALTH`. The constructor lower-cases once, and equality and hashing
/// only ever see the normalized form, so a `PropertyName` cannot be compared
/// half-normalized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyName(String);

impl PropertyName {
    /// Normalizes `name` for lookup.
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// The normalized (lower-case) spelling.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against an unnormalized name.
    pub fn matches(&self, name: &str) -> bool {
        self.0 == name.to_lowercase()
    }
}

impl From<&str> for PropertyName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for PropertyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed handle to a scalar property name.
///
/// Entity classes declare their properties as `const` keys so readers don't
/// restate the value type at every call site:
///
/// ```
/// use game_props::{PropKey, PropertyHandle, PropertyRegistry};
///
/// const MAX_HEALTH: PropKey<f32> = PropKey::new("MaxHealth");
///
/// let registry =
///     PropertyRegistry::new().with(MAX_HEALTH.name(), PropertyHandle::scalar(100.0_f32));
/// assert_eq!(registry.get(MAX_HEALTH), 100.0);
/// ```
pub struct PropKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PropertyType> PropKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Declared spelling of the property name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for PropKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropKey<T> {}

impl<T> fmt::Debug for PropKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropKey").field(&self.name).finish()
    }
}
