//! Case-insensitive property registry.
//!
//! One registry exists per class definition (class defaults) and one per live
//! instance (instance values). Instance registries are made by cloning the
//! class registry, so gameplay can change an instance's values without
//! touching the class template or any other instance.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::error::PropertyError;
use crate::handle::{PropertyHandle, PropertyType};
use crate::multi::MultiProp;
use crate::name::{PropKey, PropertyName};
use crate::resolve::Resolver;
use crate::scalar::Scalar;
use crate::section::PropertySection;
use crate::value::Value;

#[derive(Clone, Debug)]
struct Slot {
    /// Spelling used at registration, kept for display.
    name: String,
    handle: PropertyHandle,
}

/// Mapping from case-insensitive name to property handle.
///
/// Iteration follows registration order.
#[derive(Clone, Default)]
pub struct PropertyRegistry {
    index: HashMap<PropertyName, usize>,
    slots: Vec<Slot>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` under `name`.
    ///
    /// # Panics
    ///
    /// Panics if a property with the same name (ignoring case) is already
    /// registered. Property sets are declared in code, so a duplicate is a
    /// programming error.
    pub fn register(&mut self, name: &str, handle: impl Into<PropertyHandle>) -> &mut Self {
        if let Err(err) = self.try_register(name, handle) {
            panic!("{err}");
        }
        self
    }

    /// Builder form of [`PropertyRegistry::register`].
    ///
    /// # Panics
    ///
    /// Panics on duplicate names, like `register`.
    #[must_use]
    pub fn with(mut self, name: &str, handle: impl Into<PropertyHandle>) -> Self {
        self.register(name, handle);
        self
    }

    /// Registers `handle` under `name`, reporting duplicates instead of
    /// panicking.
    pub fn try_register(
        &mut self,
        name: &str,
        handle: impl Into<PropertyHandle>,
    ) -> Result<(), PropertyError> {
        let key = PropertyName::new(name);
        if self.index.contains_key(&key) {
            return Err(PropertyError::Duplicate {
                name: name.to_string(),
            });
        }
        self.index.insert(key, self.slots.len());
        self.slots.push(Slot {
            name: name.to_string(),
            handle: handle.into(),
        });
        Ok(())
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Untyped handle lookup.
    pub fn handle(&self, name: &str) -> Option<&PropertyHandle> {
        self.position(name).map(|i| &self.slots[i].handle)
    }

    /// Mutable untyped handle lookup.
    pub fn handle_mut(&mut self, name: &str) -> Option<&mut PropertyHandle> {
        self.position(name).map(|i| &mut self.slots[i].handle)
    }

    /// Typed scalar lookup.
    ///
    /// Returns `None` when the name is unknown *or* registered with another
    /// type; callers treat both as "no such property".
    pub fn lookup<T: PropertyType>(&self, name: &str) -> Option<&Scalar<T>> {
        self.handle(name).and_then(T::scalar)
    }

    /// Mutable typed scalar lookup.
    pub fn lookup_mut<T: PropertyType>(&mut self, name: &str) -> Option<&mut Scalar<T>> {
        self.handle_mut(name).and_then(T::scalar_mut)
    }

    /// Looks up a multi-value property.
    pub fn multi(&self, name: &str) -> Option<&MultiProp> {
        match self.handle(name)? {
            PropertyHandle::Multi(multi) => Some(multi),
            _ => None,
        }
    }

    /// Mutable multi-value lookup.
    pub fn multi_mut(&mut self, name: &str) -> Option<&mut MultiProp> {
        match self.handle_mut(name)? {
            PropertyHandle::Multi(multi) => Some(multi),
            _ => None,
        }
    }

    /// Looks up a section.
    pub fn section(&self, name: &str) -> Option<&PropertySection> {
        match self.handle(name)? {
            PropertyHandle::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Mutable section lookup.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut PropertySection> {
        match self.handle_mut(name)? {
            PropertyHandle::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Scalar behind a typed key.
    pub fn scalar<T: PropertyType>(&self, key: PropKey<T>) -> Option<&Scalar<T>> {
        self.lookup(key.name())
    }

    /// Mutable scalar behind a typed key.
    pub fn scalar_mut<T: PropertyType>(&mut self, key: PropKey<T>) -> Option<&mut Scalar<T>> {
        self.lookup_mut(key.name())
    }

    /// Reads the value behind a typed key.
    ///
    /// A missing or differently-typed property logs a warning and reads as
    /// `T::default()`.
    pub fn get<T: PropertyType>(&self, key: PropKey<T>) -> T {
        match self.scalar(key) {
            Some(scalar) => scalar.get().clone(),
            None => {
                warn!(
                    target: "props::registry",
                    property = key.name(),
                    expected = %T::TAG,
                    "property missing or of another type, reading default"
                );
                T::default()
            }
        }
    }

    /// Assigns a tagged value by name.
    ///
    /// Unknown names and failed writes are logged and returned; the registry
    /// is left unchanged in both cases.
    pub fn set_by_name(
        &mut self,
        name: &str,
        value: Value,
        resolver: &dyn Resolver,
    ) -> Result<(), PropertyError> {
        let Some(handle) = self.handle_mut(name) else {
            warn!(target: "props::registry", property = name, "could not find property");
            return Err(PropertyError::not_found(name));
        };
        handle.set_from_value(value, resolver).inspect_err(|err| {
            warn!(
                target: "props::registry",
                property = name,
                kind = %err.kind(),
                code = err.error_code(),
                error = %err,
                "property assignment failed"
            );
        })
    }

    /// Applies a raw content string by name.
    ///
    /// Same error policy as [`PropertyRegistry::set_by_name`].
    pub fn set_from_string_by_name(
        &mut self,
        name: &str,
        text: &str,
        resolver: &dyn Resolver,
    ) -> Result<(), PropertyError> {
        self.set_by_name(name, Value::String(text.to_string()), resolver)
    }

    /// Iterates over `(name, handle)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyHandle)> + '_ {
        self.slots.iter().map(|slot| (slot.name.as_str(), &slot.handle))
    }

    /// Iterates mutably over `(name, handle)` in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut PropertyHandle)> + '_ {
        self.slots
            .iter_mut()
            .map(|slot| (slot.name.as_str(), &mut slot.handle))
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&PropertyName::new(name)).copied()
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|slot| (&slot.name, &slot.handle)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::NullResolver;
    use crate::tag::TypeTag;

    const MAX_HEALTH: PropKey<f32> = PropKey::new("MaxHealth");
    const HEALTH_TYPE: PropKey<String> = PropKey::new("HealthType");

    fn soldier() -> PropertyRegistry {
        PropertyRegistry::new()
            .with("WeaponName", PropertyHandle::scalar(String::new()))
            .with("MaxHealth", PropertyHandle::scalar(100.0_f32))
            .with("HealthType", PropertyHandle::scalar(String::from("person")))
            .with(
                "ControlSpeed",
                PropertyHandle::multi([
                    TypeTag::String,
                    TypeTag::Float,
                    TypeTag::Float,
                    TypeTag::Float,
                ]),
            )
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = soldier();
        let a = registry.lookup::<String>("WeaponName").unwrap() as *const _;
        let b = registry.lookup::<String>("weaponname").unwrap() as *const _;
        assert_eq!(a, b);
        assert!(registry.contains("WEAPONNAME"));
    }

    #[test]
    fn lookup_with_wrong_type_is_absent() {
        let registry = soldier();
        assert!(registry.lookup::<i32>("MaxHealth").is_none());
        assert!(registry.lookup::<f32>("MaxHealth").is_some());
        assert!(registry.multi("MaxHealth").is_none());
        assert!(registry.multi("controlspeed").is_some());
        assert!(registry.lookup::<f32>("MaxSpeed").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        soldier().register("maxhealth", PropertyHandle::scalar(1.0_f32));
    }

    #[test]
    fn try_register_reports_duplicates() {
        let mut registry = soldier();
        assert_eq!(
            registry.try_register("MAXHEALTH", PropertyHandle::scalar(1.0_f32)),
            Err(PropertyError::Duplicate {
                name: "MAXHEALTH".into()
            })
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn set_by_name_applies_values() {
        let mut registry = soldier();

        registry
            .set_by_name("maxhealth", Value::Int(250), &NullResolver)
            .unwrap();
        registry
            .set_by_name("HealthType", Value::from("droid"), &NullResolver)
            .unwrap();

        assert_eq!(registry.get(MAX_HEALTH), 250.0);
        assert_eq!(registry.get(HEALTH_TYPE), "droid");
    }

    #[test]
    fn set_by_name_unknown_is_noop() {
        let mut registry = soldier();
        let before = format!("{registry:?}");

        let err = registry
            .set_by_name("MaxShield", Value::Float(1.0), &NullResolver)
            .unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
        assert_eq!(format!("{registry:?}"), before);
    }

    #[test]
    fn get_missing_key_reads_default() {
        const MISSING: PropKey<i32> = PropKey::new("MedalsTypeToUnlock");
        assert_eq!(soldier().get(MISSING), 0);
    }

    #[test]
    fn clones_are_independent() {
        let class = soldier();
        let mut instance = class.clone();

        instance.scalar_mut(MAX_HEALTH).unwrap().set(50.0);
        instance
            .multi_mut("ControlSpeed")
            .unwrap()
            .append_from_string("stand 1 1 1", &NullResolver);

        assert_eq!(class.get(MAX_HEALTH), 100.0);
        assert_eq!(instance.get(MAX_HEALTH), 50.0);
        assert!(class.multi("ControlSpeed").unwrap().is_empty());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let names: Vec<_> = soldier().iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, ["WeaponName", "MaxHealth", "HealthType", "ControlSpeed"]);
    }
}
