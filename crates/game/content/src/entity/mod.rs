//! Entity classes and their bound property sets.
//!
//! An entity class (soldier, grenade, ...) declares its properties in code.
//! Binding happens twice:
//!
//! 1. [`ClassProperties::bind`] fills a fresh registry from a class override
//!    chain. This is the class template, shared by every instance.
//! 2. [`Instance::spawn`] clones the template and applies the instance's own
//!    assignments. Per-instance properties are added afterwards, so they can
//!    be seeded from the instance's bound values, and then bound themselves.
//!
//! The two registries share no mutable state; changing an instance never
//! touches its class or its siblings.

pub mod grenade;
pub mod soldier;

use std::marker::PhantomData;

use game_props::{BindReport, PropKey, PropertyBinder, PropertyRegistry, PropertyType, Resolver};

use crate::class::ClassChain;
use crate::instance::InstanceDef;

pub use grenade::Grenade;
pub use soldier::Soldier;

/// Property declarations of one kind of entity.
pub trait EntityClass {
    /// Name content uses for this kind, e.g. `"soldier"`.
    const LABEL: &'static str;

    /// Class-level properties with their defaults.
    fn class_properties() -> PropertyRegistry;

    /// Adds properties that only exist on live instances.
    ///
    /// `properties` already holds the class values with the instance's own
    /// assignments applied, so instance defaults may be derived from them.
    fn instance_properties(properties: &mut PropertyRegistry) {
        let _ = properties;
    }
}

/// Class template bound from an override chain.
pub struct ClassProperties<E> {
    name: String,
    properties: PropertyRegistry,
    report: BindReport,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityClass> ClassProperties<E> {
    pub fn bind(chain: &ClassChain<'_>, resolver: &dyn Resolver) -> Self {
        let name = chain.leaf().name.clone();
        let mut properties = E::class_properties();
        let report = PropertyBinder::new(resolver).bind(chain, &mut properties);

        tracing::debug!(
            target: "content::entity",
            class = %name,
            kind = E::LABEL,
            applied = report.applied,
            unset = report.unset,
            failed = report.failed.len(),
            "class properties bound"
        );

        Self {
            name,
            properties,
            report,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    pub fn report(&self) -> &BindReport {
        &self.report
    }

    pub fn get<T: PropertyType>(&self, key: PropKey<T>) -> T {
        self.properties.get(key)
    }
}

/// A live entity with its own copy of the class properties.
pub struct Instance<E> {
    name: String,
    class: String,
    properties: PropertyRegistry,
    report: BindReport,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityClass> Instance<E> {
    /// Creates an instance of `class` placed as `def`.
    pub fn spawn(class: &ClassProperties<E>, def: &InstanceDef, resolver: &dyn Resolver) -> Self {
        if !def.class.eq_ignore_ascii_case(class.name()) {
            tracing::warn!(
                target: "content::entity",
                instance = %def.name,
                declared = %def.class,
                class = class.name(),
                "instance spawned from a different class than it declares"
            );
        }

        let binder = PropertyBinder::new(resolver);
        let mut properties = class.properties().clone();
        let mut report = binder.bind(def, &mut properties);

        let bound = properties.len();
        E::instance_properties(&mut properties);
        report.merge(binder.bind_from(def, &mut properties, bound));

        Self {
            name: def.name.clone(),
            class: class.name().to_string(),
            properties,
            report,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyRegistry {
        &mut self.properties
    }

    pub fn report(&self) -> &BindReport {
        &self.report
    }

    pub fn get<T: PropertyType>(&self, key: PropKey<T>) -> T {
        self.properties.get(key)
    }
}
