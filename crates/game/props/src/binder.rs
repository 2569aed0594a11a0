//! Applying raw content to a registry.
//!
//! A [`PropertySource`] exposes the raw assignments of one override chain
//! (a class and its ancestors, or a single placed instance). The
//! [`PropertyBinder`] walks a registry and pulls the text each property needs:
//!
//! - scalars take the nearest definition; the most-derived class wins,
//! - multi-value properties take every occurrence in the chain, so derived
//!   classes add rows instead of replacing them,
//! - sections replay the chain's assignments in declaration order.

use tracing::{debug, warn};

use crate::error::PropertyError;
use crate::handle::PropertyHandle;
use crate::registry::PropertyRegistry;
use crate::resolve::Resolver;
use crate::section::PropertySection;

/// Raw property text for one override chain.
pub trait PropertySource {
    /// The nearest value for `name`, most-derived definition first.
    fn get_raw(&self, name: &str) -> Option<&str>;

    /// Every value for `name` across the chain, root ancestor first.
    fn get_raw_all(&self, name: &str) -> Vec<&str>;

    /// Every assignment across the chain in declaration order, root ancestor
    /// first. Only sections need this.
    fn assignments(&self) -> Vec<(&str, &str)> {
        Vec::new()
    }
}

/// Result of assigning one property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assigned {
    /// The source had nothing for the property; its default stands.
    Unset,
    /// Number of values applied (rows for multi, members for sections).
    Applied(usize),
}

/// Summary of binding a whole registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BindReport {
    /// Properties that received at least one value.
    pub applied: usize,
    /// Properties the source did not mention.
    pub unset: usize,
    /// Properties whose value could not be applied, with the reason.
    pub failed: Vec<(String, PropertyError)>,
}

impl BindReport {
    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Adds the counts and failures of a later pass over the same registry.
    pub fn merge(&mut self, other: BindReport) {
        self.applied += other.applied;
        self.unset += other.unset;
        self.failed.extend(other.failed);
    }
}

/// Pulls values from a [`PropertySource`] into registries.
pub struct PropertyBinder<'r> {
    resolver: &'r dyn Resolver,
}

impl<'r> PropertyBinder<'r> {
    pub fn new(resolver: &'r dyn Resolver) -> Self {
        Self { resolver }
    }

    /// Assigns the source's value(s) for `name` to `handle`.
    ///
    /// # Errors
    ///
    /// Returns the scalar's conversion error. Multi rows and section members
    /// never fail the whole property; their problems are logged.
    pub fn assign(
        &self,
        source: &dyn PropertySource,
        name: &str,
        handle: &mut PropertyHandle,
    ) -> Result<Assigned, PropertyError> {
        match handle {
            PropertyHandle::Multi(multi) => {
                let values = source.get_raw_all(name);
                for text in &values {
                    multi.append_from_string(text, self.resolver);
                }
                Ok(applied_or_unset(values.len()))
            }
            PropertyHandle::Section(section) => {
                Ok(applied_or_unset(self.replay(source, section)))
            }
            scalar => match source.get_raw(name) {
                Some(text) => {
                    scalar.set_from_string(text, self.resolver)?;
                    Ok(Assigned::Applied(1))
                }
                None => Ok(Assigned::Unset),
            },
        }
    }

    /// Assigns every registered property from `source`.
    ///
    /// Failures are logged and collected; binding always visits every
    /// property.
    pub fn bind(
        &self,
        source: &dyn PropertySource,
        registry: &mut PropertyRegistry,
    ) -> BindReport {
        self.bind_from(source, registry, 0)
    }

    /// Like [`PropertyBinder::bind`], but only for the properties registered
    /// at position `start` or later.
    ///
    /// Properties added to an already bound registry are bound this way, so
    /// the earlier ones are not assigned twice.
    pub fn bind_from(
        &self,
        source: &dyn PropertySource,
        registry: &mut PropertyRegistry,
        start: usize,
    ) -> BindReport {
        let mut report = BindReport::default();
        for (name, handle) in registry.iter_mut().skip(start) {
            match self.assign(source, name, handle) {
                Ok(Assigned::Applied(_)) => report.applied += 1,
                Ok(Assigned::Unset) => {
                    debug!(target: "props::binder", property = name, "unset, keeping default");
                    report.unset += 1;
                }
                Err(err) => {
                    warn!(
                        target: "props::binder",
                        property = name,
                        kind = %err.kind(),
                        code = err.error_code(),
                        error = %err,
                        "failed to bind property"
                    );
                    report.failed.push((name.to_string(), err));
                }
            }
        }
        report
    }

    /// Replays the source's assignments into a section. Returns the number of
    /// member values applied.
    fn replay(&self, source: &dyn PropertySource, section: &mut PropertySection) -> usize {
        let mut applied = 0;
        for (name, text) in source.assignments() {
            if section.is_header(name) {
                section.begin_entry();
                continue;
            }
            if !section.is_member(name) {
                continue;
            }
            // The entry registry already logs a member that fails to convert.
            if let Ok(true) = section.apply(name, text, self.resolver) {
                applied += 1;
            }
        }
        applied
    }
}

fn applied_or_unset(count: usize) -> Assigned {
    if count == 0 {
        Assigned::Unset
    } else {
        Assigned::Applied(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::PropKey;
    use crate::resolve::NullResolver;
    use crate::tag::TypeTag;
    use crate::value::Value;

    /// Override chain stored root first, one assignment list per level.
    struct Chain(Vec<Vec<(&'static str, &'static str)>>);

    impl PropertySource for Chain {
        fn get_raw(&self, name: &str) -> Option<&str> {
            self.0.iter().rev().find_map(|level| {
                level
                    .iter()
                    .rev()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| *value)
            })
        }

        fn get_raw_all(&self, name: &str) -> Vec<&str> {
            self.assignments()
                .into_iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
                .collect()
        }

        fn assignments(&self) -> Vec<(&str, &str)> {
            self.0.iter().flatten().map(|(k, v)| (*k, *v)).collect()
        }
    }

    const MAX_HEALTH: PropKey<f32> = PropKey::new("MaxHealth");
    const HEALTH_TYPE: PropKey<String> = PropKey::new("HealthType");

    #[test]
    fn multi_binds_every_occurrence_in_order() {
        let chain = Chain(vec![vec![("weapon", "rifle 30 0"), ("weapon", "pistol 12 1")]]);
        let mut registry = PropertyRegistry::new().with(
            "Weapon",
            PropertyHandle::multi([TypeTag::String, TypeTag::Int, TypeTag::Int]),
        );

        let report = PropertyBinder::new(&NullResolver).bind(&chain, &mut registry);

        assert_eq!(report.applied, 1);
        let weapons = registry.multi("weapon").unwrap();
        assert_eq!(
            weapons.row(0),
            Some(&[Value::from("rifle"), Value::Int(30), Value::Int(0)][..])
        );
        assert_eq!(
            weapons.row(1),
            Some(&[Value::from("pistol"), Value::Int(12), Value::Int(1)][..])
        );
    }

    #[test]
    fn scalars_override_and_multis_accumulate() {
        let chain = Chain(vec![
            vec![("MaxHealth", "100"), ("AmbientSound", "rep goodie")],
            vec![("maxhealth", "200"), ("AmbientSound", "cis baddie")],
            vec![("MAXHEALTH", "300"), ("ambientsound", "imp baddie")],
        ]);
        let mut registry = PropertyRegistry::new()
            .with(MAX_HEALTH.name(), PropertyHandle::scalar(0.0_f32))
            .with(HEALTH_TYPE.name(), PropertyHandle::scalar(String::from("person")))
            .with("AmbientSound", PropertyHandle::multi([TypeTag::String, TypeTag::String]));

        let report = PropertyBinder::new(&NullResolver).bind(&chain, &mut registry);

        assert_eq!(registry.get(MAX_HEALTH), 300.0);
        assert_eq!(registry.get(HEALTH_TYPE), "person");
        let teams: Vec<String> = registry
            .multi("AmbientSound")
            .unwrap()
            .rows()
            .iter()
            .map(|row| row[0].to_string())
            .collect();
        assert_eq!(teams, ["rep", "cis", "imp"]);
        assert_eq!((report.applied, report.unset), (2, 1));
        assert!(report.is_clean());
    }

    #[test]
    fn failures_are_collected_not_propagated() {
        let chain = Chain(vec![vec![("MaxHealth", "lots"), ("HealthType", "droid")]]);
        let mut registry = PropertyRegistry::new()
            .with(MAX_HEALTH.name(), PropertyHandle::scalar(100.0_f32))
            .with(HEALTH_TYPE.name(), PropertyHandle::scalar(String::new()));

        let report = PropertyBinder::new(&NullResolver).bind(&chain, &mut registry);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "MaxHealth");
        assert_eq!(registry.get(MAX_HEALTH), 100.0);
        assert_eq!(registry.get(HEALTH_TYPE), "droid");
    }

    #[test]
    fn sections_replay_assignments() {
        let chain = Chain(vec![vec![
            ("WeaponName", "ignored"),
            ("WeaponSection", "1"),
            ("WeaponName", "rep_weap_inf_rifle"),
            ("MaxHealth", "100"),
            ("WeaponSection", "2"),
            ("WeaponName", "rep_weap_inf_pistol"),
            ("WeaponChannel", "1"),
        ]]);
        let template = PropertyRegistry::new()
            .with("WeaponName", PropertyHandle::scalar(String::new()))
            .with("WeaponChannel", PropertyHandle::scalar(0));
        let mut registry = PropertyRegistry::new()
            .with("WeaponSection", PropertySection::new("WeaponSection", template));

        PropertyBinder::new(&NullResolver).bind(&chain, &mut registry);

        let section = registry.section("weaponsection").unwrap();
        assert_eq!(section.len(), 2);
        assert_eq!(
            section.entries()[0].get(PropKey::<String>::new("WeaponName")),
            "rep_weap_inf_rifle"
        );
        assert_eq!(section.entries()[1].get(PropKey::<i32>::new("WeaponChannel")), 1);
    }

    #[test]
    fn headerless_members_update_the_last_bound_entry() {
        let template = PropertyRegistry::new()
            .with("WeaponName", PropertyHandle::scalar(String::new()))
            .with("WeaponAmmo", PropertyHandle::scalar(0));
        let mut class = PropertyRegistry::new()
            .with("WeaponSection", PropertySection::new("WeaponSection", template));
        let class_chain = Chain(vec![vec![
            ("WeaponSection", "1"),
            ("WeaponName", "rep_weap_inf_rifle"),
            ("WeaponSection", "2"),
            ("WeaponName", "rep_weap_inf_pistol"),
        ]]);
        PropertyBinder::new(&NullResolver).bind(&class_chain, &mut class);

        let mut instance = class.clone();
        let placed = Chain(vec![vec![
            ("WeaponName", "rep_weap_inf_shotgun"),
            ("WeaponAmmo", "lots"),
        ]]);
        let report = PropertyBinder::new(&NullResolver).bind(&placed, &mut instance);

        let name = PropKey::<String>::new("WeaponName");
        let entries = instance.section("WeaponSection").unwrap().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].get(name), "rep_weap_inf_rifle");
        assert_eq!(entries[1].get(name), "rep_weap_inf_shotgun");
        assert_eq!(entries[1].get(PropKey::<i32>::new("WeaponAmmo")), 0);
        // A bad member never fails the section as a whole.
        assert!(report.is_clean());
        assert_eq!(
            class.section("WeaponSection").unwrap().entries()[1].get(name),
            "rep_weap_inf_pistol"
        );
    }

    #[test]
    fn bind_from_skips_properties_already_bound() {
        let chain = Chain(vec![vec![("MaxHealth", "50"), ("CurHealth", "20")]]);
        let mut registry =
            PropertyRegistry::new().with(MAX_HEALTH.name(), PropertyHandle::scalar(300.0_f32));
        let binder = PropertyBinder::new(&NullResolver);
        let mut report = binder.bind(&chain, &mut registry);

        registry.scalar_mut(MAX_HEALTH).unwrap().set(75.0);
        registry.register("CurHealth", PropertyHandle::scalar(0.0_f32));
        report.merge(binder.bind_from(&chain, &mut registry, 1));

        assert_eq!(registry.get(MAX_HEALTH), 75.0);
        assert_eq!(registry.get(PropKey::<f32>::new("CurHealth")), 20.0);
        assert_eq!((report.applied, report.unset), (2, 0));
    }

    #[test]
    fn empty_source_leaves_defaults() {
        let mut registry =
            PropertyRegistry::new().with(MAX_HEALTH.name(), PropertyHandle::scalar(100.0_f32));
        let report = PropertyBinder::new(&NullResolver).bind(&Chain(Vec::new()), &mut registry);

        assert_eq!(report.unset, 1);
        assert_eq!(registry.get(MAX_HEALTH), 100.0);
    }
}
