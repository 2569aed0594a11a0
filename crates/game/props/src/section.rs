//! Repeated property groups.
//!
//! A section is a block of related properties that may appear several times,
//! each time introduced by a header assignment. Soldier classes list their
//! weapons this way:
//!
//! ```text
//! WeaponSection = 1
//! WeaponName    = "rep_weap_inf_rifle"
//! WeaponAmmo    = 4
//! WeaponSection = 2
//! WeaponName    = "rep_weap_inf_pistol"
//! WeaponChannel = 1
//! ```
//!
//! Every header occurrence starts a fresh entry cloned from the section's
//! template; the member assignments that follow fill that entry.

use tracing::debug;

use crate::error::PropertyError;
use crate::name::PropertyName;
use crate::registry::PropertyRegistry;
use crate::resolve::Resolver;

/// An ordered list of property groups sharing one template.
#[derive(Clone, Debug)]
pub struct PropertySection {
    header: PropertyName,
    template: PropertyRegistry,
    entries: Vec<PropertyRegistry>,
}

impl PropertySection {
    /// Creates an empty section whose entries start as copies of `template`.
    pub fn new(header: &str, template: PropertyRegistry) -> Self {
        Self {
            header: PropertyName::new(header),
            template,
            entries: Vec::new(),
        }
    }

    /// Normalized header name.
    pub fn header(&self) -> &PropertyName {
        &self.header
    }

    /// Returns true if `name` is the header assignment.
    pub fn is_header(&self, name: &str) -> bool {
        self.header.matches(name)
    }

    /// Returns true if `name` is one of the template's members.
    pub fn is_member(&self, name: &str) -> bool {
        self.template.contains(name)
    }

    /// Defaults every new entry starts from.
    pub fn template(&self) -> &PropertyRegistry {
        &self.template
    }

    /// Starts a new entry and returns it.
    pub fn begin_entry(&mut self) -> &mut PropertyRegistry {
        self.entries.push(self.template.clone());
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Applies a member assignment to the current (last) entry.
    ///
    /// Returns `Ok(false)` without touching anything when no entry has been
    /// started yet.
    ///
    /// # Errors
    ///
    /// [`PropertyError::NotFound`] for non-members, or the member's conversion
    /// error.
    pub fn apply(
        &mut self,
        name: &str,
        text: &str,
        resolver: &dyn Resolver,
    ) -> Result<bool, PropertyError> {
        if !self.is_member(name) {
            return Err(PropertyError::not_found(name));
        }
        let Some(entry) = self.entries.last_mut() else {
            debug!(
                target: "props::section",
                section = %self.header,
                property = name,
                "member assigned before any section header, ignoring"
            );
            return Ok(false);
        };
        entry.set_from_string_by_name(name, text, resolver)?;
        Ok(true)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[PropertyRegistry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no header was seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry, keeping the template.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::PropertyHandle;
    use crate::name::PropKey;
    use crate::resolve::NullResolver;

    const WEAPON_NAME: PropKey<String> = PropKey::new("WeaponName");
    const WEAPON_AMMO: PropKey<i32> = PropKey::new("WeaponAmmo");

    fn weapons() -> PropertySection {
        PropertySection::new(
            "WeaponSection",
            PropertyRegistry::new()
                .with("WeaponName", PropertyHandle::scalar(String::new()))
                .with("WeaponAmmo", PropertyHandle::scalar(0)),
        )
    }

    #[test]
    fn each_header_starts_an_entry_from_the_template() {
        let mut section = weapons();

        section.begin_entry();
        section.apply("weaponname", "rep_weap_inf_rifle", &NullResolver).unwrap();
        section.apply("WeaponAmmo", "4", &NullResolver).unwrap();
        section.begin_entry();
        section.apply("WeaponName", "rep_weap_inf_pistol", &NullResolver).unwrap();

        assert_eq!(section.len(), 2);
        assert_eq!(section.entries()[0].get(WEAPON_NAME), "rep_weap_inf_rifle");
        assert_eq!(section.entries()[0].get(WEAPON_AMMO), 4);
        assert_eq!(section.entries()[1].get(WEAPON_NAME), "rep_weap_inf_pistol");
        assert_eq!(section.entries()[1].get(WEAPON_AMMO), 0);
        assert_eq!(section.template().get(WEAPON_AMMO), 0);
    }

    #[test]
    fn members_before_header_are_ignored() {
        let mut section = weapons();
        assert_eq!(section.apply("WeaponName", "orphan", &NullResolver), Ok(false));
        assert!(section.is_empty());
    }

    #[test]
    fn non_members_are_rejected() {
        let mut section = weapons();
        section.begin_entry();
        assert!(matches!(
            section.apply("MaxHealth", "100", &NullResolver),
            Err(PropertyError::NotFound { .. })
        ));
        assert!(section.is_header("WEAPONSECTION"));
    }
}
