//! Placed instances.

use game_props::{PropertyName, PropertySource};

/// An entity placed in a scene: a class plus per-instance overrides.
///
/// As a [`PropertySource`] an instance exposes only its own assignments. The
/// class values are already in the registry it is bound against (a clone of
/// the bound class registry), so repeated properties are not counted twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceDef {
    pub name: String,
    pub class: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Vec<(String, String)>,
}

impl InstanceDef {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    fn matching<'s>(&'s self, name: &str) -> impl DoubleEndedIterator<Item = &'s str> + 's {
        let key = PropertyName::new(name);
        self.properties
            .iter()
            .filter(move |(prop, _)| key.matches(prop))
            .map(|(_, value)| value.as_str())
    }
}

impl PropertySource for InstanceDef {
    fn get_raw(&self, name: &str) -> Option<&str> {
        self.matching(name).next_back()
    }

    fn get_raw_all(&self, name: &str) -> Vec<&str> {
        self.matching(name).collect()
    }

    fn assignments(&self) -> Vec<(&str, &str)> {
        self.properties
            .iter()
            .map(|(prop, value)| (prop.as_str(), value.as_str()))
            .collect()
    }
}
