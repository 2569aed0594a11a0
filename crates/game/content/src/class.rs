//! Class definitions and override chains.
//!
//! A class definition is a named list of raw property assignments plus an
//! optional parent. Classes inherit from their parent: a scalar property takes
//! the value of the most-derived class that assigns it, while repeated
//! properties collect every assignment from the root ancestor down.

use std::collections::HashMap;

use game_props::{ClassRef, PropertyName, PropertySource};
use tracing::warn;

/// One class definition as authored in content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
    /// Raw `(name, value)` assignments in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Vec<(String, String)>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the parent class.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Appends one raw assignment.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    /// The last value this class itself assigns to `name`.
    pub fn own_value(&self, name: &str) -> Option<&str> {
        let key = PropertyName::new(name);
        self.properties
            .iter()
            .rev()
            .find(|(prop, _)| key.matches(prop))
            .map(|(_, value)| value.as_str())
    }
}

/// All loaded class definitions, looked up case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct ClassLibrary {
    classes: Vec<ClassDef>,
    index: HashMap<PropertyName, usize>,
}

impl ClassLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, replacing (and returning) any class of the same name.
    pub fn insert(&mut self, class: ClassDef) -> Option<ClassDef> {
        let key = PropertyName::new(&class.name);
        match self.index.get(&key) {
            Some(&slot) => {
                warn!(target: "content::class", class = %class.name, "class redefined, replacing");
                Some(std::mem::replace(&mut self.classes[slot], class))
            }
            None => {
                self.index.insert(key, self.classes.len());
                self.classes.push(class);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ClassDef> {
        self.slot(name).map(|slot| &self.classes[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// Handle for reference-typed properties; the id is the load order.
    pub fn class_ref(&self, name: &str) -> Option<ClassRef> {
        let slot = self.slot(name)?;
        let id = u32::try_from(slot).ok()?;
        Some(ClassRef::new(id, self.classes[slot].name.as_str()))
    }

    /// Override chain for `name`, or `None` if the class is unknown.
    ///
    /// The chain ends at the first class without a parent, at a parent that
    /// is not loaded (logged), or where the parents loop back on themselves
    /// (logged).
    pub fn chain(&self, name: &str) -> Option<ClassChain<'_>> {
        let mut classes = vec![self.get(name)?];
        let mut current = classes[0];

        while let Some(parent) = current.parent.as_deref() {
            if parent.is_empty() {
                break;
            }
            let key = PropertyName::new(parent);
            if classes.iter().any(|class| key.matches(&class.name)) {
                warn!(
                    target: "content::class",
                    class = %current.name,
                    parent,
                    "class inheritance loops back, truncating chain"
                );
                break;
            }
            let Some(next) = self.get(parent) else {
                warn!(
                    target: "content::class",
                    class = %current.name,
                    parent,
                    "parent class not found, truncating chain"
                );
                break;
            };
            classes.push(next);
            current = next;
        }

        Some(ClassChain { classes })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDef> + '_ {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn slot(&self, name: &str) -> Option<usize> {
        self.index.get(&PropertyName::new(name)).copied()
    }
}

impl FromIterator<ClassDef> for ClassLibrary {
    fn from_iter<I: IntoIterator<Item = ClassDef>>(iter: I) -> Self {
        let mut library = Self::new();
        for class in iter {
            library.insert(class);
        }
        library
    }
}

/// A class and its loaded ancestors, most-derived first.
#[derive(Clone, Debug)]
pub struct ClassChain<'a> {
    classes: Vec<&'a ClassDef>,
}

impl<'a> ClassChain<'a> {
    /// The class the chain was built for.
    pub fn leaf(&self) -> &'a ClassDef {
        self.classes[0]
    }

    /// The outermost loaded ancestor.
    pub fn root(&self) -> &'a ClassDef {
        self.classes[self.classes.len() - 1]
    }

    /// Classes from most-derived to root.
    pub fn classes(&self) -> &[&'a ClassDef] {
        &self.classes
    }

    /// Class names from most-derived to root.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.classes.iter().map(|class| class.name.as_str())
    }

    /// Number of classes in the chain, at least one.
    pub fn depth(&self) -> usize {
        self.classes.len()
    }
}

impl PropertySource for ClassChain<'_> {
    fn get_raw(&self, name: &str) -> Option<&str> {
        self.classes.iter().find_map(|class| class.own_value(name))
    }

    fn get_raw_all(&self, name: &str) -> Vec<&str> {
        let key = PropertyName::new(name);
        self.classes
            .iter()
            .rev()
            .flat_map(|class| class.properties.iter())
            .filter(|(prop, _)| key.matches(prop))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    fn assignments(&self) -> Vec<(&str, &str)> {
        self.classes
            .iter()
            .rev()
            .flat_map(|class| class.properties.iter())
            .map(|(prop, value)| (prop.as_str(), value.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ClassLibrary {
        [
            ClassDef::new("com_inf_default")
                .with_property("MaxHealth", "100")
                .with_property("ControlSpeed", "stand 1.0 1.0 1.0"),
            ClassDef::new("rep_inf_default")
                .with_parent("com_inf_default")
                .with_property("maxhealth", "200")
                .with_property("ControlSpeed", "crouch 0.7 0.7 0.7"),
            ClassDef::new("rep_inf_ep3_rifleman")
                .with_parent("rep_inf_default")
                .with_property("MAXHEALTH", "300")
                .with_property("ControlSpeed", "sprint 2.0 1.0 1.0"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn chain_runs_from_leaf_to_root() {
        let library = library();
        let chain = library.chain("REP_INF_EP3_RIFLEMAN").unwrap();

        let names: Vec<_> = chain.names().collect();
        assert_eq!(names, ["rep_inf_ep3_rifleman", "rep_inf_default", "com_inf_default"]);
        assert_eq!(chain.root().name, "com_inf_default");
        assert!(library.chain("imp_inf_default").is_none());
    }

    #[test]
    fn nearest_value_wins_and_all_values_accumulate() {
        let library = library();
        let chain = library.chain("rep_inf_ep3_rifleman").unwrap();

        assert_eq!(chain.get_raw("MaxHealth"), Some("300"));
        assert_eq!(
            chain.get_raw_all("controlspeed"),
            ["stand 1.0 1.0 1.0", "crouch 0.7 0.7 0.7", "sprint 2.0 1.0 1.0"]
        );
        assert_eq!(chain.assignments().first(), Some(&("MaxHealth", "100")));
    }

    #[test]
    fn missing_parent_truncates_chain() {
        let library: ClassLibrary =
            [ClassDef::new("orphan").with_parent("gone")].into_iter().collect();
        assert_eq!(library.chain("orphan").unwrap().depth(), 1);
    }

    #[test]
    fn cycles_terminate() {
        let library: ClassLibrary = [
            ClassDef::new("a").with_parent("b"),
            ClassDef::new("b").with_parent("A"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = library.chain("a").unwrap().names().collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn redefinition_replaces_in_place() {
        let mut library = library();
        let previous =
            library.insert(ClassDef::new("COM_INF_DEFAULT").with_property("MaxHealth", "1"));

        assert!(previous.is_some());
        assert_eq!(library.len(), 3);
        assert_eq!(library.class_ref("com_inf_default").map(|c| c.id()), Some(0));
        assert_eq!(
            library.chain("rep_inf_ep3_rifleman").unwrap().get_raw_all("MaxHealth"),
            ["1", "200", "300"]
        );
    }
}
