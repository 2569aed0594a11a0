//! Class definition loader.

use std::path::Path;

use crate::class::{ClassDef, ClassLibrary};
use crate::loaders::{LoadResult, read_file};

/// Loader for class definitions from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load class definitions from a RON file.
    ///
    /// File format: `Vec<ClassDef>`
    ///
    /// ```ron
    /// [
    ///     (name: "com_inf_default", properties: [("MaxHealth", "100")]),
    ///     (
    ///         name: "rep_inf_ep3_rifleman",
    ///         parent: Some("com_inf_default"),
    ///         properties: [("MaxHealth", "300")],
    ///     ),
    /// ]
    /// ```
    pub fn load(path: &Path) -> LoadResult<ClassLibrary> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class RON at {}: {}", path.display(), e))
    }

    /// Parse class definitions from RON text.
    pub fn parse(content: &str) -> LoadResult<ClassLibrary> {
        let classes: Vec<ClassDef> = ron::from_str(content)?;
        Ok(classes.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parents_and_ordered_assignments() {
        let library = ClassLoader::parse(
            r#"[
                (name: "com_inf_default", properties: [("ControlSpeed", "stand 1 1 1")]),
                (
                    name: "rep_inf_default",
                    parent: Some("com_inf_default"),
                    properties: [("ControlSpeed", "crouch 1 1 1"), ("MaxHealth", "300")],
                ),
            ]"#,
        )
        .unwrap();

        assert_eq!(library.len(), 2);
        let class = library.get("REP_INF_DEFAULT").unwrap();
        assert_eq!(class.parent.as_deref(), Some("com_inf_default"));
        assert_eq!(class.own_value("maxhealth"), Some("300"));
        assert_eq!(library.chain("rep_inf_default").unwrap().depth(), 2);
    }

    #[test]
    fn reports_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.ron");
        std::fs::write(&path, "[(name: )]").unwrap();

        let err = ClassLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse class RON"));
    }
}
