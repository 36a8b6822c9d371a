// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Two-level bug-fix category tree
//!
//! The tree is static configuration: it is built once at startup (either the
//! built-in taxonomy or one loaded from a JSON file) and then only read.
//! Sub-category names are unique across the whole tree, which lets the
//! document parser infer a main category from a sub-category heading.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReleaseLogError;

/// Built-in taxonomy used when no category file is given
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Objects / Animation / GP",
        &[
            "Animation",
            "Constraints",
            "Grease Pencil",
            "Objects",
            "Dependency Graph",
        ],
    ),
    (
        "Data / Geometry",
        &[
            "Armatures",
            "Curve/Text Editing",
            "Mesh Editing",
            "Meta Editing",
            "Modifiers",
            "Material / Texture",
        ],
    ),
    (
        "Physics / Simulations / Sculpt / Paint",
        &[
            "Particles",
            "Physics / Hair / Simulations",
            "Sculpting / Painting",
        ],
    ),
    (
        "Image / Video / Render",
        &[
            "Image / UV Editing",
            "Masking",
            "Motion Tracking",
            "Movie Clip Editor",
            "Nodes / Compositor",
            "Render",
            "Render: Cycles",
            "Render: Freestyle",
            "Sequencer",
        ],
    ),
    (
        "UI / Spaces / Transform",
        &[
            "3D View",
            "Input (NDOF / 3D Mouse)",
            "Outliner",
            "Text Editor",
            "Transform",
            "User Interface",
        ],
    ),
    ("Game Engine", &[]),
    (
        "System / Misc",
        &["Audio", "Collada", "File I/O", "Other", "Python", "System"],
    ),
];

/// A main category and its ordered sub-categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainCategory {
    /// Heading text of the main category
    pub name: String,
    /// Sub-category names, in display order
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl MainCategory {
    /// Create a main category from a name and its sub-category names
    #[must_use]
    pub fn new(name: impl Into<String>, subcategories: &[&str]) -> Self {
        Self {
            name: name.into(),
            subcategories: subcategories.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Ordered, validated category tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    mains: Vec<MainCategory>,
    /// Sub-category name -> index of its main category
    sub_to_main: HashMap<String, usize>,
}

impl CategoryTree {
    /// Build a tree, checking that every name occurs only once
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::DuplicateCategory` if a main or sub-category
    /// name is repeated anywhere in the tree.
    pub fn new(mains: Vec<MainCategory>) -> Result<Self, ReleaseLogError> {
        let mut main_names: Vec<&str> = Vec::with_capacity(mains.len());
        let mut sub_to_main = HashMap::new();

        for (index, main) in mains.iter().enumerate() {
            if main_names.contains(&main.name.as_str()) {
                return Err(ReleaseLogError::DuplicateCategory {
                    name: main.name.clone(),
                });
            }
            main_names.push(&main.name);

            for sub in &main.subcategories {
                if sub_to_main.insert(sub.clone(), index).is_some() {
                    return Err(ReleaseLogError::DuplicateCategory { name: sub.clone() });
                }
            }
        }

        if let Some(clash) = main_names.iter().find(|name| sub_to_main.contains_key(**name)) {
            return Err(ReleaseLogError::DuplicateCategory {
                name: (*clash).to_string(),
            });
        }

        Ok(Self { mains, sub_to_main })
    }

    /// Parse a tree from JSON: `[{"name": "...", "subcategories": ["..."]}]`
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::CategoryConfig` for malformed JSON and
    /// `ReleaseLogError::DuplicateCategory` for repeated names.
    pub fn from_json(json: &str) -> Result<Self, ReleaseLogError> {
        let mains: Vec<MainCategory> = serde_json::from_str(json)?;
        Self::new(mains)
    }

    /// Load a tree from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::Io` if the file cannot be read, otherwise
    /// the errors of [`CategoryTree::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReleaseLogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Main categories in display order
    #[must_use]
    pub fn mains(&self) -> &[MainCategory] {
        &self.mains
    }

    /// Number of main categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.mains.len()
    }

    /// Check if the tree has no categories at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mains.is_empty()
    }

    /// Main category at `index`
    #[must_use]
    pub fn main(&self, index: usize) -> Option<&MainCategory> {
        self.mains.get(index)
    }

    /// Check if `name` is a main category
    #[must_use]
    pub fn is_main(&self, name: &str) -> bool {
        self.mains.iter().any(|m| m.name == name)
    }

    /// Main category owning the sub-category `sub`
    #[must_use]
    pub fn main_of(&self, sub: &str) -> Option<&str> {
        self.sub_to_main
            .get(sub)
            .map(|&index| self.mains[index].name.as_str())
    }

    /// Resolve a (main, sub) index selection to category names
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::InvalidCategory` if either index is out of
    /// range.
    pub fn resolve(
        &self,
        main_index: usize,
        sub_index: Option<usize>,
    ) -> Result<(&str, Option<&str>), ReleaseLogError> {
        let invalid = || ReleaseLogError::InvalidCategory {
            main: main_index,
            sub: sub_index,
        };
        let main = self.mains.get(main_index).ok_or_else(invalid)?;
        let sub = match sub_index {
            Some(index) => Some(main.subcategories.get(index).ok_or_else(invalid)?.as_str()),
            None => None,
        };
        Ok((main.name.as_str(), sub))
    }
}

impl Default for CategoryTree {
    fn default() -> Self {
        let mains: Vec<MainCategory> = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, subs)| MainCategory::new(*name, subs))
            .collect();
        let sub_to_main = mains
            .iter()
            .enumerate()
            .flat_map(|(index, main)| main.subcategories.iter().map(move |s| (s.clone(), index)))
            .collect();
        Self { mains, sub_to_main }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_tree_shape() {
        let tree = CategoryTree::default();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.mains()[1].name, "Data / Geometry");
        assert!(tree.main(5).expect("game engine").subcategories.is_empty());
    }

    #[test]
    fn test_default_tree_names_are_unique() {
        let tree = CategoryTree::default();
        assert!(CategoryTree::new(tree.mains().to_vec()).is_ok());
    }

    #[test]
    fn test_main_of_sub() {
        let tree = CategoryTree::default();
        assert_eq!(tree.main_of("Mesh Editing"), Some("Data / Geometry"));
        assert_eq!(tree.main_of("Render: Cycles"), Some("Image / Video / Render"));
        assert_eq!(tree.main_of("Data / Geometry"), None);
        assert_eq!(tree.main_of("Nope"), None);
    }

    #[test]
    fn test_is_main() {
        let tree = CategoryTree::default();
        assert!(tree.is_main("Game Engine"));
        assert!(!tree.is_main("Python"));
    }

    #[test]
    fn test_resolve_valid() {
        let tree = CategoryTree::default();
        assert_eq!(
            tree.resolve(1, Some(2)).expect("valid"),
            ("Data / Geometry", Some("Mesh Editing"))
        );
        assert_eq!(tree.resolve(5, None).expect("valid"), ("Game Engine", None));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let tree = CategoryTree::default();
        assert!(matches!(
            tree.resolve(7, None),
            Err(ReleaseLogError::InvalidCategory { main: 7, sub: None })
        ));
        assert!(matches!(
            tree.resolve(5, Some(0)),
            Err(ReleaseLogError::InvalidCategory { main: 5, sub: Some(0) })
        ));
    }

    #[test]
    fn test_duplicate_sub_across_mains() {
        let result = CategoryTree::new(vec![
            MainCategory::new("A", &["Shared"]),
            MainCategory::new("B", &["Shared"]),
        ]);
        match result {
            Err(ReleaseLogError::DuplicateCategory { name }) => assert_eq!(name, "Shared"),
            other => panic!("Expected DuplicateCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_main() {
        let result = CategoryTree::new(vec![
            MainCategory::new("A", &[]),
            MainCategory::new("A", &["x"]),
        ]);
        assert!(matches!(result, Err(ReleaseLogError::DuplicateCategory { .. })));
    }

    #[test]
    fn test_sub_named_like_main() {
        let result = CategoryTree::new(vec![
            MainCategory::new("A", &["B"]),
            MainCategory::new("B", &[]),
        ]);
        assert!(matches!(result, Err(ReleaseLogError::DuplicateCategory { .. })));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "Core", "subcategories": ["Parser", "Runtime"]},
            {"name": "Docs"}
        ]"#;
        let tree = CategoryTree::from_json(json).expect("parse");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.main_of("Runtime"), Some("Core"));
        assert!(tree.main(1).expect("docs").subcategories.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        let result = CategoryTree::from_json("{not json");
        assert!(matches!(result, Err(ReleaseLogError::CategoryConfig(_))));
    }
}
