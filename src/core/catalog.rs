//! # Catalog
//!
//! The fixed value domains a navigator chooses from: levels, the subjects
//! offered at each level, and (quiz only) lesson names.
//!
//! Subject domains are keyed by level because they differ structurally
//! between levels (e.g. `HistoryAndGeography` is only taught in `1bac`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::selection::{Slot, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub levels: Vec<String>,
    /// Subjects offered per level, keyed by level name.
    #[serde(default)]
    pub subjects: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub lessons: Vec<String>,
}

const BROWSER_LEVELS: &[&str] = &["1bac", "2bac"];

const BROWSER_SUBJECTS_1BAC: &[&str] = &[
    "English",
    "French",
    "Arabic",
    "Math",
    "SVT",
    "Physique",
    "Philosophy",
    "HistoryAndGeography",
    "IslamicEducation",
];

const BROWSER_SUBJECTS_2BAC: &[&str] = &[
    "English",
    "French",
    "Arabic",
    "Math",
    "SVT",
    "Physique",
    "Philosophy",
    "IslamicEducation",
];

const QUIZ_LEVELS: &[&str] = &["1BAC", "2BAC"];
const QUIZ_SUBJECTS: &[&str] = &["English", "Math", "History", "Physics"];
const QUIZ_LESSONS: &[&str] = &["Lesson 1", "Lesson 2", "Lesson 3", "Lesson 4"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Catalog {
    /// Catalog for the document browser.
    pub fn browser_default() -> Self {
        let mut subjects = BTreeMap::new();
        subjects.insert("1bac".to_string(), owned(BROWSER_SUBJECTS_1BAC));
        subjects.insert("2bac".to_string(), owned(BROWSER_SUBJECTS_2BAC));
        Self {
            levels: owned(BROWSER_LEVELS),
            subjects,
            lessons: Vec::new(),
        }
    }

    /// Catalog for the quiz selector. Subjects do not depend on the level.
    pub fn quiz_default() -> Self {
        Self::uniform(owned(QUIZ_LEVELS), owned(QUIZ_SUBJECTS), owned(QUIZ_LESSONS))
    }

    /// Build a catalog where every level offers the same subjects.
    pub fn uniform(levels: Vec<String>, subjects: Vec<String>, lessons: Vec<String>) -> Self {
        let subjects = levels
            .iter()
            .map(|level| (level.clone(), subjects.clone()))
            .collect();
        Self {
            levels,
            subjects,
            lessons,
        }
    }

    pub fn subjects_for_level(&self, level: &str) -> &[String] {
        self.subjects
            .get(level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_subject(&self, level: &str, subject: &str) -> bool {
        self.subjects_for_level(level).iter().any(|s| s == subject)
    }

    /// A catalog is usable by `variant` when it has at least one level,
    /// every level offers at least one subject, and a variant whose chain
    /// ends in a lesson has lessons to pick from.
    pub fn is_usable_for(&self, variant: Variant) -> bool {
        let levels_ok = !self.levels.is_empty()
            && self
                .levels
                .iter()
                .all(|level| !self.subjects_for_level(level).is_empty());
        let lessons_ok = !variant.supports(Slot::Lesson) || !self.lessons.is_empty();
        levels_ok && lessons_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_subjects_differ_per_level() {
        let catalog = Catalog::browser_default();
        assert!(catalog.has_subject("1bac", "HistoryAndGeography"));
        assert!(!catalog.has_subject("2bac", "HistoryAndGeography"));
        assert_eq!(catalog.subjects_for_level("1bac").len(), 9);
        assert_eq!(catalog.subjects_for_level("2bac").len(), 8);
    }

    #[test]
    fn test_unknown_level_has_no_subjects() {
        let catalog = Catalog::browser_default();
        assert!(catalog.subjects_for_level("3bac").is_empty());
        assert!(catalog.subjects_for_level("1BAC").is_empty());
    }

    #[test]
    fn test_quiz_subjects_are_level_independent() {
        let catalog = Catalog::quiz_default();
        assert_eq!(
            catalog.subjects_for_level("1BAC"),
            catalog.subjects_for_level("2BAC")
        );
        assert_eq!(catalog.lessons.last().map(String::as_str), Some("Lesson 4"));
    }

    #[test]
    fn test_sparse_toml_catalog() {
        let toml_str = r#"
levels = ["1bac"]

[subjects]
"1bac" = ["Math"]
"#;
        let catalog: Catalog = toml::from_str(toml_str).unwrap();
        assert!(catalog.is_usable_for(Variant::Browser));
        assert!(catalog.lessons.is_empty());
        // Nothing to pick at the end of the quiz chain
        assert!(!catalog.is_usable_for(Variant::Quiz));
        assert!(catalog.has_subject("1bac", "Math"));
    }

    #[test]
    fn test_catalog_without_subjects_is_unusable() {
        let catalog = Catalog {
            levels: vec!["1bac".to_string()],
            subjects: BTreeMap::new(),
            lessons: Vec::new(),
        };
        assert!(!catalog.is_usable_for(Variant::Browser));
    }
}
