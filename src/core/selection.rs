//! # Selection Navigator
//!
//! The hierarchical state machine behind the subject browser and the quiz
//! selector.
//!
//! ```text
//! Browser:  level ──▶ subject ──▶ resource      (mode: lessons|exams, always set)
//! Quiz:     level ──▶ subject ──▶ lesson
//! ```
//!
//! Slots fill strictly left to right. Changing or clearing a slot clears
//! everything that depends on it, so a `subject` never outlives the `level`
//! whose domain it came from. `go_back()` pops the deepest set slot of the
//! chain; `current_depth()` is how many chain slots are set and is what the
//! presentation layer routes on.
//!
//! `mode` is a default-valued slot: it is never unset, is not part of the
//! back-navigation chain, and changing it only invalidates the opened
//! resource.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::catalog::Catalog;
use crate::core::resources::{ResourceConfig, ResourceRef, derive_resources};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Level,
    Subject,
    Mode,
    Lesson,
    Resource,
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Level => "level",
            Slot::Subject => "subject",
            Slot::Mode => "mode",
            Slot::Lesson => "lesson",
            Slot::Resource => "resource",
        }
    }

    /// Slots that must be cleared when this one changes.
    pub fn dependents(self) -> &'static [Slot] {
        match self {
            Slot::Level => &[Slot::Subject, Slot::Lesson, Slot::Resource],
            Slot::Subject => &[Slot::Lesson, Slot::Resource],
            Slot::Mode => &[Slot::Resource],
            Slot::Lesson | Slot::Resource => &[],
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Lessons,
    Exams,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Lessons, Mode::Exams];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Lessons => "lessons",
            Mode::Exams => "exams",
        }
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Lessons => Mode::Exams,
            Mode::Exams => Mode::Lessons,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lessons" => Ok(Mode::Lessons),
            "exams" => Ok(Mode::Exams),
            _ => Err(()),
        }
    }
}

/// Which flow a navigator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Browser,
    Quiz,
}

impl Variant {
    /// The back-navigation chain, shallowest first.
    pub fn chain(self) -> &'static [Slot] {
        match self {
            Variant::Browser => &[Slot::Level, Slot::Subject, Slot::Resource],
            Variant::Quiz => &[Slot::Level, Slot::Subject, Slot::Lesson],
        }
    }

    pub fn supports(self, slot: Slot) -> bool {
        match self {
            Variant::Browser => slot != Slot::Lesson,
            Variant::Quiz => !matches!(slot, Slot::Mode | Slot::Resource),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The value is outside the slot's currently valid domain.
    InvalidValue { slot: Slot, value: String },
    /// Resources were requested before the required slots were set.
    IncompleteSelection { missing: Slot },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvalidValue { slot, value } => {
                write!(f, "'{value}' is not a valid {slot} here")
            }
            SelectionError::IncompleteSelection { missing } => {
                write!(f, "selection incomplete: no {missing} chosen")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// The current values of every slot. Only a `Navigator` can change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    level: Option<String>,
    subject: Option<String>,
    mode: Mode,
    lesson: Option<String>,
    resource: Option<ResourceRef>,
}

impl Selection {
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn lesson(&self) -> Option<&str> {
        self.lesson.as_deref()
    }

    pub fn resource(&self) -> Option<&ResourceRef> {
        self.resource.as_ref()
    }

    pub fn is_set(&self, slot: Slot) -> bool {
        match slot {
            Slot::Level => self.level.is_some(),
            Slot::Subject => self.subject.is_some(),
            Slot::Mode => true,
            Slot::Lesson => self.lesson.is_some(),
            Slot::Resource => self.resource.is_some(),
        }
    }

    fn clear(&mut self, slot: Slot) {
        match slot {
            Slot::Level => self.level = None,
            Slot::Subject => self.subject = None,
            Slot::Mode => self.mode = Mode::default(),
            Slot::Lesson => self.lesson = None,
            Slot::Resource => self.resource = None,
        }
    }
}

/// Values read back from the persistence adapter at startup.
/// Each field was loaded independently and may be stale or invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSelection {
    pub level: Option<String>,
    pub subject: Option<String>,
    pub mode: Option<String>,
    pub lesson: Option<String>,
}

pub struct Navigator {
    variant: Variant,
    catalog: Arc<Catalog>,
    resources: ResourceConfig,
    selection: Selection,
}

impl Navigator {
    pub fn new(variant: Variant, catalog: Arc<Catalog>, resources: ResourceConfig) -> Self {
        Self {
            variant,
            catalog,
            resources,
            selection: Selection::default(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn resource_config(&self) -> &ResourceConfig {
        &self.resources
    }

    /// Values currently valid for `slot`, given the upstream slots.
    /// Empty when the slot is unsupported or its upstream is unset.
    pub fn domain(&self, slot: Slot) -> Vec<String> {
        if !self.variant.supports(slot) {
            return Vec::new();
        }
        let sel = &self.selection;
        match slot {
            Slot::Level => self.catalog.levels.clone(),
            Slot::Subject => sel
                .level()
                .map(|level| self.catalog.subjects_for_level(level).to_vec())
                .unwrap_or_default(),
            Slot::Mode => Mode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            Slot::Lesson => {
                if sel.subject.is_some() {
                    self.catalog.lessons.clone()
                } else {
                    Vec::new()
                }
            }
            Slot::Resource => self
                .resources()
                .map(|refs| refs.into_iter().map(|r| r.url).collect())
                .unwrap_or_default(),
        }
    }

    /// Set one slot. Clears dependent slots when the value changes.
    pub fn set_slot(&mut self, slot: Slot, value: &str) -> Result<&Selection, SelectionError> {
        let invalid = || SelectionError::InvalidValue {
            slot,
            value: value.to_string(),
        };
        if !self.domain(slot).iter().any(|v| v == value) {
            debug!("{:?} rejected {slot}={value}", self.variant);
            return Err(invalid());
        }

        // Resolve the new value before touching state so a failure leaves it unchanged.
        let resource = if slot == Slot::Resource {
            let found = self
                .resources()
                .ok()
                .and_then(|refs| refs.into_iter().find(|r| r.url == value));
            Some(found.ok_or_else(invalid)?)
        } else {
            None
        };
        let mode = if slot == Slot::Mode {
            Some(Mode::from_str(value).map_err(|_| invalid())?)
        } else {
            None
        };

        if self.current_value(slot).as_deref() == Some(value) {
            return Ok(&self.selection);
        }

        for dependent in slot.dependents() {
            self.selection.clear(*dependent);
        }
        match slot {
            Slot::Level => self.selection.level = Some(value.to_string()),
            Slot::Subject => self.selection.subject = Some(value.to_string()),
            Slot::Lesson => self.selection.lesson = Some(value.to_string()),
            Slot::Mode => self.selection.mode = mode.unwrap_or_default(),
            Slot::Resource => self.selection.resource = resource,
        }
        info!("{:?} selected {slot}={value}", self.variant);
        Ok(&self.selection)
    }

    fn current_value(&self, slot: Slot) -> Option<String> {
        let sel = &self.selection;
        match slot {
            Slot::Level => sel.level.clone(),
            Slot::Subject => sel.subject.clone(),
            Slot::Mode => Some(sel.mode.as_str().to_string()),
            Slot::Lesson => sel.lesson.clone(),
            Slot::Resource => sel.resource.as_ref().map(|r| r.url.clone()),
        }
    }

    /// Clear the deepest set slot of the chain. Returns the cleared slot,
    /// or `None` when nothing was selected.
    pub fn go_back(&mut self) -> Option<Slot> {
        let slot = self
            .variant
            .chain()
            .iter()
            .rev()
            .copied()
            .find(|slot| self.selection.is_set(*slot))?;
        self.selection.clear(slot);
        for dependent in slot.dependents() {
            self.selection.clear(*dependent);
        }
        debug!("{:?} back: cleared {slot}", self.variant);
        Some(slot)
    }

    pub fn reset(&mut self) {
        self.selection = Selection::default();
        debug!("{:?} reset", self.variant);
    }

    /// True when every slot needed for the variant's outcome is set.
    pub fn is_complete(&self) -> bool {
        let sel = &self.selection;
        let base = sel.level.is_some() && sel.subject.is_some();
        match self.variant {
            Variant::Browser => base,
            Variant::Quiz => base && sel.lesson.is_some(),
        }
    }

    /// Number of set chain slots: 0 = nothing selected.
    pub fn current_depth(&self) -> usize {
        self.variant
            .chain()
            .iter()
            .take_while(|slot| self.selection.is_set(**slot))
            .count()
    }

    /// The document list for the current selection.
    pub fn resources(&self) -> Result<Vec<ResourceRef>, SelectionError> {
        derive_resources(&self.selection, &self.resources)
    }

    /// Re-apply persisted values in dependency order.
    ///
    /// The first value that no longer fits its domain is dropped along with
    /// everything downstream of it. An unusable mode falls back to the
    /// default without affecting the other slots. Returns the dropped slots.
    pub fn restore(&mut self, saved: &SavedSelection) -> Vec<Slot> {
        self.reset();
        let mut dropped = Vec::new();

        if self.variant.supports(Slot::Mode)
            && let Some(mode) = saved.mode.as_deref()
            && let Err(e) = self.set_slot(Slot::Mode, mode)
        {
            warn!("Ignoring saved mode: {e}");
            dropped.push(Slot::Mode);
        }

        let chain = [
            (Slot::Level, saved.level.as_deref()),
            (Slot::Subject, saved.subject.as_deref()),
            (Slot::Lesson, saved.lesson.as_deref()),
        ];
        let mut broken = false;
        for (slot, value) in chain {
            if !self.variant.supports(slot) {
                continue;
            }
            let Some(value) = value else {
                broken = true;
                continue;
            };
            if broken {
                warn!("Ignoring saved {slot}={value}: upstream slot missing");
                dropped.push(slot);
                continue;
            }
            if let Err(e) = self.set_slot(slot, value) {
                warn!("Ignoring saved {slot}: {e}");
                dropped.push(slot);
                broken = true;
            }
        }

        info!(
            "{:?} restored to depth {} ({} value(s) dropped)",
            self.variant,
            self.current_depth(),
            dropped.len()
        );
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser() -> Navigator {
        Navigator::new(
            Variant::Browser,
            Arc::new(Catalog::browser_default()),
            ResourceConfig {
                base_url: "https://host/pdf".to_string(),
                ..Default::default()
            },
        )
    }

    fn quiz() -> Navigator {
        Navigator::new(
            Variant::Quiz,
            Arc::new(Catalog::quiz_default()),
            ResourceConfig::default(),
        )
    }

    fn open_first_resource(nav: &mut Navigator) {
        let url = nav.resources().unwrap()[0].url.clone();
        nav.set_slot(Slot::Resource, &url).unwrap();
    }

    #[test]
    fn test_subject_accepted_iff_in_level_domain() {
        let catalog = Catalog::browser_default();
        let all_subjects: Vec<String> = catalog
            .subjects
            .values()
            .flatten()
            .cloned()
            .collect();
        for level in &catalog.levels {
            for subject in &all_subjects {
                let mut nav = browser();
                nav.set_slot(Slot::Level, level).unwrap();
                let expected = catalog.has_subject(level, subject);
                assert_eq!(
                    nav.set_slot(Slot::Subject, subject).is_ok(),
                    expected,
                    "{level}/{subject}"
                );
            }
        }
    }

    #[test]
    fn test_subject_rejected_without_level() {
        let mut nav = browser();
        let err = nav.set_slot(Slot::Subject, "Math").unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvalidValue {
                slot: Slot::Subject,
                value: "Math".to_string()
            }
        );
        assert_eq!(nav.selection(), &Selection::default());
    }

    #[test]
    fn test_rejected_value_leaves_state_unchanged() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "2bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        let before = nav.selection().clone();
        assert!(nav.set_slot(Slot::Subject, "HistoryAndGeography").is_err());
        assert!(nav.set_slot(Slot::Level, "3bac").is_err());
        assert!(nav.set_slot(Slot::Mode, "homework").is_err());
        assert_eq!(nav.selection(), &before);
    }

    #[test]
    fn test_level_change_clears_subject_and_resource() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        open_first_resource(&mut nav);
        assert_eq!(nav.current_depth(), 3);

        nav.set_slot(Slot::Level, "2bac").unwrap();
        assert_eq!(nav.selection().level(), Some("2bac"));
        assert_eq!(nav.selection().subject(), None);
        assert!(nav.selection().resource().is_none());
        assert_eq!(nav.current_depth(), 1);
    }

    #[test]
    fn test_same_value_keeps_downstream() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "SVT").unwrap();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        assert_eq!(nav.selection().subject(), Some("SVT"));
    }

    #[test]
    fn test_mode_change_clears_resource_only() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        open_first_resource(&mut nav);

        nav.set_slot(Slot::Mode, "exams").unwrap();
        assert_eq!(nav.selection().mode(), Mode::Exams);
        assert_eq!(nav.selection().subject(), Some("Math"));
        assert!(nav.selection().resource().is_none());
        assert!(
            nav.resources().unwrap()[0]
                .url
                .ends_with("/1bac/Math/exams/pdf1.pdf")
        );
    }

    #[test]
    fn test_resource_must_come_from_derived_list() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        assert!(
            nav.set_slot(Slot::Resource, "https://host/pdf/1bac/Math/lessons/pdf1.pdf")
                .is_err()
        );
        nav.set_slot(Slot::Subject, "Math").unwrap();
        assert!(
            nav.set_slot(Slot::Resource, "https://host/pdf/1bac/Math/lessons/pdf6.pdf")
                .is_err()
        );
        let sel = nav
            .set_slot(Slot::Resource, "https://host/pdf/1bac/Math/lessons/pdf2.pdf")
            .unwrap();
        assert_eq!(sel.resource().map(|r| r.index), Some(2));
    }

    #[test]
    fn test_variant_rejects_foreign_slots() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        assert!(nav.set_slot(Slot::Lesson, "Lesson 1").is_err());

        let mut q = quiz();
        assert!(q.set_slot(Slot::Mode, "exams").is_err());
    }

    #[test]
    fn test_go_back_steps_match_set_slots() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        open_first_resource(&mut nav);
        assert!(nav.is_complete());

        let set = nav.current_depth();
        let mut steps = 0;
        while nav.go_back().is_some() {
            steps += 1;
        }
        assert_eq!(steps, set);
        assert_eq!(nav.current_depth(), 0);
        assert!(nav.go_back().is_none());
    }

    #[test]
    fn test_go_back_order_browser() {
        let mut nav = browser();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        open_first_resource(&mut nav);
        assert_eq!(nav.go_back(), Some(Slot::Resource));
        assert_eq!(nav.go_back(), Some(Slot::Subject));
        assert_eq!(nav.go_back(), Some(Slot::Level));
        assert_eq!(nav.go_back(), None);
    }

    #[test]
    fn test_quiz_go_back_example() {
        let mut nav = quiz();
        nav.set_slot(Slot::Level, "2BAC").unwrap();
        nav.set_slot(Slot::Subject, "History").unwrap();
        nav.set_slot(Slot::Lesson, "Lesson 2").unwrap();
        assert!(nav.is_complete());

        nav.go_back();
        assert_eq!(nav.selection().level(), Some("2BAC"));
        assert_eq!(nav.selection().subject(), Some("History"));
        assert_eq!(nav.selection().lesson(), None);

        nav.go_back();
        assert_eq!(nav.selection().level(), Some("2BAC"));
        assert_eq!(nav.selection().subject(), None);
        assert_eq!(nav.selection().lesson(), None);
    }

    #[test]
    fn test_quiz_lesson_requires_subject() {
        let mut nav = quiz();
        nav.set_slot(Slot::Level, "1BAC").unwrap();
        assert!(nav.set_slot(Slot::Lesson, "Lesson 1").is_err());
        assert!(!nav.is_complete());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut nav = browser();
        nav.set_slot(Slot::Mode, "exams").unwrap();
        nav.set_slot(Slot::Level, "1bac").unwrap();
        nav.set_slot(Slot::Subject, "Math").unwrap();
        nav.reset();
        assert_eq!(nav.selection(), &Selection::default());
        assert_eq!(nav.selection().mode(), Mode::Lessons);
    }

    #[test]
    fn test_is_complete_browser_needs_level_and_subject() {
        let mut nav = browser();
        assert!(!nav.is_complete());
        nav.set_slot(Slot::Level, "1bac").unwrap();
        assert!(!nav.is_complete());
        nav.set_slot(Slot::Subject, "Math").unwrap();
        assert!(nav.is_complete());
    }

    #[test]
    fn test_restore_valid_values() {
        let mut nav = quiz();
        let dropped = nav.restore(&SavedSelection {
            level: Some("1BAC".to_string()),
            subject: Some("Physics".to_string()),
            mode: None,
            lesson: Some("Lesson 3".to_string()),
        });
        assert!(dropped.is_empty());
        assert_eq!(nav.current_depth(), 3);
    }

    #[test]
    fn test_restore_drops_subject_invalid_for_level() {
        let mut nav = browser();
        let dropped = nav.restore(&SavedSelection {
            level: Some("2bac".to_string()),
            subject: Some("HistoryAndGeography".to_string()),
            mode: Some("exams".to_string()),
            lesson: None,
        });
        assert_eq!(dropped, vec![Slot::Subject]);
        assert_eq!(nav.selection().level(), Some("2bac"));
        assert_eq!(nav.selection().subject(), None);
        assert_eq!(nav.selection().mode(), Mode::Exams);
    }

    #[test]
    fn test_restore_drops_orphans_below_missing_level() {
        let mut nav = quiz();
        let dropped = nav.restore(&SavedSelection {
            level: None,
            subject: Some("Math".to_string()),
            mode: None,
            lesson: Some("Lesson 1".to_string()),
        });
        assert_eq!(dropped, vec![Slot::Subject, Slot::Lesson]);
        assert_eq!(nav.current_depth(), 0);
    }

    #[test]
    fn test_restore_bad_mode_falls_back() {
        let mut nav = browser();
        let dropped = nav.restore(&SavedSelection {
            level: Some("1bac".to_string()),
            subject: None,
            mode: Some("revision".to_string()),
            lesson: None,
        });
        assert_eq!(dropped, vec![Slot::Mode]);
        assert_eq!(nav.selection().mode(), Mode::Lessons);
        assert_eq!(nav.selection().level(), Some("1bac"));
    }
}
