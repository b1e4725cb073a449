//! # Settings
//!
//! Process-wide user preferences. Loaded once at startup from the
//! key-value store and owned by `App`; toggles hand back the key/value pair
//! to persist instead of writing themselves.

use std::fmt;

use log::info;

use crate::core::store::{KeyValueStore, decode_bool, encode_bool, load_or_none};

pub const DARK_MODE_KEY: &str = "@dark_mode_enabled";
pub const NOTIFICATIONS_KEY: &str = "@notifications_enabled";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    French,
    Arabic,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::French,
        Language::Arabic,
        Language::Spanish,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Arabic => "Arabic",
            Language::Spanish => "Spanish",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }

    pub fn next(self) -> Language {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Language {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications: bool,
    /// Display preference only; not persisted.
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            language: Language::default(),
        }
    }
}

impl Settings {
    /// Load persisted flags. Missing or unreadable values keep their defaults.
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let dark_mode = load_or_none(store, DARK_MODE_KEY)
            .await
            .as_deref()
            .and_then(decode_bool)
            .unwrap_or(defaults.dark_mode);
        let notifications = load_or_none(store, NOTIFICATIONS_KEY)
            .await
            .as_deref()
            .and_then(decode_bool)
            .unwrap_or(defaults.notifications);
        info!("Settings loaded: dark_mode={dark_mode}, notifications={notifications}");
        Self {
            dark_mode,
            notifications,
            ..defaults
        }
    }

    /// Flip dark mode. Returns the key/value pair to persist.
    pub fn toggle_dark_mode(&mut self) -> (&'static str, &'static str) {
        self.dark_mode = !self.dark_mode;
        (DARK_MODE_KEY, encode_bool(self.dark_mode))
    }

    /// Flip notifications. Returns the key/value pair to persist.
    pub fn toggle_notifications(&mut self) -> (&'static str, &'static str) {
        self.notifications = !self.notifications;
        (NOTIFICATIONS_KEY, encode_bool(self.notifications))
    }
}
