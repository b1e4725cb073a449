//! # Application State
//!
//! Core business state for Zico. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tab: Tab                   // active screen
//! ├── browser: Navigator         // level → subject → document
//! ├── quiz: Navigator            // level → subject → lesson
//! ├── quiz_summary: bool         // "Your Selections" view shown
//! ├── settings: Settings         // dark mode, notifications, language
//! ├── about_visible: bool        // about overlay shown
//! ├── status_message: String     // status bar text
//! └── updates_url: String        // "Check for Updates" target
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::Tab;
use crate::core::config::ResolvedConfig;
use crate::core::persist::{SlotKeys, load_saved_selection};
use crate::core::selection::{Navigator, Variant};
use crate::core::settings::Settings;
use crate::core::store::KeyValueStore;

pub struct App {
    pub tab: Tab,
    pub browser: Navigator,
    pub quiz: Navigator,
    pub quiz_summary: bool,
    pub settings: Settings,
    pub about_visible: bool,
    pub status_message: String,
    pub updates_url: String,
}

impl App {
    /// Fresh state with empty selections and default settings.
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            tab: config.start_tab,
            browser: Navigator::new(
                Variant::Browser,
                Arc::new(config.browser_catalog.clone()),
                config.resources.clone(),
            ),
            quiz: Navigator::new(
                Variant::Quiz,
                Arc::new(config.quiz_catalog.clone()),
                config.resources.clone(),
            ),
            quiz_summary: false,
            settings: Settings::default(),
            about_visible: false,
            status_message: String::from("Welcome to Zico!"),
            updates_url: config.updates_url.clone(),
        }
    }

    /// Build the startup state, restoring settings and both selections
    /// from the store. Storage failures degrade to defaults.
    pub async fn load(config: &ResolvedConfig, store: &dyn KeyValueStore) -> Self {
        let mut app = Self::new(config);
        app.settings = Settings::load(store).await;
        for variant in [Variant::Browser, Variant::Quiz] {
            let saved = load_saved_selection(store, SlotKeys::for_variant(variant)).await;
            app.navigator_mut(variant).restore(&saved);
        }
        app
    }

    pub fn navigator_mut(&mut self, variant: Variant) -> &mut Navigator {
        match variant {
            Variant::Browser => &mut self.browser,
            Variant::Quiz => &mut self.quiz,
        }
    }
}
