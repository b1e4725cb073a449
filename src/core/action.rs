//! # Actions
//!
//! Everything that can happen in Zico becomes an `Action`.
//! User picks a subject? That's `Action::Select { slot: Subject, .. }`.
//! Cache finished clearing? That's `Action::CacheCleared(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the caller should run. No I/O here:
//! persistence writes and opening documents happen in the TUI loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::Tab;
use crate::core::persist::SlotKeys;
use crate::core::selection::{Slot, Variant};
use crate::core::settings::Language;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SwitchTab(Tab),
    Select {
        variant: Variant,
        slot: Slot,
        value: String,
    },
    Back(Variant),
    Reset(Variant),
    /// Hand the currently open document to the viewer again.
    OpenDocument,
    ShowQuizSummary,
    HideQuizSummary,
    ToggleDarkMode,
    ToggleNotifications,
    SetLanguage(Language),
    ClearCache,
    /// Result of a cache clear, sent back from the persistence worker.
    CacheCleared(Result<(), String>),
    ShowAbout,
    HideAbout,
    CheckForUpdates,
    Quit,
}

/// Side effect requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fire-and-forget write of one key.
    Persist { key: &'static str, value: String },
    /// Embedded-viewer link for a document.
    OpenDocument(String),
    OpenLink(String),
    ClearStore,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::SwitchTab(tab) => {
            app.tab = tab;
            app.about_visible = false;
            Effect::None
        }
        Action::Select {
            variant,
            slot,
            value,
        } => select(app, variant, slot, &value),
        Action::Back(variant) => {
            if variant == Variant::Quiz && app.quiz_summary {
                app.quiz_summary = false;
                return Effect::None;
            }
            if app.navigator_mut(variant).go_back().is_none() {
                debug!("{:?} back: nothing selected", variant);
            }
            Effect::None
        }
        Action::Reset(variant) => {
            app.navigator_mut(variant).reset();
            if variant == Variant::Quiz {
                app.quiz_summary = false;
            }
            Effect::None
        }
        Action::OpenDocument => open_current_document(app),
        Action::ShowQuizSummary => {
            if app.quiz.is_complete() {
                app.quiz_summary = true;
            } else {
                app.status_message = String::from("Select a level, subject and lesson first");
            }
            Effect::None
        }
        Action::HideQuizSummary => {
            app.quiz_summary = false;
            Effect::None
        }
        Action::ToggleDarkMode => {
            let (key, value) = app.settings.toggle_dark_mode();
            app.status_message = format!("Dark mode {}", on_off(app.settings.dark_mode));
            Effect::Persist {
                key,
                value: value.to_string(),
            }
        }
        Action::ToggleNotifications => {
            let (key, value) = app.settings.toggle_notifications();
            app.status_message = format!("Notifications {}", on_off(app.settings.notifications));
            Effect::Persist {
                key,
                value: value.to_string(),
            }
        }
        Action::SetLanguage(language) => {
            app.settings.language = language;
            app.status_message = format!("Language: {}", language);
            Effect::None
        }
        Action::ClearCache => {
            app.status_message = String::from("Clearing cache...");
            Effect::ClearStore
        }
        Action::CacheCleared(result) => {
            app.status_message = match result {
                Ok(()) => {
                    info!("Cache cleared");
                    String::from("Cache cleared successfully!")
                }
                Err(e) => {
                    warn!("Cache clear failed: {}", e);
                    String::from("Failed to clear cache.")
                }
            };
            Effect::None
        }
        Action::ShowAbout => {
            app.about_visible = true;
            Effect::None
        }
        Action::HideAbout => {
            app.about_visible = false;
            Effect::None
        }
        Action::CheckForUpdates => Effect::OpenLink(app.updates_url.clone()),
        Action::Quit => Effect::Quit,
    }
}

fn select(app: &mut App, variant: Variant, slot: Slot, value: &str) -> Effect {
    let result = app
        .navigator_mut(variant)
        .set_slot(slot, value)
        .map(|_| ());
    if let Err(e) = result {
        warn!("Selection rejected: {}", e);
        app.status_message = e.to_string();
        return Effect::None;
    }

    if slot == Slot::Resource {
        return open_current_document(app);
    }

    match SlotKeys::for_variant(variant).key(slot) {
        Some(key) => Effect::Persist {
            key,
            value: value.to_string(),
        },
        None => Effect::None,
    }
}

fn open_current_document(app: &mut App) -> Effect {
    let Some(resource) = app.browser.selection().resource() else {
        app.status_message = String::from("No document open");
        return Effect::None;
    };
    match app.browser.resource_config().viewer_link(resource) {
        Ok(link) => {
            app.status_message = format!("Opening {}", resource.file_name());
            Effect::OpenDocument(link)
        }
        Err(e) => {
            warn!("Bad viewer URL: {}", e);
            app.status_message = format!("Cannot open document: {e}");
            Effect::None
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
