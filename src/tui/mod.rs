//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` returns an `Effect`; this module runs it:
//!
//! - `Persist` is queued on the `PersistQueue` and never waited on.
//! - `OpenDocument` / `OpenLink` hand the URL to the system browser.
//! - `ClearStore` queues a clear; its result comes back through a channel
//!   as `Action::CacheCleared` on a later loop iteration.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event or a background result.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::Tab;
use crate::core::action::{Action, Effect, update};
use crate::core::persist::PersistQueue;
use crate::core::state::App;
use crate::tui::components::{BrowserState, QuizState, SettingsState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub browser: BrowserState,
    pub quiz: QuizState,
    pub settings: SettingsState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one event to the active screen and return the resulting action.
    pub fn handle_event(&mut self, app: &App, event: TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Quit => return Some(Action::Quit),
            TuiEvent::Resize => return None,
            TuiEvent::NextTab => return Some(Action::SwitchTab(app.tab.next())),
            TuiEvent::PrevTab => return Some(Action::SwitchTab(app.tab.prev())),
            TuiEvent::JumpTab(index) => {
                return Tab::ALL.get(index).copied().map(Action::SwitchTab);
            }
            _ => {}
        }

        // The about overlay swallows everything but closing it
        if app.about_visible {
            return match event {
                TuiEvent::Back | TuiEvent::Submit => Some(Action::HideAbout),
                _ => None,
            };
        }

        match app.tab {
            Tab::Home => match event {
                TuiEvent::Submit => Some(Action::SwitchTab(Tab::Subjects)),
                _ => None,
            },
            Tab::Subjects => self.browser.handle_event(&app.browser, &event),
            Tab::Quiz => self
                .quiz
                .handle_event(&app.quiz, app.quiz_summary, &event),
            Tab::Settings => self.settings.handle_event(&app.settings, &event),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events let `translate` drop key-ups on terminals that report them
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal keyboard enhancement enabled");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

/// Run an effect. Returns true when the loop should stop.
fn run_effect(
    effect: Effect,
    app: &mut App,
    queue: &PersistQueue,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Persist { key, value } => queue.save(key, value),
        Effect::OpenDocument(link) | Effect::OpenLink(link) => {
            info!("Opening {}", link);
            if let Err(e) = open::that(&link) {
                warn!("Failed to open {}: {}", link, e);
                app.status_message = format!("Could not open browser: {e}");
            }
        }
        Effect::ClearStore => {
            let done = queue.clear();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = match done.await {
                    Ok(result) => result.map_err(|e| e.to_string()),
                    Err(_) => Err(String::from("persistence worker stopped")),
                };
                let _ = tx.send(Action::CacheCleared(result));
            });
        }
        Effect::Quit => return true,
    }
    false
}

pub fn run(mut app: App, queue: &PersistQueue) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = tui.handle_event(&app, event) else {
                continue;
            };
            let effect = update(&mut app, action);
            if run_effect(effect, &mut app, queue, &tx) {
                break 'main;
            }
        }

        while let Ok(action) = rx.try_recv() {
            debug!("Background action: {:?}", action);
            needs_redraw = true;
            let effect = update(&mut app, action);
            if run_effect(effect, &mut app, queue, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    info!("TUI closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::Variant;
    use crate::test_support::test_app;

    fn press(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
        match tui.handle_event(app, event) {
            Some(action) => update(app, action),
            None => Effect::None,
        }
    }

    #[test]
    fn test_global_keys() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(tui.handle_event(&app, TuiEvent::Quit), Some(Action::Quit));
        assert_eq!(
            tui.handle_event(&app, TuiEvent::NextTab),
            Some(Action::SwitchTab(Tab::Subjects))
        );
        assert_eq!(
            tui.handle_event(&app, TuiEvent::JumpTab(3)),
            Some(Action::SwitchTab(Tab::Settings))
        );
        assert_eq!(tui.handle_event(&app, TuiEvent::JumpTab(7)), None);
        assert_eq!(tui.handle_event(&app, TuiEvent::Resize), None);
    }

    #[test]
    fn test_browse_to_document_by_keyboard() {
        let mut app = test_app();
        app.tab = Tab::Subjects;
        let mut tui = TuiState::new();

        // 1bac
        let effect = press(&mut app, &mut tui, TuiEvent::Submit);
        assert!(matches!(effect, Effect::Persist { .. }));
        assert_eq!(app.browser.selection().level(), Some("1bac"));

        // English → Math (fourth entry)
        for _ in 0..3 {
            press(&mut app, &mut tui, TuiEvent::CursorDown);
        }
        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.browser.selection().subject(), Some("Math"));

        // Exams tab, then the second document
        press(&mut app, &mut tui, TuiEvent::InputChar('m'));
        assert_eq!(app.browser.selection().mode().as_str(), "exams");
        press(&mut app, &mut tui, TuiEvent::CursorDown);
        let effect = press(&mut app, &mut tui, TuiEvent::Submit);
        match effect {
            Effect::OpenDocument(link) => assert!(link.contains("exams%2Fpdf2.pdf")),
            other => panic!("expected OpenDocument, got {other:?}"),
        }

        // Back out to the subject list
        press(&mut app, &mut tui, TuiEvent::Back);
        press(&mut app, &mut tui, TuiEvent::Back);
        assert_eq!(app.browser.current_depth(), 1);
    }

    #[test]
    fn test_quiz_flow_by_keyboard() {
        let mut app = test_app();
        app.tab = Tab::Quiz;
        let mut tui = TuiState::new();

        press(&mut app, &mut tui, TuiEvent::Submit); // 1BAC
        press(&mut app, &mut tui, TuiEvent::CursorRight);
        press(&mut app, &mut tui, TuiEvent::Submit); // Math
        press(&mut app, &mut tui, TuiEvent::Submit); // Lesson 1
        assert!(app.quiz.is_complete());
        assert_eq!(app.quiz.selection().subject(), Some("Math"));

        press(&mut app, &mut tui, TuiEvent::Submit); // Go
        assert!(app.quiz_summary);
        press(&mut app, &mut tui, TuiEvent::Back);
        assert!(!app.quiz_summary);
        assert_eq!(app.quiz.selection().lesson(), Some("Lesson 1"));
    }

    #[test]
    fn test_about_overlay_captures_keys() {
        let mut app = test_app();
        app.tab = Tab::Settings;
        let mut tui = TuiState::new();
        tui.settings.selected = 4;
        press(&mut app, &mut tui, TuiEvent::Submit);
        assert!(app.about_visible);

        assert_eq!(tui.handle_event(&app, TuiEvent::CursorDown), None);
        press(&mut app, &mut tui, TuiEvent::Back);
        assert!(!app.about_visible);
    }

    #[test]
    fn test_home_enter_goes_to_subjects() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.tab, Tab::Subjects);
        assert_eq!(
            tui.handle_event(&app, TuiEvent::Back),
            Some(Action::Back(Variant::Browser))
        );
    }
}
