//! # Browser Component
//!
//! The Subjects tab. One screen per navigator depth:
//!
//! ```text
//! depth 0  Choose Level      → picks Slot::Level
//! depth 1  Select Subject    → picks Slot::Subject
//! depth 2  Documents         → LESSONS / EXAMS switch + picks Slot::Resource
//! depth 3  Document pane     → open again in the viewer
//! ```
//!
//! `BrowserState` lives in `TuiState` and keeps the picker cursor across
//! frames. The picker is rebuilt whenever the navigator's selection moves.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::selection::{Mode, Navigator, Slot, Variant};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::picker::{Picker, PickerEvent, PickerItem, PickerState};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// What the picker was last built from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyncKey {
    depth: usize,
    level: Option<String>,
    subject: Option<String>,
    mode: Mode,
    resource: Option<String>,
}

impl SyncKey {
    fn of(nav: &Navigator) -> Self {
        let sel = nav.selection();
        Self {
            depth: nav.current_depth(),
            level: sel.level().map(str::to_string),
            subject: sel.subject().map(str::to_string),
            mode: sel.mode(),
            resource: sel.resource().map(|r| r.url.clone()),
        }
    }

    /// The value picked at `depth`, if this key is deeper than that.
    fn picked_at(&self, depth: usize) -> Option<&str> {
        if self.depth <= depth {
            return None;
        }
        match depth {
            0 => self.level.as_deref(),
            1 => self.subject.as_deref(),
            _ => self.resource.as_deref(),
        }
    }
}

pub struct BrowserState {
    pub picker: PickerState,
    synced: Option<SyncKey>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            picker: PickerState::new(Vec::new()),
            synced: None,
        }
    }

    /// Rebuild the picker items if the navigator moved since the last sync.
    /// After going back, the cursor lands on the entry the user came from.
    pub fn sync(&mut self, nav: &Navigator) {
        let key = SyncKey::of(nav);
        if self.synced.as_ref() == Some(&key) {
            return;
        }
        self.picker = PickerState::new(items_for_depth(nav, key.depth));
        if let Some(value) = self.synced.as_ref().and_then(|prev| prev.picked_at(key.depth)) {
            self.picker.focus_value(value);
        }
        self.synced = Some(key);
    }

    pub fn handle_event(&mut self, nav: &Navigator, event: &TuiEvent) -> Option<Action> {
        self.sync(nav);
        let depth = nav.current_depth();

        if depth >= 3 {
            return match event {
                TuiEvent::Back | TuiEvent::CursorLeft => Some(Action::Back(Variant::Browser)),
                TuiEvent::Submit | TuiEvent::InputChar('o') => Some(Action::OpenDocument),
                _ => None,
            };
        }

        if depth == 2
            && matches!(
                event,
                TuiEvent::InputChar('m') | TuiEvent::CursorLeft | TuiEvent::CursorRight
            )
        {
            // Left/Right switch tabs here instead of walking the chain
            return Some(Action::Select {
                variant: Variant::Browser,
                slot: Slot::Mode,
                value: nav.selection().mode().toggled().as_str().to_string(),
            });
        }

        match self.picker.handle_event(event)? {
            PickerEvent::Select(value) => Some(Action::Select {
                variant: Variant::Browser,
                slot: slot_for_depth(depth),
                value,
            }),
            PickerEvent::Back => Some(Action::Back(Variant::Browser)),
        }
    }
}

fn slot_for_depth(depth: usize) -> Slot {
    match depth {
        0 => Slot::Level,
        1 => Slot::Subject,
        _ => Slot::Resource,
    }
}

fn items_for_depth(nav: &Navigator, depth: usize) -> Vec<PickerItem> {
    match depth {
        0 => nav
            .domain(Slot::Level)
            .into_iter()
            .map(|level| PickerItem::new(level.to_uppercase(), level))
            .collect(),
        1 => nav
            .domain(Slot::Subject)
            .into_iter()
            .map(|subject| PickerItem::new(subject.clone(), subject))
            .collect(),
        2 => nav
            .resources()
            .map(|refs| {
                refs.into_iter()
                    .map(|r| PickerItem::new(r.file_name(), r.url))
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Transient render wrapper for the Subjects tab.
pub struct BrowserView<'a> {
    state: &'a mut BrowserState,
    nav: &'a Navigator,
    palette: Palette,
}

impl<'a> BrowserView<'a> {
    pub fn new(state: &'a mut BrowserState, nav: &'a Navigator, palette: Palette) -> Self {
        Self {
            state,
            nav,
            palette,
        }
    }

    fn render_mode_tabs(&self, frame: &mut Frame, area: Rect) {
        let current = self.nav.selection().mode();
        let mut spans = Vec::new();
        for mode in Mode::ALL {
            let style = if mode == current {
                self.palette.active()
            } else {
                self.palette.muted()
            };
            spans.push(Span::styled(
                format!(" {} ", mode.as_str().to_uppercase()),
                style,
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("(m / ←→ to switch)", self.palette.muted()));
        frame.render_widget(Line::from(spans), area);
    }

    fn render_document(&self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let sel = self.nav.selection();
        let Some(resource) = sel.resource() else {
            return;
        };
        let viewer = self
            .nav
            .resource_config()
            .viewer_link(resource)
            .unwrap_or_else(|e| format!("unavailable ({e})"));

        let lines = vec![
            Line::from(Span::styled(resource.file_name(), palette.heading())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Level:   ", palette.muted()),
                Span::raw(sel.level().unwrap_or_default().to_uppercase()),
            ]),
            Line::from(vec![
                Span::styled("Subject: ", palette.muted()),
                Span::raw(sel.subject().unwrap_or_default().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Mode:    ", palette.muted()),
                Span::raw(sel.mode().to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Source:  ", palette.muted()),
                Span::raw(resource.url.clone()),
            ]),
            Line::from(vec![
                Span::styled("Viewer:  ", palette.muted()),
                Span::raw(viewer),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.muted())
            .title(Line::from(" Document ").style(palette.heading()))
            .title_bottom(Line::from("Enter/o Open in viewer  Esc Back").centered())
            .padding(Padding::horizontal(1))
            .style(palette.base());
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

impl Component for BrowserView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.nav);
        let sel = self.nav.selection();
        match self.nav.current_depth() {
            0 => Picker::new(
                &mut self.state.picker,
                "Choose Level",
                "▸",
                "Enter Select  q Quit",
                self.palette,
            )
            .render(frame, area),
            1 => {
                let title = format!(
                    "{} · Select Subject",
                    sel.level().unwrap_or_default().to_uppercase()
                );
                Picker::new(
                    &mut self.state.picker,
                    &title,
                    "▸",
                    "Enter Select  Esc Back",
                    self.palette,
                )
                .render(frame, area)
            }
            2 => {
                let [tabs_area, list_area] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
                self.render_mode_tabs(frame, tabs_area);
                let title = format!(
                    "{} · {}",
                    sel.level().unwrap_or_default().to_uppercase(),
                    sel.subject().unwrap_or_default()
                );
                Picker::new(
                    &mut self.state.picker,
                    &title,
                    "▤",
                    "Enter Open  Esc Back",
                    self.palette,
                )
                .render(frame, list_area)
            }
            _ => self.render_document(frame, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use crate::tui::theme::LIGHT;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(state: &mut BrowserState, nav: &Navigator) -> String {
        let backend = TestBackend::new(90, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| BrowserView::new(state, nav, LIGHT).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_enter_on_level_selects_it() {
        let app = test_app();
        let mut state = BrowserState::new();
        state.handle_event(&app.browser, &TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&app.browser, &TuiEvent::Submit),
            Some(Action::Select {
                variant: Variant::Browser,
                slot: Slot::Level,
                value: "2bac".to_string(),
            })
        );
    }

    #[test]
    fn test_picker_rebuilds_after_selection() {
        let mut app = test_app();
        let mut state = BrowserState::new();
        state.sync(&app.browser);
        assert_eq!(state.picker.items.len(), 2);

        app.browser.set_slot(Slot::Level, "2bac").unwrap();
        state.sync(&app.browser);
        assert_eq!(state.picker.items.len(), 8);
        assert_eq!(state.picker.selected, 0);
    }

    #[test]
    fn test_back_focuses_previous_choice() {
        let mut app = test_app();
        let mut state = BrowserState::new();
        app.browser.set_slot(Slot::Level, "2bac").unwrap();
        app.browser.set_slot(Slot::Subject, "Math").unwrap();
        state.sync(&app.browser);

        app.browser.go_back();
        state.sync(&app.browser);
        let focused = &state.picker.items[state.picker.selected];
        assert_eq!(focused.value, "Math");
        assert_eq!(state.picker.list_state.selected(), Some(state.picker.selected));

        app.browser.go_back();
        state.sync(&app.browser);
        assert_eq!(state.picker.items[state.picker.selected].value, "2bac");

        // Moving forward starts at the top
        app.browser.set_slot(Slot::Level, "1bac").unwrap();
        state.sync(&app.browser);
        assert_eq!(state.picker.selected, 0);
    }

    #[test]
    fn test_mode_switch_on_documents_screen() {
        let mut app = test_app();
        app.browser.set_slot(Slot::Level, "1bac").unwrap();
        app.browser.set_slot(Slot::Subject, "Math").unwrap();
        let mut state = BrowserState::new();
        assert_eq!(
            state.handle_event(&app.browser, &TuiEvent::InputChar('m')),
            Some(Action::Select {
                variant: Variant::Browser,
                slot: Slot::Mode,
                value: "exams".to_string(),
            })
        );
    }

    #[test]
    fn test_document_pane_keys() {
        let mut app = test_app();
        app.browser.set_slot(Slot::Level, "1bac").unwrap();
        app.browser.set_slot(Slot::Subject, "Math").unwrap();
        let url = app.browser.resources().unwrap()[0].url.clone();
        app.browser.set_slot(Slot::Resource, &url).unwrap();

        let mut state = BrowserState::new();
        assert_eq!(
            state.handle_event(&app.browser, &TuiEvent::InputChar('o')),
            Some(Action::OpenDocument)
        );
        assert_eq!(
            state.handle_event(&app.browser, &TuiEvent::Back),
            Some(Action::Back(Variant::Browser))
        );
    }

    #[test]
    fn test_render_documents_screen() {
        let mut app = test_app();
        app.browser.set_slot(Slot::Level, "1bac").unwrap();
        app.browser.set_slot(Slot::Subject, "Math").unwrap();
        let mut state = BrowserState::new();
        let text = render_text(&mut state, &app.browser);
        assert!(text.contains("LESSONS"));
        assert!(text.contains("EXAMS"));
        assert!(text.contains("pdf1.pdf"));
        assert!(text.contains("pdf5.pdf"));
    }

    #[test]
    fn test_render_level_screen() {
        let app = test_app();
        let mut state = BrowserState::new();
        let text = render_text(&mut state, &app.browser);
        assert!(text.contains("Choose Level"));
        assert!(text.contains("1BAC"));
    }
}
