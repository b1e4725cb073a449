//! # Settings Component
//!
//! Preferences, data and about rows. Enter activates the focused row;
//! ←/→ cycle the language.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::action::Action;
use crate::core::settings::Settings;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    DarkMode,
    Notifications,
    Language,
    ClearCache,
    About,
    CheckForUpdates,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 6] = [
        SettingsRow::DarkMode,
        SettingsRow::Notifications,
        SettingsRow::Language,
        SettingsRow::ClearCache,
        SettingsRow::About,
        SettingsRow::CheckForUpdates,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsRow::DarkMode => "Dark Mode",
            SettingsRow::Notifications => "Enable Notifications",
            SettingsRow::Language => "Language",
            SettingsRow::ClearCache => "Clear Cache",
            SettingsRow::About => "About",
            SettingsRow::CheckForUpdates => "Check for Updates",
        }
    }

    fn value(self, settings: &Settings) -> String {
        let on_off = |flag: bool| String::from(if flag { "[on]" } else { "[off]" });
        match self {
            SettingsRow::DarkMode => on_off(settings.dark_mode),
            SettingsRow::Notifications => on_off(settings.notifications),
            SettingsRow::Language => format!("‹ {} ›", settings.language),
            _ => String::from("›"),
        }
    }
}

#[derive(Debug, Default)]
pub struct SettingsState {
    pub selected: usize,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected.min(SettingsRow::ALL.len() - 1)]
    }

    pub fn handle_event(&mut self, settings: &Settings, event: &TuiEvent) -> Option<Action> {
        let row = self.focused();
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(SettingsRow::ALL.len() - 1);
                None
            }
            TuiEvent::CursorLeft if row == SettingsRow::Language => {
                Some(Action::SetLanguage(settings.language.prev()))
            }
            TuiEvent::CursorRight if row == SettingsRow::Language => {
                Some(Action::SetLanguage(settings.language.next()))
            }
            TuiEvent::Submit => Some(match row {
                SettingsRow::DarkMode => Action::ToggleDarkMode,
                SettingsRow::Notifications => Action::ToggleNotifications,
                SettingsRow::Language => Action::SetLanguage(settings.language.next()),
                SettingsRow::ClearCache => Action::ClearCache,
                SettingsRow::About => Action::ShowAbout,
                SettingsRow::CheckForUpdates => Action::CheckForUpdates,
            }),
            _ => None,
        }
    }
}

/// Transient render wrapper for the Settings tab.
pub struct SettingsView<'a> {
    state: &'a SettingsState,
    settings: &'a Settings,
    palette: Palette,
}

impl<'a> SettingsView<'a> {
    pub fn new(state: &'a SettingsState, settings: &'a Settings, palette: Palette) -> Self {
        Self {
            state,
            settings,
            palette,
        }
    }
}

impl Component for SettingsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let inner_width = area.width.saturating_sub(6) as usize;
        let focused = self.state.focused();

        let items: Vec<ListItem> = SettingsRow::ALL
            .iter()
            .map(|row| {
                let style = if *row == focused {
                    palette.active()
                } else {
                    Style::default().fg(palette.text).bg(palette.card)
                };
                let value = row.value(self.settings);
                let gap = inner_width
                    .saturating_sub(row.label().chars().count() + value.chars().count());
                ListItem::new(Line::from(vec![
                    Span::styled(row.label(), style),
                    Span::styled(" ".repeat(gap), style),
                    Span::styled(value, style),
                ]))
            })
            .collect();

        let version = format!(" Version {} ", env!("CARGO_PKG_VERSION"));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.muted())
            .title(Line::from(" Settings ").style(palette.heading()))
            .title_bottom(Line::from(version).right_aligned())
            .title_bottom(Line::from(" ↑↓ Move  Enter Select  ←→ Language ").centered())
            .padding(Padding::new(2, 2, 1, 0))
            .style(palette.base());

        let mut list_state = ListState::default().with_selected(Some(self.state.selected));
        frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Language;
    use crate::tui::theme::DARK;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_enter_triggers_row_action() {
        let settings = Settings::default();
        let mut state = SettingsState::new();
        assert_eq!(
            state.handle_event(&settings, &TuiEvent::Submit),
            Some(Action::ToggleDarkMode)
        );
        state.selected = 3;
        assert_eq!(
            state.handle_event(&settings, &TuiEvent::Submit),
            Some(Action::ClearCache)
        );
        for _ in 0..10 {
            state.handle_event(&settings, &TuiEvent::CursorDown);
        }
        assert_eq!(state.focused(), SettingsRow::CheckForUpdates);
    }

    #[test]
    fn test_language_cycles_with_arrows() {
        let settings = Settings::default();
        let mut state = SettingsState { selected: 2 };
        assert_eq!(
            state.handle_event(&settings, &TuiEvent::CursorRight),
            Some(Action::SetLanguage(Language::French))
        );
        assert_eq!(
            state.handle_event(&settings, &TuiEvent::CursorLeft),
            Some(Action::SetLanguage(Language::Spanish))
        );
        // Arrows do nothing on other rows
        state.selected = 0;
        assert_eq!(state.handle_event(&settings, &TuiEvent::CursorRight), None);
    }

    #[test]
    fn test_render_shows_values() {
        let settings = Settings {
            dark_mode: true,
            ..Settings::default()
        };
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                SettingsView::new(&SettingsState::new(), &settings, DARK).render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Dark Mode"));
        assert!(text.contains("[on]"));
        assert!(text.contains("English"));
        assert!(text.contains("Check for Updates"));
    }
}
