//! # Picker Component
//!
//! Vertical list of choices used by each browser screen (levels, subjects,
//! documents).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState` lives in `TuiState`
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// One row: what is shown, and what is sent to the core when picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub label: String,
    pub value: String,
}

impl PickerItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Persistent state for a picker list.
pub struct PickerState {
    pub items: Vec<PickerItem>,
    pub selected: usize,
    pub list_state: ListState,
}

impl PickerState {
    pub fn new(items: Vec<PickerItem>) -> Self {
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            items,
            selected: 0,
            list_state,
        }
    }

    /// Move the cursor onto the item with `value`, if present.
    pub fn focus_value(&mut self, value: &str) {
        if let Some(idx) = self.items.iter().position(|item| item.value == value) {
            self.selected = idx;
            self.list_state.select(Some(idx));
        }
    }
}

impl EventHandler for PickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Back | TuiEvent::CursorLeft => Some(PickerEvent::Back),
            TuiEvent::CursorUp => {
                if !self.items.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.items.is_empty() {
                    self.selected = (self.selected + 1).min(self.items.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit | TuiEvent::CursorRight => self
                .items
                .get(self.selected)
                .map(|item| PickerEvent::Select(item.value.clone())),
            _ => None,
        }
    }
}

/// Events emitted by a picker.
#[derive(Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Select(String),
    Back,
}

/// Transient render wrapper for a picker list.
pub struct Picker<'a> {
    state: &'a mut PickerState,
    title: &'a str,
    icon: &'a str,
    help: &'a str,
    palette: Palette,
}

impl<'a> Picker<'a> {
    pub fn new(
        state: &'a mut PickerState,
        title: &'a str,
        icon: &'a str,
        help: &'a str,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            title,
            icon,
            help,
            palette,
        }
    }
}

impl Component for Picker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.muted())
            .title(Line::from(format!(" {} ", self.title)).style(palette.heading()))
            .title_bottom(Line::from(self.help).centered())
            .padding(Padding::horizontal(1))
            .style(palette.base());

        if self.state.items.is_empty() {
            let empty = Paragraph::new("Nothing to show.")
                .style(palette.muted())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let label_width = inner_width.saturating_sub(self.icon.width() + 1);
        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.state.selected {
                    palette.active()
                } else {
                    Style::default().fg(palette.text).bg(palette.card)
                };
                let label = truncate_str(&item.label, label_width);
                let padded = format!("{:<width$}", label, width = label_width);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", self.icon), style),
                    Span::styled(padded, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
