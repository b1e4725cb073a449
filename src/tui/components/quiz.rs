//! # Quiz Component
//!
//! Three selector rows (Level, Subject, Lesson) and a Go button. A row
//! only offers values once the row above it has a selection.
//!
//! ```text
//! Level    [1BAC] [2BAC]
//! Subject  [English] [Math] [History] [Physics]
//! Lesson   [Lesson 1] [Lesson 2] ...
//!          [ Go ]
//! ```
//!
//! ←/→ move the cursor within a row, Enter selects. Once all three are set,
//! Go shows the summary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::selection::{Navigator, Slot, Variant};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const ROWS: [Slot; 3] = [Slot::Level, Slot::Subject, Slot::Lesson];
const GO_ROW: usize = ROWS.len();

#[derive(Debug, Default)]
pub struct QuizState {
    /// Focused row; `GO_ROW` is the Go button.
    pub row: usize,
    /// Cursor column per selector row.
    pub cols: [usize; 3],
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(
        &mut self,
        nav: &Navigator,
        summary_visible: bool,
        event: &TuiEvent,
    ) -> Option<Action> {
        if summary_visible {
            return match event {
                TuiEvent::Back | TuiEvent::Submit => Some(Action::HideQuizSummary),
                TuiEvent::InputChar('r') => Some(self.reset()),
                _ => None,
            };
        }

        match event {
            TuiEvent::CursorUp => {
                self.row = self.row.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.row = (self.row + 1).min(GO_ROW);
                None
            }
            TuiEvent::CursorLeft | TuiEvent::CursorRight if self.row < GO_ROW => {
                let len = nav.domain(ROWS[self.row]).len();
                let col = &mut self.cols[self.row];
                if len == 0 {
                    *col = 0;
                } else if matches!(event, TuiEvent::CursorLeft) {
                    *col = col.saturating_sub(1).min(len - 1);
                } else {
                    *col = (*col + 1).min(len - 1);
                }
                None
            }
            TuiEvent::Submit if self.row == GO_ROW => Some(Action::ShowQuizSummary),
            TuiEvent::Submit => {
                let slot = ROWS[self.row];
                let value = nav.domain(slot).get(self.cols[self.row])?.clone();
                // Next row is where the user goes after picking
                self.row += 1;
                Some(Action::Select {
                    variant: Variant::Quiz,
                    slot,
                    value,
                })
            }
            TuiEvent::Back => Some(Action::Back(Variant::Quiz)),
            TuiEvent::InputChar('r') => Some(self.reset()),
            _ => None,
        }
    }

    /// Return the cursor to the first row and ask the core to clear the quiz.
    fn reset(&mut self) -> Action {
        self.row = 0;
        self.cols = [0; 3];
        Action::Reset(Variant::Quiz)
    }
}

/// Transient render wrapper for the Quiz tab.
pub struct QuizView<'a> {
    state: &'a QuizState,
    nav: &'a Navigator,
    summary_visible: bool,
    palette: Palette,
}

impl<'a> QuizView<'a> {
    pub fn new(
        state: &'a QuizState,
        nav: &'a Navigator,
        summary_visible: bool,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            nav,
            summary_visible,
            palette,
        }
    }

    fn selector_lines(&self) -> Vec<Line<'static>> {
        let palette = self.palette;
        let sel = self.nav.selection();
        let mut lines = vec![
            Line::from(Span::styled("Select Quiz Options", palette.heading())),
            Line::from(""),
        ];

        for (i, slot) in ROWS.iter().enumerate() {
            let focused = self.state.row == i;
            let label_style = if focused {
                palette.heading()
            } else {
                palette.muted()
            };
            let mut spans = vec![Span::styled(format!("{:<9}", slot_label(*slot)), label_style)];

            let domain = self.nav.domain(*slot);
            if domain.is_empty() {
                spans.push(Span::styled(empty_hint(*slot), palette.muted()));
            }
            let chosen = match slot {
                Slot::Level => sel.level(),
                Slot::Subject => sel.subject(),
                _ => sel.lesson(),
            };
            for (col, value) in domain.iter().enumerate() {
                let mut style = if chosen == Some(value.as_str()) {
                    palette.active()
                } else {
                    Style::default().fg(palette.text).bg(palette.card)
                };
                if focused && self.state.cols[i] == col {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(format!(" {} ", value), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        let mut button = if self.nav.is_complete() {
            palette.active()
        } else {
            palette.muted()
        };
        if self.state.row == GO_ROW {
            button = button.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(9)),
            Span::styled(" Go ", button),
        ]));
        lines
    }

    fn summary_lines(&self) -> Vec<Line<'static>> {
        let palette = self.palette;
        let sel = self.nav.selection();
        let row = |label: &str, value: Option<&str>| {
            Line::from(vec![
                Span::styled(format!("{:<9}", label), palette.muted()),
                Span::raw(value.unwrap_or("-").to_string()),
            ])
        };
        vec![
            Line::from(Span::styled("Your Selections", palette.heading())),
            Line::from(""),
            row("Level", sel.level()),
            row("Subject", sel.subject()),
            row("Lesson", sel.lesson()),
        ]
    }
}

fn slot_label(slot: Slot) -> &'static str {
    match slot {
        Slot::Level => "Level",
        Slot::Subject => "Subject",
        _ => "Lesson",
    }
}

fn empty_hint(slot: Slot) -> &'static str {
    match slot {
        Slot::Subject => "choose a level first",
        _ => "choose a subject first",
    }
}

impl Component for QuizView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (lines, help) = if self.summary_visible {
            (self.summary_lines(), "Esc Back  r Reset")
        } else {
            (
                self.selector_lines(),
                "↑↓ Row  ←→ Choose  Enter Select  r Reset  Esc Back",
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.muted())
            .title(Line::from(" Quiz ").style(self.palette.heading()))
            .title_bottom(Line::from(help).centered())
            .padding(Padding::new(2, 2, 1, 0))
            .style(self.palette.base());
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
