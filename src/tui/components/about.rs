//! # About Overlay
//!
//! Centered modal drawn over the Settings tab. Any of Enter/Esc closes it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct AboutDialog {
    pub palette: Palette,
}

impl AboutDialog {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Component for AboutDialog {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let popup = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(Span::styled("Zico", palette.heading())),
            Line::from(Span::styled(
                format!("Version {}", env!("CARGO_PKG_VERSION")),
                palette.muted(),
            )),
            Line::from(""),
            Line::from("Lessons and past exams for every Bac level and subject."),
            Line::from(""),
            Line::from(Span::styled("© 2025 Zico", palette.muted())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.muted())
            .title(Line::from(" About ").style(palette.heading()))
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::uniform(1))
            .style(palette.base().bg(palette.card));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }
}

/// Center a rect of the given percentage size within `outer`.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
