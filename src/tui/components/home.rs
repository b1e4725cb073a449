//! # HomePage Component
//!
//! Greeting for the local time of day and the news cards.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::home::{NEWS, greeting};
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct HomePage {
    /// Local hour (0-23)
    pub hour: u32,
    pub palette: Palette,
}

impl HomePage {
    pub fn new(hour: u32, palette: Palette) -> Self {
        Self { hour, palette }
    }
}

impl Component for HomePage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let mut constraints = vec![Constraint::Length(3), Constraint::Length(2)];
        constraints.extend(NEWS.iter().map(|_| Constraint::Length(4)));
        constraints.push(Constraint::Min(0));
        let areas = Layout::vertical(constraints).split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{}, Welcome!", greeting(self.hour)),
                palette.heading(),
            )),
            Line::from(Span::styled(
                "Press 2 to browse subjects, 3 for quizzes.",
                palette.muted(),
            )),
        ])
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)))
        .style(palette.base());
        frame.render_widget(header, areas[0]);

        let news_title = Paragraph::new(Line::from(Span::styled(
            "Latest News & Updates",
            palette.heading(),
        )))
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
        frame.render_widget(news_title, areas[1]);

        for (i, item) in NEWS.iter().enumerate() {
            let [_, card_area, _] = Layout::horizontal([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .areas(areas[i + 2]);
            let card = Paragraph::new(Line::from(Span::styled(item.description, palette.muted())))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(palette.muted())
                        .title(Line::from(format!(" {} ", item.title)).style(palette.heading()))
                        .padding(Padding::horizontal(1)),
                )
                .style(palette.base().bg(palette.card))
                .wrap(Wrap { trim: true });
            frame.render_widget(card, card_area);
        }
    }
}
