//! Bottom tab bar: Home, Subjects, Quiz, Settings.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::Tab;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TabBar {
    pub active: Tab,
    pub palette: Palette,
}

impl TabBar {
    pub fn new(active: Tab, palette: Palette) -> Self {
        Self { active, palette }
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|tab| Line::from(format!("{} {}", tab.index() + 1, tab.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(self.palette.muted())
            .highlight_style(self.palette.active())
            .divider("│")
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(self.palette.muted())
                    .title_bottom(Line::from(" Tab/1-4 Switch  q Quit ").right_aligned()),
            );
        frame.render_widget(tabs, area);
    }
}
