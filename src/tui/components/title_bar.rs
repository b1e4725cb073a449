//! # TitleBar Component
//!
//! Top status line: app name, where the user is, and the latest status.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     "1BAC › Math".to_string(),
//!     app.status_message.clone(),
//!     palette,
//! );
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Breadcrumb and status**: `"Zico | 1BAC › Math | Opening pdf2.pdf"`
//! 2. **Status only**: `"Zico | Welcome to Zico!"`
//! 3. **Default**: `"Zico"`

use crate::tui::component::Component;
use crate::tui::theme::Palette;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Current position in the active tab, e.g. "1BAC › Math"
    pub breadcrumb: String,
    pub status_message: String,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(breadcrumb: String, status_message: String, palette: Palette) -> Self {
        Self {
            breadcrumb,
            status_message,
            palette,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled("Zico", self.palette.heading())];
        for part in [&self.breadcrumb, &self.status_message] {
            if !part.is_empty() {
                spans.push(Span::styled(" | ", self.palette.muted()));
                spans.push(Span::raw(part.as_str()));
            }
        }
        frame.render_widget(Line::from(spans).style(self.palette.base()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::LIGHT;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_breadcrumb_and_status() {
        let mut title_bar = TitleBar::new(
            "1BAC › Math".to_string(),
            "Opening pdf2.pdf".to_string(),
            LIGHT,
        );
        let text = render_text(&mut title_bar);
        assert!(text.contains("Zico"));
        assert!(text.contains("1BAC › Math"));
        assert!(text.contains("Opening pdf2.pdf"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(String::new(), String::new(), LIGHT);
        let text = render_text(&mut title_bar);
        assert!(text.contains("Zico"));
        assert!(!text.contains('|'));
    }
}
