use chrono::Timelike;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use crate::Tab;
use crate::core::selection::Navigator;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AboutDialog, BrowserView, HomePage, QuizView, SettingsView, TabBar, TitleBar,
};
use crate::tui::theme::Palette;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let palette = Palette::for_mode(app.settings.dark_mode);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, tabs_area] = layout.areas(frame.area());

    TitleBar::new(breadcrumb(app), app.status_message.clone(), palette).render(frame, title_area);

    match app.tab {
        Tab::Home => HomePage::new(chrono::Local::now().hour(), palette).render(frame, main_area),
        Tab::Subjects => {
            BrowserView::new(&mut tui.browser, &app.browser, palette).render(frame, main_area)
        }
        Tab::Quiz => QuizView::new(&tui.quiz, &app.quiz, app.quiz_summary, palette)
            .render(frame, main_area),
        Tab::Settings => {
            SettingsView::new(&tui.settings, &app.settings, palette).render(frame, main_area)
        }
    }

    TabBar::new(app.tab, palette).render(frame, tabs_area);

    if app.about_visible {
        AboutDialog::new(palette).render(frame, main_area);
    }
}

/// Where the user is within the active tab, e.g. "1BAC › Math › lessons".
pub fn breadcrumb(app: &App) -> String {
    match app.tab {
        Tab::Subjects => selection_path(&app.browser, true),
        Tab::Quiz => selection_path(&app.quiz, false),
        Tab::Home | Tab::Settings => app.tab.label().to_string(),
    }
}

fn selection_path(nav: &Navigator, with_mode: bool) -> String {
    let sel = nav.selection();
    let mut parts: Vec<String> = Vec::new();
    if let Some(level) = sel.level() {
        parts.push(level.to_uppercase());
    }
    if let Some(subject) = sel.subject() {
        parts.push(subject.to_string());
        if with_mode {
            parts.push(sel.mode().to_string());
        }
    }
    if let Some(lesson) = sel.lesson() {
        parts.push(lesson.to_string());
    }
    if let Some(resource) = sel.resource() {
        parts.push(resource.file_name());
    }
    if parts.is_empty() {
        return String::from("Nothing selected");
    }
    parts.join(" › ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::selection::{Slot, Variant};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn select(app: &mut App, variant: Variant, slot: Slot, value: &str) {
        update(
            app,
            Action::Select {
                variant,
                slot,
                value: value.to_string(),
            },
        );
    }

    #[test]
    fn test_draw_home() {
        let app = test_app();
        let text = draw(&app);
        assert!(text.contains("Welcome to Zico!"));
        assert!(text.contains("Latest News & Updates"));
        assert!(text.contains("1 Home"));
    }

    #[test]
    fn test_draw_subjects_breadcrumb() {
        let mut app = test_app();
        app.tab = Tab::Subjects;
        select(&mut app, Variant::Browser, Slot::Level, "1bac");
        select(&mut app, Variant::Browser, Slot::Subject, "Math");
        assert_eq!(breadcrumb(&app), "1BAC › Math › lessons");
        let text = draw(&app);
        assert!(text.contains("pdf1.pdf"));
    }

    #[test]
    fn test_breadcrumb_empty_selection() {
        let mut app = test_app();
        app.tab = Tab::Quiz;
        assert_eq!(breadcrumb(&app), "Nothing selected");
        select(&mut app, Variant::Quiz, Slot::Level, "2BAC");
        assert_eq!(breadcrumb(&app), "2BAC");
    }

    #[test]
    fn test_draw_about_overlay() {
        let mut app = test_app();
        app.tab = Tab::Settings;
        app.about_visible = true;
        let text = draw(&app);
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
