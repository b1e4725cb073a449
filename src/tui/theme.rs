//! Light and dark colour sets. Dark mode in `Settings` picks one.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub secondary_text: Color,
    pub card: Color,
    pub primary: Color,
    pub success: Color,
    pub danger: Color,
    pub warning: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(0xFF, 0xFF, 0xFF),
    text: Color::Rgb(0x1A, 0x1A, 0x1A),
    secondary_text: Color::Rgb(0x6B, 0x72, 0x80),
    card: Color::Rgb(0xF9, 0xFA, 0xFB),
    primary: Color::Rgb(0x25, 0x63, 0xEB),
    success: Color::Rgb(0x10, 0xB9, 0x81),
    danger: Color::Rgb(0xEF, 0x44, 0x44),
    warning: Color::Rgb(0xF5, 0x9E, 0x0B),
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(0x12, 0x12, 0x12),
    text: Color::Rgb(0xFF, 0xFF, 0xFF),
    secondary_text: Color::Rgb(0x9C, 0xA3, 0xAF),
    card: Color::Rgb(0x1E, 0x1E, 0x1E),
    primary: Color::Rgb(0x3B, 0x82, 0xF6),
    success: Color::Rgb(0x34, 0xD3, 0x99),
    danger: Color::Rgb(0xF8, 0x71, 0x71),
    warning: Color::Rgb(0xFB, 0xBF, 0x24),
};

impl Palette {
    pub fn for_mode(dark_mode: bool) -> Palette {
        if dark_mode { DARK } else { LIGHT }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.secondary_text)
    }

    /// Highlighted row or chip: white on primary.
    pub fn active(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert_eq!(Palette::for_mode(true), DARK);
        assert_eq!(Palette::for_mode(false), LIGHT);
        assert_ne!(DARK.background, LIGHT.background);
    }
}
