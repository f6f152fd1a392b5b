//! Colors for light and dark mode.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight: Color,
}

impl Theme {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::LightGreen,
                border: Color::DarkGray,
                highlight: Color::Rgb(34, 197, 94),
            }
        } else {
            Self {
                background: Color::Reset,
                text: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Green,
                border: Color::Gray,
                highlight: Color::Rgb(22, 163, 74),
            }
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.highlight)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }
}

/// Terminal color for a display palette name
pub fn palette(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "orange" => Color::Rgb(249, 115, 22),
        "yellow" => Color::Yellow,
        "blue" => Color::LightBlue,
        "dark_blue" => Color::Blue,
        "green" => Color::Green,
        "cyan" => Color::Cyan,
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_differ() {
        assert_ne!(Theme::new(true), Theme::new(false));
    }

    #[test]
    fn unknown_palette_resets() {
        assert_eq!(palette("orange"), Color::Rgb(249, 115, 22));
        assert_eq!(palette("mauve"), Color::Reset);
    }
}
