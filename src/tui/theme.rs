use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection: Color,
    pub good: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::Dark)
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                primary: Color::Blue,
                accent: Color::Red,
                muted: Color::DarkGray,
                selection: Color::Cyan,
                good: Color::Green,
            },
            ThemeMode::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                primary: Color::Blue,
                accent: Color::Magenta,
                muted: Color::Gray,
                selection: Color::Blue,
                good: Color::Green,
            },
        }
    }

    pub fn base_style(&self) -> Style { Style::default().fg(self.fg).bg(self.bg) }
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }
    pub fn normal_style(&self) -> Style { Style::default().fg(self.fg) }
    pub fn muted_style(&self) -> Style { Style::default().fg(self.muted) }
    pub fn selection_style(&self) -> Style { Style::default().fg(self.selection).add_modifier(Modifier::BOLD) }
    pub fn toast_style(&self) -> Style { Style::default().fg(self.accent).add_modifier(Modifier::BOLD) }
    pub fn good_style(&self) -> Style { Style::default().fg(self.good) }
}
