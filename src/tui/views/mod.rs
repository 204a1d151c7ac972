pub mod auth;
pub mod confirm;
pub mod form;
pub mod list;

use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::tui::theme::Theme;

/// Paint the whole frame with the theme background before a view draws.
pub(crate) fn paint_background(f: &mut Frame, theme: &Theme) {
    f.render_widget(Block::default().style(theme.base_style()), f.area());
}

pub(crate) const MASK: &str = "••••••••";

pub(crate) fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}
