use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::context::AppContext;
use crate::dashboard::Dashboard;
use crate::tui::theme::Theme;
use crate::tui::views::paint_background;

pub fn render_confirm(f: &mut Frame, dashboard: &Dashboard, ctx: &AppContext) {
    let theme = Theme::for_mode(ctx.theme);
    paint_background(f, &theme);
    let label = dashboard
        .delete_target()
        .map(|c| format!("{} ({})", c.platform, c.username))
        .unwrap_or_else(|| "(none)".to_string());
    let text = format!("Delete '{label}'? (y/N)");
    f.render_widget(Paragraph::new(text).style(theme.toast_style()), f.area());
}
