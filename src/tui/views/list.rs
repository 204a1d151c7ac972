use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use secrecy::ExposeSecret;

use crate::context::AppContext;
use crate::dashboard::{Dashboard, Mode};
use crate::tui::theme::Theme;
use crate::tui::views::{paint_background, MASK};

pub fn render_list(f: &mut Frame, dashboard: &Dashboard, ctx: &AppContext) {
    let theme = Theme::for_mode(ctx.theme);
    paint_background(f, &theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // search / hint
            Constraint::Min(1),    // table
            Constraint::Length(1), // footer/toast
        ])
        .split(f.area());

    let who = ctx
        .session()
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| "signed out".to_string());
    let title = Paragraph::new(format!("Passdeck — {who}")).style(theme.title_style());
    f.render_widget(title, chunks[0]);

    let search_label = match dashboard.mode {
        Mode::Normal => format!(
            "Press / to search  |  {} of {} items",
            dashboard.visible().len(),
            dashboard.total()
        ),
        Mode::Search => format!("Search: {}", dashboard.filter()),
    };
    f.render_widget(
        Paragraph::new(search_label).style(theme.muted_style()),
        chunks[1],
    );

    let rows: Vec<Row> = dashboard
        .visible()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let style = if i == dashboard.selected {
                theme.selection_style()
            } else {
                theme.normal_style()
            };
            let password = if dashboard.is_revealed(&c.id) {
                c.password.expose_secret().to_string()
            } else {
                MASK.to_string()
            };
            Row::new(vec![
                Cell::from(c.platform.clone()),
                Cell::from(c.username.clone()),
                Cell::from(password),
                Cell::from(c.url.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Platform", "Username", "Password", "URL"])
        .style(theme.title_style());
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Credentials"));
    f.render_widget(table, chunks[2]);

    let footer_text = dashboard
        .toast_message()
        .unwrap_or("q=quit  a=add  e=edit  d=delete  v=reveal  r=refresh  t=theme  L=logout");
    f.render_widget(
        Paragraph::new(footer_text).style(theme.toast_style()),
        chunks[3],
    );
}
