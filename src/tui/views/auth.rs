use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::context::AppContext;
use crate::tui::app::{AuthField, AuthMode, AuthScreen};
use crate::tui::theme::Theme;
use crate::tui::views::{mask, paint_background};

pub fn render_auth(f: &mut Frame, screen: &AuthScreen, ctx: &AppContext) {
    let theme = Theme::for_mode(ctx.theme);
    paint_background(f, &theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(1),    // fields
            Constraint::Length(1), // message
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    let title = match screen.mode {
        AuthMode::Login => "Passdeck — Log in",
        AuthMode::SignUp => "Passdeck — Sign up",
        AuthMode::Reset => "Passdeck — Reset password",
    };
    f.render_widget(Paragraph::new(title).style(theme.title_style()), chunks[0]);

    let block = Block::default().borders(Borders::ALL).title("Account");
    let inner_area = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let mut lines = vec![("Email", screen.email.clone(), AuthField::Email)];
    if screen.mode != AuthMode::Reset {
        lines.push(("Password", mask(&screen.password), AuthField::Password));
    }
    if screen.mode == AuthMode::SignUp {
        lines.push(("Confirm", mask(&screen.confirm), AuthField::Confirm));
    }
    let text: Vec<Line> = lines
        .into_iter()
        .map(|(label, value, field)| {
            let style = if field == screen.focus {
                theme.selection_style()
            } else {
                theme.normal_style()
            };
            Line::styled(format!("{label}: {value}"), style)
        })
        .collect();
    f.render_widget(Paragraph::new(text), inner_area);

    if let Some(msg) = &screen.message {
        f.render_widget(Paragraph::new(msg.as_str()).style(theme.toast_style()), chunks[2]);
    }

    let footer = match screen.mode {
        AuthMode::Login => "Enter=log in  Tab=switch  F2=sign up  F3=reset  F4=Google  Esc=quit",
        AuthMode::SignUp => "Enter=sign up  Tab=switch  F1=log in  Esc=quit",
        AuthMode::Reset => "Enter=send reset email  F1=log in  Esc=quit",
    };
    f.render_widget(Paragraph::new(footer).style(theme.muted_style()), chunks[3]);
}
