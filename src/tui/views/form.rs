use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::context::AppContext;
use crate::dashboard::{Dashboard, FormField, View};
use crate::passwords::StrengthLevel;
use crate::tui::theme::Theme;
use crate::tui::views::{mask, paint_background};

fn field_line<'a>(label: &'a str, value: String, focused: bool, theme: &Theme) -> Paragraph<'a> {
    let text = format!("{label}: {value}");
    let p = Paragraph::new(text);
    if focused {
        p.style(theme.selection_style())
    } else {
        p.style(theme.normal_style())
    }
}

pub fn render_form(f: &mut Frame, dashboard: &Dashboard, ctx: &AppContext) {
    let theme = Theme::for_mode(ctx.theme);
    paint_background(f, &theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(1),    // form
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    let title = match dashboard.view() {
        View::EditForm => "Passdeck — Edit Credential",
        _ => "Passdeck — Add Credential",
    };
    f.render_widget(Paragraph::new(title).style(theme.title_style()), chunks[0]);

    let block = Block::default().borders(Borders::ALL).title("Form");
    let inner_area = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let form = &dashboard.form;
    let focus = dashboard.form_field;
    let password = if dashboard.form_reveal {
        form.password.clone()
    } else {
        mask(&form.password)
    };
    let fields = [
        ("Platform", form.platform.clone(), FormField::Platform),
        ("Username", form.username.clone(), FormField::Username),
        ("Password", password, FormField::Password),
        ("URL", form.url.clone(), FormField::Url),
        ("Notes", form.notes.clone(), FormField::Notes),
    ];
    for (i, (label, value, field)) in fields.into_iter().enumerate() {
        f.render_widget(field_line(label, value, focus == field, &theme), inner[i]);
    }

    if !form.password.is_empty() {
        let strength = dashboard.form_strength();
        let style = match strength.level() {
            StrengthLevel::Weak => theme.toast_style(),
            StrengthLevel::Moderate => theme.normal_style(),
            StrengthLevel::Strong => theme.good_style(),
        };
        let line = format!("Strength {}/6  {}", strength.score, strength.feedback.join(". "));
        f.render_widget(Paragraph::new(line).style(style), inner[5]);
    }

    let footer = dashboard.toast_message().unwrap_or(
        "Esc=cancel  Tab/Shift-Tab=switch  Ctrl-G=generate  Ctrl-R=reveal  Enter=submit",
    );
    f.render_widget(Paragraph::new(footer).style(theme.toast_style()), chunks[2]);
}
