pub mod app;
pub mod theme;
pub mod views;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::auth::persist::{clear_session, save_session};
use crate::auth::{Session, SignUpOutcome};
use crate::config::Config;
use crate::context::{AppContext, Services};
use crate::dashboard::{self, Mode, View};

use self::app::{App, AuthMode, Screen};
use self::views::auth::render_auth;
use self::views::confirm::render_confirm;
use self::views::form::render_form;
use self::views::list::render_list;

pub async fn launch(config: &Config) -> Result<()> {
    let services = Services::from_config(config).context("cannot start the dashboard")?;
    let mut ctx = AppContext::new(config.theme);

    let mut app = App::new(Screen::Auth, Vec::new(), config.generator_length);
    let session = if config.offline {
        None
    } else {
        app = app.with_session_path(config.session_path.clone());
        services.resume_session(&config.session_path).await?
    };
    if let Some(session) = session {
        enter_dashboard(&mut app, &mut ctx, &services, session).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(200);

    let res: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| draw(f, &app, &ctx)) {
            break Err(e.into());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => {
                    handle_key(&mut app, &mut ctx, &services, k).await;
                }
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }
        if app.should_quit {
            break Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            app.dashboard.tick();
            last_tick = Instant::now();
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;

    res
}

pub fn draw(f: &mut Frame, app: &App, ctx: &AppContext) {
    match app.screen {
        Screen::Auth => render_auth(f, &app.auth, ctx),
        Screen::Dashboard => match app.dashboard.view() {
            View::List => render_list(f, &app.dashboard, ctx),
            View::AddForm | View::EditForm => render_form(f, &app.dashboard, ctx),
            View::ConfirmDelete => render_confirm(f, &app.dashboard, ctx),
        },
    }
}

/// Apply one key press. Network calls are awaited inline, so the state is
/// only ever touched from the event loop.
pub async fn handle_key(app: &mut App, ctx: &mut AppContext, services: &Services, k: KeyEvent) {
    match app.screen {
        Screen::Auth => handle_auth_key(app, ctx, services, k).await,
        Screen::Dashboard => handle_dashboard_key(app, ctx, services, k).await,
    }
}

async fn handle_auth_key(app: &mut App, ctx: &mut AppContext, services: &Services, k: KeyEvent) {
    match k.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.auth.next_field(),
        KeyCode::F(1) => app.auth.switch(AuthMode::Login),
        KeyCode::F(2) => app.auth.switch(AuthMode::SignUp),
        KeyCode::F(3) => app.auth.switch(AuthMode::Reset),
        KeyCode::F(4) => {
            app.auth.message = Some(match services.auth.google_url() {
                Ok(url) => format!("Open in your browser: {url}"),
                Err(e) => e.user_message(),
            });
        }
        KeyCode::Backspace => app.auth.backspace(),
        KeyCode::Enter => submit_auth(app, ctx, services).await,
        KeyCode::Char(c) => app.auth.push_char(c),
        _ => {}
    }
}

async fn submit_auth(app: &mut App, ctx: &mut AppContext, services: &Services) {
    match app.auth.mode {
        AuthMode::Login => {
            let mut form = app.auth.login_form();
            let result = services.auth.log_in(&form).await;
            form.clear_secrets();
            match result {
                Ok(session) => enter_dashboard(app, ctx, services, session).await,
                Err(e) => app.auth.message = Some(e.user_message()),
            }
        }
        AuthMode::SignUp => {
            let mut form = app.auth.sign_up_form();
            let result = services.auth.sign_up(&form).await;
            form.clear_secrets();
            match result {
                Ok(SignUpOutcome::SignedIn(session)) => {
                    enter_dashboard(app, ctx, services, session).await
                }
                Ok(SignUpOutcome::ConfirmationSent) => {
                    app.auth.switch(AuthMode::Login);
                    app.auth.message =
                        Some("Check your email to confirm your account".to_string());
                }
                Err(e) => app.auth.message = Some(e.user_message()),
            }
        }
        AuthMode::Reset => {
            app.auth.message = Some(match services.auth.reset_password(&app.auth.email).await {
                Ok(()) => "Password reset email sent".to_string(),
                Err(e) => e.user_message(),
            });
        }
    }
}

async fn enter_dashboard(app: &mut App, ctx: &mut AppContext, services: &Services, session: Session) {
    info!(user = %session.user_id, "signed in");
    if let Some(path) = &app.session_path {
        if let Err(e) = save_session(path, &session) {
            warn!(error = %e, "could not cache session");
        }
    }
    ctx.sign_in(session);
    app.auth.clear_secrets();
    app.auth.message = None;
    app.screen = Screen::Dashboard;
    let _ = dashboard::refresh(&mut app.dashboard, &services.credentials, ctx.session()).await;
}

async fn log_out(app: &mut App, ctx: &mut AppContext, services: &Services) {
    if let Some(session) = ctx.sign_out() {
        if let Err(e) = services.auth.log_out(&session).await {
            warn!(error = %e, "sign-out request failed");
        }
        info!(user = %session.user_id, "signed out");
    }
    if let Some(path) = &app.session_path {
        if let Err(e) = clear_session(path) {
            warn!(error = %e, "could not clear cached session");
        }
    }
    app.dashboard.replace_credentials(Vec::new());
    app.dashboard.set_filter("");
    app.auth.switch(AuthMode::Login);
    app.screen = Screen::Auth;
}

async fn handle_dashboard_key(
    app: &mut App,
    ctx: &mut AppContext,
    services: &Services,
    k: KeyEvent,
) {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    let d = &mut app.dashboard;
    let action = match d.view() {
        View::List => match d.mode {
            Mode::Normal => match k.code {
                KeyCode::Char('q') => {
                    app.should_quit = true;
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    d.next();
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    d.prev();
                    None
                }
                KeyCode::Char('/') => {
                    d.enter_search();
                    None
                }
                KeyCode::Char('a') => {
                    d.open_add();
                    None
                }
                KeyCode::Char('e') => {
                    d.open_edit();
                    None
                }
                KeyCode::Char('d') => {
                    d.request_delete();
                    None
                }
                KeyCode::Char('v') => {
                    d.toggle_reveal_selected();
                    None
                }
                KeyCode::Char('r') => {
                    let _ = dashboard::refresh(d, &services.credentials, ctx.session()).await;
                    None
                }
                KeyCode::Char('t') => {
                    ctx.toggle_theme();
                    None
                }
                KeyCode::Char('L') => {
                    log_out(app, ctx, services).await;
                    return;
                }
                _ => None,
            },
            Mode::Search => {
                match k.code {
                    KeyCode::Esc | KeyCode::Enter => d.exit_search(),
                    KeyCode::Backspace => d.pop_filter(),
                    KeyCode::Char(c) => d.push_filter(c),
                    _ => {}
                }
                None
            }
        },
        View::AddForm | View::EditForm => match k.code {
            KeyCode::Esc => {
                d.cancel();
                None
            }
            KeyCode::Tab => {
                d.next_field();
                None
            }
            KeyCode::BackTab => {
                d.prev_field();
                None
            }
            KeyCode::Char('g') if ctrl => {
                d.generate_password();
                None
            }
            KeyCode::Char('r') if ctrl => {
                d.form_reveal = !d.form_reveal;
                None
            }
            KeyCode::Backspace => {
                d.backspace_form();
                None
            }
            KeyCode::Enter => d.submit(),
            KeyCode::Char(c) if !ctrl => {
                d.update_form_char(c);
                None
            }
            _ => None,
        },
        View::ConfirmDelete => match k.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => d.confirm_delete(true),
            _ => d.confirm_delete(false),
        },
    };

    if let Some(action) = action {
        debug!("running dashboard action");
        let _ = dashboard::run_pending(d, &services.credentials, ctx.session(), action).await;
    }
}
