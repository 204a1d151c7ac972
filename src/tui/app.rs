use std::path::PathBuf;

use zeroize::Zeroize;

use crate::auth::{LoginForm, SignUpForm};
use crate::credentials::Credential;
use crate::dashboard::Dashboard;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
    Confirm,
}

/// Text fields and status line for the login / sign-up / reset screen.
#[derive(Debug)]
pub struct AuthScreen {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub focus: AuthField,
    pub message: Option<String>,
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            confirm: String::new(),
            focus: AuthField::Email,
            message: None,
        }
    }
}

impl AuthScreen {
    pub fn switch(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.focus = AuthField::Email;
        self.clear_secrets();
    }

    pub fn clear_secrets(&mut self) {
        self.password.zeroize();
        self.confirm.zeroize();
    }

    pub fn next_field(&mut self) {
        self.focus = match (self.mode, self.focus) {
            (AuthMode::Reset, _) => AuthField::Email,
            (_, AuthField::Email) => AuthField::Password,
            (AuthMode::SignUp, AuthField::Password) => AuthField::Confirm,
            _ => AuthField::Email,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::Confirm => &mut self.confirm,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn login_form(&self) -> LoginForm {
        LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn sign_up_form(&self) -> SignUpForm {
        SignUpForm {
            email: self.email.clone(),
            password: self.password.clone(),
            confirm: self.confirm.clone(),
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub auth: AuthScreen,
    pub dashboard: Dashboard,
    /// Where a signed-in session is persisted; `None` keeps it in memory.
    pub session_path: Option<PathBuf>,
    pub should_quit: bool,
}

impl App {
    pub fn new(screen: Screen, credentials: Vec<Credential>, generator_length: usize) -> Self {
        Self {
            screen,
            auth: AuthScreen::default(),
            dashboard: Dashboard::new(credentials).with_generator_length(generator_length),
            session_path: None,
            should_quit: false,
        }
    }

    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = Some(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_per_mode() {
        let mut s = AuthScreen::default();
        s.next_field();
        assert_eq!(s.focus, AuthField::Password);
        s.next_field();
        assert_eq!(s.focus, AuthField::Email);

        s.switch(AuthMode::SignUp);
        s.next_field();
        s.next_field();
        assert_eq!(s.focus, AuthField::Confirm);

        s.switch(AuthMode::Reset);
        s.next_field();
        assert_eq!(s.focus, AuthField::Email);
    }

    #[test]
    fn switching_mode_wipes_secrets_only() {
        let mut s = AuthScreen::default();
        for c in "me@x.io".chars() {
            s.push_char(c);
        }
        s.next_field();
        s.push_char('p');
        s.switch(AuthMode::SignUp);
        assert_eq!(s.email, "me@x.io");
        assert!(s.password.is_empty());
    }
}
