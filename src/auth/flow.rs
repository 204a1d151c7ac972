use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroize;

use crate::auth::provider::{AuthError, AuthProvider, OAuthProvider, SignUpOutcome};
use crate::auth::session::Session;

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn clear_secrets(&mut self) {
        self.password.zeroize();
        self.confirm.zeroize();
    }
}

impl LoginForm {
    pub fn clear_secrets(&mut self) {
        self.password.zeroize();
    }
}

/// Sign-up, login, reset and OAuth screens minus the drawing.
pub struct AuthFlow {
    provider: Arc<dyn AuthProvider>,
    redirect_to: Option<String>,
}

fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str, AuthError> {
    let v = value.trim();
    if v.is_empty() {
        Err(AuthError::MissingField(name))
    } else {
        Ok(v)
    }
}

impl AuthFlow {
    pub fn new(provider: Arc<dyn AuthProvider>, redirect_to: Option<String>) -> Self {
        Self {
            provider,
            redirect_to,
        }
    }

    /// Mismatched confirmation is rejected before the provider is contacted.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError> {
        let email = require(&form.email, "Email")?;
        if form.password.is_empty() {
            return Err(AuthError::MissingField("Password"));
        }
        if form.password != form.confirm {
            return Err(AuthError::PasswordMismatch);
        }
        debug!("submitting sign-up");
        self.provider.sign_up(email, &form.password).await
    }

    pub async fn log_in(&self, form: &LoginForm) -> Result<Session, AuthError> {
        let email = require(&form.email, "Email")?;
        if form.password.is_empty() {
            return Err(AuthError::MissingField("Password"));
        }
        self.provider.sign_in(email, &form.password).await
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let email = require(email, "Email")?;
        self.provider
            .send_password_reset(email, self.redirect_to.as_deref())
            .await
    }

    pub fn google_url(&self) -> Result<String, AuthError> {
        self.provider
            .oauth_authorize_url(OAuthProvider::Google, self.redirect_to.as_deref())
    }

    /// Swap an expired session for a fresh one when a refresh token is held.
    pub async fn renew(&self, session: &Session) -> Result<Session, AuthError> {
        match &session.refresh_token {
            Some(token) => self.provider.refresh(token.expose_secret()).await,
            None => Err(AuthError::Provider("Session expired".to_string())),
        }
    }

    pub async fn log_out(&self, session: &Session) -> Result<(), AuthError> {
        self.provider.sign_out(session).await
    }
}
