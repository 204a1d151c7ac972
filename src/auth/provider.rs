use async_trait::async_trait;
use thiserror::Error;

use crate::auth::session::Session;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("An account with this email already exists")]
    AccountExists,
    /// Reason reported by the provider, verbatim.
    #[error("{0}")]
    Provider(String),
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response from auth provider: {0}")]
    Decode(String),
}

impl AuthError {
    /// What to put in front of the user. Local and provider-reported reasons
    /// are shown as-is; anything without a usable reason gets the generic text.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Provider(msg) if msg.trim().is_empty() => GENERIC_FAILURE.to_string(),
            AuthError::Http(_) | AuthError::Decode(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
        }
    }
}

#[derive(Debug)]
pub enum SignUpOutcome {
    /// Provider auto-confirmed the account and returned a session.
    SignedIn(Session),
    /// Account created; the user must confirm by email before logging in.
    ConfirmationSent,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;

    async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError>;

    /// Where to send the user to start the provider's OAuth redirect flow.
    fn oauth_authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&str>,
    ) -> Result<String, AuthError>;

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_falls_back_to_generic() {
        assert_eq!(AuthError::Provider("  ".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(AuthError::Decode("eof".into()).user_message(), GENERIC_FAILURE);
        assert_eq!(
            AuthError::Provider("Invalid login credentials".into()).user_message(),
            "Invalid login credentials"
        );
        assert_eq!(AuthError::PasswordMismatch.user_message(), "Passwords do not match");
    }
}
