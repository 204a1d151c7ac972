use chrono::Utc;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Authenticated context handed out by the auth provider.
///
/// The access token is what the store's row-level policy keys on; `user_id`
/// is the identity those policies compare against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(with = "crate::passwords::serde_secret::required")]
    pub access_token: SecretString,
    #[serde(default, with = "crate::passwords::serde_secret::optional")]
    pub refresh_token: Option<SecretString>,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Unix seconds. `None` means the provider did not say.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into().into()),
            refresh_token: None,
            user_id: user_id.into(),
            email: None,
            expires_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        self.expires_at.is_some_and(|t| now_unix >= t)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_boundaries() {
        let mut s = Session::new("tok", "u1");
        assert!(!s.is_expired_at(i64::MAX));
        s.expires_at = Some(100);
        assert!(!s.is_expired_at(99));
        assert!(s.is_expired_at(100));
    }

    #[test]
    fn debug_redacts_tokens() {
        let s = Session::new("very-secret-token", "u1");
        assert!(!format!("{s:?}").contains("very-secret-token"));
    }

    #[test]
    fn display_name_prefers_email() {
        let s = Session::new("t", "u1");
        assert_eq!(s.display_name(), "u1");
        assert_eq!(s.with_email("a@b.c").display_name(), "a@b.c");
    }
}
