use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, StatusCode};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::auth::provider::{AuthError, AuthProvider, OAuthProvider, SignUpOutcome};
use crate::auth::session::Session;
use crate::remote::{error_message, Backend};

/// GoTrue-compatible auth provider.
pub struct RestAuthProvider {
    backend: Backend,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    identities: Option<Vec<serde_json::Value>>,
}

/// Token grant / sign-up body. Sign-up without auto-confirm returns the bare
/// user object, hence the flattened fallback fields.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<UserInfo>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    identities: Option<Vec<serde_json::Value>>,
}

impl AuthResponse {
    fn into_session(self) -> Option<Session> {
        let token = self.access_token?;
        let user = self.user?;
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|s| Utc::now().timestamp() + s));
        Some(Session {
            access_token: SecretString::new(token.into()),
            refresh_token: self.refresh_token.map(|r| SecretString::new(r.into())),
            user_id: user.id,
            email: user.email,
            expires_at,
        })
    }

    /// An existing, confirmed account comes back as a user with no identities.
    fn is_existing_account(&self) -> bool {
        let identities = self
            .user
            .as_ref()
            .and_then(|u| u.identities.as_ref())
            .or(self.identities.as_ref());
        matches!(identities, Some(ids) if ids.is_empty())
    }
}

fn is_account_exists(status: StatusCode, body: &str, message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("already registered")
        || lowered.contains("already exists")
        || (status == StatusCode::UNPROCESSABLE_ENTITY && body.contains("user_already_exists"))
}

fn auth_failure(status: StatusCode, body: &str) -> AuthError {
    let message = error_message(body);
    if is_account_exists(status, body, &message) {
        AuthError::AccountExists
    } else {
        AuthError::Provider(message)
    }
}

impl RestAuthProvider {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    async fn check(resp: Response) -> Result<Response, AuthError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "auth provider returned an error");
        Err(auth_failure(status, &body))
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<Session, AuthError> {
        let mut url = self.backend.endpoint("auth/v1/token");
        url.query_pairs_mut().append_pair("grant_type", grant_type);
        let resp = self
            .backend
            .client()
            .post(url)
            .headers(self.backend.headers(None))
            .json(&body)
            .send()
            .await?;
        let parsed: AuthResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        parsed
            .into_session()
            .ok_or_else(|| AuthError::Decode("token response without session".to_string()))
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let resp = self
            .backend
            .client()
            .post(self.backend.endpoint("auth/v1/signup"))
            .headers(self.backend.headers(None))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let parsed: AuthResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        if parsed.is_existing_account() {
            return Err(AuthError::AccountExists);
        }
        if parsed.id.is_none() && parsed.user.is_none() {
            return Err(AuthError::Decode("sign-up response without user".to_string()));
        }
        match parsed.into_session() {
            Some(session) => {
                info!(user_id = %session.user_id, "signed up");
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => Ok(SignUpOutcome::ConfirmationSent),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .token_grant("password", json!({ "email": email, "password": password }))
            .await?;
        info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        let mut url = self.backend.endpoint("auth/v1/recover");
        if let Some(r) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", r);
        }
        let resp = self
            .backend
            .client()
            .post(url)
            .headers(self.backend.headers(None))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    fn oauth_authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&str>,
    ) -> Result<String, AuthError> {
        let mut url = self.backend.endpoint("auth/v1/authorize");
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("provider", provider.as_str());
            if let Some(r) = redirect_to {
                q.append_pair("redirect_to", r);
            }
        }
        Ok(url.to_string())
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let resp = self
            .backend
            .client()
            .post(self.backend.endpoint("auth/v1/logout"))
            .headers(self.backend.headers(Some(&session.access_token)))
            .send()
            .await?;
        Self::check(resp).await?;
        info!(user_id = %session.user_id, "signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use url::Url;

    #[test]
    fn parses_token_grant_into_session() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1700000000,
            "refresh_token": "r1",
            "user": { "id": "u-1", "email": "a@b.c" }
        }"#;
        let parsed: AuthResponse = serde_json::from_str(body).unwrap();
        let s = parsed.into_session().unwrap();
        assert_eq!(s.access_token.expose_secret(), "jwt");
        assert_eq!(s.user_id, "u-1");
        assert_eq!(s.email.as_deref(), Some("a@b.c"));
        assert_eq!(s.expires_at, Some(1700000000));
    }

    #[test]
    fn unconfirmed_sign_up_has_no_session() {
        let body = r#"{ "id": "u-2", "email": "a@b.c", "identities": [{"id":"x"}] }"#;
        let parsed: AuthResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.is_existing_account());
        assert!(parsed.into_session().is_none());
    }

    #[test]
    fn empty_identities_means_existing_account() {
        let body = r#"{ "id": "u-2", "email": "a@b.c", "identities": [] }"#;
        let parsed: AuthResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.is_existing_account());
    }

    #[test]
    fn account_exists_detection() {
        assert!(is_account_exists(
            StatusCode::BAD_REQUEST,
            "",
            "User already registered"
        ));
        assert!(is_account_exists(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error_code":"user_already_exists"}"#,
            "whatever"
        ));
        assert!(!is_account_exists(
            StatusCode::BAD_REQUEST,
            "",
            "Invalid login credentials"
        ));
    }

    #[test]
    fn oauth_url_carries_provider_and_redirect() {
        let backend = Backend::new(Url::parse("https://proj.example.co").unwrap(), "anon");
        let p = RestAuthProvider::new(backend);
        let url = p
            .oauth_authorize_url(OAuthProvider::Google, Some("http://localhost:3000/dashboard"))
            .unwrap();
        assert_eq!(
            url,
            "https://proj.example.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fdashboard"
        );
    }

    #[test]
    fn failure_maps_duplicate_signup_to_account_exists() {
        let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert!(matches!(
            auth_failure(StatusCode::UNPROCESSABLE_ENTITY, body),
            AuthError::AccountExists
        ));
    }

    #[test]
    fn failure_passes_provider_reason_through() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        let err = auth_failure(StatusCode::BAD_REQUEST, body);
        assert!(matches!(&err, AuthError::Provider(m) if m == "Invalid login credentials"));
        assert_eq!(err.user_message(), "Invalid login credentials");
    }

    #[test]
    fn failure_without_reason_gets_generic_text() {
        let err = auth_failure(StatusCode::BAD_GATEWAY, "  ");
        assert!(matches!(&err, AuthError::Provider(m) if m.is_empty()));
        assert_eq!(err.user_message(), crate::auth::provider::GENERIC_FAILURE);
    }
}
