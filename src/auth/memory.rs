use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::auth::provider::{AuthError, AuthProvider, OAuthProvider, SignUpOutcome};
use crate::auth::session::Session;
use crate::passwords::{hash_password, verify_password};

const SESSION_TTL_SECS: i64 = 3600;

struct Account {
    user_id: String,
    password_hash: String,
}

/// Local stand-in for the hosted auth provider. Accounts auto-confirm and
/// passwords are kept as Argon2 hashes.
#[derive(Default)]
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    reset_requests: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that reached the provider.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn issue(user_id: &str, email: &str) -> Session {
        let mut session = Session::new(Uuid::new_v4().to_string(), user_id).with_email(email);
        session.expires_at = Some(Utc::now().timestamp() + SESSION_TTL_SECS);
        session
    }

    fn key(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = Self::key(email);
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        if accounts.contains_key(&key) {
            return Err(AuthError::AccountExists);
        }
        let password_hash = hash_password(password).map_err(|e| AuthError::Provider(e.to_string()))?;
        let user_id = Uuid::new_v4().to_string();
        accounts.insert(
            key,
            Account {
                user_id: user_id.clone(),
                password_hash,
            },
        );
        Ok(SignUpOutcome::SignedIn(Self::issue(&user_id, email)))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        match accounts.get(&Self::key(email)) {
            Some(acct) if verify_password(password, &acct.password_hash) => {
                Ok(Self::issue(&acct.user_id, email))
            }
            _ => Err(AuthError::Provider("Invalid login credentials".to_string())),
        }
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<Session, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AuthError::Provider("Invalid Refresh Token".to_string()))
    }

    async fn send_password_reset(
        &self,
        email: &str,
        _redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Unknown addresses succeed too, so the response leaks nothing.
        if let Ok(mut r) = self.reset_requests.lock() {
            r.push(Self::key(email));
        }
        Ok(())
    }

    fn oauth_authorize_url(
        &self,
        provider: OAuthProvider,
        _redirect_to: Option<&str>,
    ) -> Result<String, AuthError> {
        Err(AuthError::Provider(format!(
            "{} sign-in is not available offline",
            provider.as_str()
        )))
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
