//! Explicit application context and the adapters behind it.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::memory::MemoryAuthProvider;
use crate::auth::persist::{clear_session, load_session, save_session};
use crate::auth::rest::RestAuthProvider;
use crate::auth::{AuthFlow, AuthProvider, Session};
use crate::config::{Config, ConfigError, ThemeMode};
use crate::credentials::memory::MemoryCredentialStore;
use crate::credentials::rest::RestCredentialStore;
use crate::credentials::{CredentialService, CredentialStore};
use crate::remote::Backend;

/// Who is signed in and how things look. Created by the front end and passed
/// down; nothing reads it from a global.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub session: Option<Session>,
    pub theme: ThemeMode,
}

impl AppContext {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            session: None,
            theme,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

/// The two remote collaborators, wired for either the hosted backend or
/// in-memory stand-ins.
pub struct Services {
    pub auth: AuthFlow,
    pub credentials: CredentialService,
}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn CredentialStore>,
        redirect_to: Option<String>,
    ) -> Self {
        Self {
            auth: AuthFlow::new(auth, redirect_to),
            credentials: CredentialService::new(store),
        }
    }

    pub fn offline() -> Self {
        Self::new(
            Arc::new(MemoryAuthProvider::new()),
            Arc::new(MemoryCredentialStore::new()),
            None,
        )
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if config.offline {
            debug!("using in-memory backend");
            return Ok(Self::offline());
        }
        let (url, key) = config.backend()?;
        debug!(backend = %url, table = %config.table, "using hosted backend");
        let backend = Backend::new(url, key);
        Ok(Self::new(
            Arc::new(RestAuthProvider::new(backend.clone())),
            Arc::new(RestCredentialStore::new(backend, config.table.clone())),
            config.redirect_url.clone(),
        ))
    }

    /// Load the cached session, renewing it when it has expired. A session
    /// that cannot be renewed is cleared.
    pub async fn resume_session(&self, path: &Path) -> anyhow::Result<Option<Session>> {
        let Some(session) = load_session(path)? else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }
        match self.auth.renew(&session).await {
            Ok(fresh) => {
                info!(user = %fresh.user_id, "session renewed");
                save_session(path, &fresh)?;
                Ok(Some(fresh))
            }
            Err(e) => {
                warn!(error = %e, "could not renew session");
                clear_session(path)?;
                Ok(None)
            }
        }
    }
}
