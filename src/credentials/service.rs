use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::session::Session;
use crate::credentials::form::{CredentialForm, ValidationError};
use crate::credentials::models::{Credential, CredentialId};
use crate::credentials::ports::{CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("You must be logged in to do that")]
    NoSession,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Session-scoped facade over a [`CredentialStore`]. Validation and the
/// strength gate run here, before anything reaches the network.
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// All credentials owned by the session user. Signed out is a no-op.
    pub async fn fetch(&self, session: Option<&Session>) -> Result<Vec<Credential>, ServiceError> {
        let Some(session) = session else {
            debug!("fetch skipped: no session");
            return Ok(Vec::new());
        };
        let rows = self.store.list(session).await?;
        debug!(count = rows.len(), "fetched credentials");
        Ok(rows)
    }

    pub async fn save(
        &self,
        session: Option<&Session>,
        form: &CredentialForm,
    ) -> Result<Credential, ServiceError> {
        let session = session.ok_or(ServiceError::NoSession)?;
        let new = form.validate()?.into_new(&session.user_id);
        let created = self.store.insert(session, &new).await?;
        info!(id = %created.id, "credential created");
        Ok(created)
    }

    pub async fn update(
        &self,
        session: Option<&Session>,
        id: &CredentialId,
        form: &CredentialForm,
    ) -> Result<(), ServiceError> {
        let session = session.ok_or(ServiceError::NoSession)?;
        let changes = form.validate()?.into_changes();
        self.store.update(session, id, &changes).await?;
        info!(%id, "credential updated");
        Ok(())
    }

    pub async fn delete(
        &self,
        session: Option<&Session>,
        id: &CredentialId,
    ) -> Result<(), ServiceError> {
        let session = session.ok_or(ServiceError::NoSession)?;
        self.store.delete(session, id).await?;
        info!(%id, "credential deleted");
        Ok(())
    }
}
