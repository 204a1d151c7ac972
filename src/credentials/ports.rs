use async_trait::async_trait;
use thiserror::Error;

use crate::auth::session::Session;
use crate::credentials::models::{Credential, CredentialChanges, CredentialId, NewCredential};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    /// The store's own reason, passed through untouched.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from store: {0}")]
    Decode(String),
}

/// Remote credential table. Every call is made on behalf of `session`; the
/// store only ever exposes rows whose owner equals `session.user_id`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn list(&self, session: &Session) -> Result<Vec<Credential>, StoreError>;

    async fn insert(&self, session: &Session, new: &NewCredential)
        -> Result<Credential, StoreError>;

    /// Matches on both `id` and the session user. Zero matched rows is not an error.
    async fn update(
        &self,
        session: &Session,
        id: &CredentialId,
        changes: &CredentialChanges,
    ) -> Result<(), StoreError>;

    /// Same double match as `update`.
    async fn delete(&self, session: &Session, id: &CredentialId) -> Result<(), StoreError>;
}
