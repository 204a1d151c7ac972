use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::auth::session::Session;
use crate::credentials::models::{Credential, CredentialChanges, CredentialId, NewCredential};
use crate::credentials::ports::{CredentialStore, StoreError};

/// In-process credential table with the same per-row ownership policy the
/// hosted store enforces. Backs `--offline` mode and the test suite.
#[derive(Default)]
pub struct MemoryCredentialStore {
    rows: Mutex<Vec<Credential>>,
    writes: AtomicUsize,
    fail_next: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Credential>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Number of insert/update/delete requests that reached the store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Every row regardless of owner.
    pub fn snapshot(&self) -> Vec<Credential> {
        self.lock().clone()
    }

    /// Make the next request fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.fail_next.lock() {
            *guard = Some(message.into());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Credential>> {
        // A poisoned table is still a valid table.
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        let injected = self.fail_next.lock().ok().and_then(|mut g| g.take());
        match injected {
            Some(message) => Err(StoreError::Rejected {
                status: 500,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn list(&self, session: &Session) -> Result<Vec<Credential>, StoreError> {
        self.take_failure()?;
        Ok(self
            .lock()
            .iter()
            .filter(|c| c.user_id == session.user_id)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        session: &Session,
        new: &NewCredential,
    ) -> Result<Credential, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        if new.user_id != session.user_id {
            return Err(StoreError::Rejected {
                status: 403,
                message: "new row violates row-level security policy".to_string(),
            });
        }
        let now = Utc::now();
        let row = Credential {
            id: CredentialId::new(Uuid::new_v4().to_string()),
            user_id: new.user_id.clone(),
            platform: new.platform.clone(),
            username: new.username.clone(),
            password: new.password.clone(),
            url: new.url.clone(),
            notes: new.notes.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.lock().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        session: &Session,
        id: &CredentialId,
        changes: &CredentialChanges,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let mut rows = self.lock();
        if let Some(row) = rows
            .iter_mut()
            .find(|c| &c.id == id && c.user_id == session.user_id)
        {
            row.platform = changes.platform.clone();
            row.username = changes.username.clone();
            row.password = changes.password.clone();
            row.url = changes.url.clone();
            row.notes = changes.notes.clone();
            row.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, session: &Session, id: &CredentialId) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.lock()
            .retain(|c| !(&c.id == id && c.user_id == session.user_id));
        Ok(())
    }
}
