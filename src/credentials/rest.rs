use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::auth::session::Session;
use crate::credentials::models::{Credential, CredentialChanges, CredentialId, NewCredential};
use crate::credentials::ports::{CredentialStore, StoreError};
use crate::remote::{error_message, Backend};

pub const DEFAULT_TABLE: &str = "passwords";

/// PostgREST adapter. Row ownership is enforced server side; the `user_id`
/// filters here keep requests scoped even when a policy is misconfigured.
pub struct RestCredentialStore {
    backend: Backend,
    table: String,
}

impl RestCredentialStore {
    pub fn new(backend: Backend, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
        }
    }

    pub fn table_url(&self) -> Url {
        self.backend.endpoint(&format!("rest/v1/{}", self.table))
    }

    pub fn list_url(&self, user_id: &str) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("user_id", &format!("eq.{user_id}"));
        url
    }

    pub fn row_url(&self, id: &CredentialId, user_id: &str) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("user_id", &format!("eq.{user_id}"));
        url
    }

    async fn check(&self, resp: Response) -> Result<Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        warn!(table = %self.table, status = status.as_u16(), "store rejected request");
        Err(rejection(status, &body))
    }
}

fn rejection(status: StatusCode, body: &str) -> StoreError {
    StoreError::Rejected {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// `return=representation` answers an insert with a one-element array.
fn inserted_row(body: &[u8]) -> Result<Credential, StoreError> {
    let mut rows: Vec<Credential> =
        serde_json::from_slice(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    if rows.is_empty() {
        return Err(StoreError::Decode("insert returned no rows".to_string()));
    }
    Ok(rows.swap_remove(0))
}

#[async_trait]
impl CredentialStore for RestCredentialStore {
    async fn list(&self, session: &Session) -> Result<Vec<Credential>, StoreError> {
        debug!(table = %self.table, "GET credentials");
        let resp = self
            .backend
            .client()
            .get(self.list_url(&session.user_id))
            .headers(self.backend.headers(Some(&session.access_token)))
            .send()
            .await?;
        let resp = self.check(resp).await?;
        resp.json::<Vec<Credential>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert(
        &self,
        session: &Session,
        new: &NewCredential,
    ) -> Result<Credential, StoreError> {
        debug!(table = %self.table, "POST credential");
        let resp = self
            .backend
            .client()
            .post(self.table_url())
            .headers(self.backend.headers(Some(&session.access_token)))
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .json(new)
            .send()
            .await?;
        let resp = self.check(resp).await?;
        let body = resp.bytes().await?;
        inserted_row(&body)
    }

    async fn update(
        &self,
        session: &Session,
        id: &CredentialId,
        changes: &CredentialChanges,
    ) -> Result<(), StoreError> {
        debug!(table = %self.table, %id, "PATCH credential");
        let resp = self
            .backend
            .client()
            .patch(self.row_url(id, &session.user_id))
            .headers(self.backend.headers(Some(&session.access_token)))
            .json(changes)
            .send()
            .await?;
        self.check(resp).await.map(|_| ())
    }

    async fn delete(&self, session: &Session, id: &CredentialId) -> Result<(), StoreError> {
        debug!(table = %self.table, %id, "DELETE credential");
        let resp = self
            .backend
            .client()
            .delete(self.row_url(id, &session.user_id))
            .headers(self.backend.headers(Some(&session.access_token)))
            .send()
            .await?;
        self.check(resp).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RestCredentialStore {
        let backend = Backend::new(Url::parse("https://proj.example.co").unwrap(), "anon");
        RestCredentialStore::new(backend, DEFAULT_TABLE)
    }

    #[test]
    fn list_url_filters_on_owner() {
        assert_eq!(
            store().list_url("u-1").as_str(),
            "https://proj.example.co/rest/v1/passwords?select=*&user_id=eq.u-1"
        );
    }

    #[test]
    fn row_url_matches_id_and_owner() {
        let url = store().row_url(&CredentialId::new("abc"), "u-1");
        assert_eq!(
            url.as_str(),
            "https://proj.example.co/rest/v1/passwords?id=eq.abc&user_id=eq.u-1"
        );
    }

    #[test]
    fn rejection_keeps_status_and_store_reason() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy"}"#;
        match rejection(StatusCode::FORBIDDEN, body) {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "new row violates row-level security policy");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejection_with_empty_body_has_empty_message() {
        let err = rejection(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn insert_body_yields_first_row() {
        let body = br#"[{"id":7,"user_id":"u-1","platform":"GitHub","username":"octo","password":"pw"}]"#;
        let row = inserted_row(body).unwrap();
        assert_eq!(row.id, CredentialId::new("7"));
        assert_eq!(row.platform, "GitHub");
    }

    #[test]
    fn insert_without_rows_is_a_decode_error() {
        let err = inserted_row(b"[]").unwrap_err();
        assert!(matches!(err, StoreError::Decode(ref m) if m == "insert returned no rows"));
        assert!(matches!(inserted_row(b"{}").unwrap_err(), StoreError::Decode(_)));
    }
}
