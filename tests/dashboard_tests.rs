use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use passdeck::auth::Session;
use passdeck::credentials::memory::MemoryCredentialStore;
use passdeck::credentials::{
    Credential, CredentialChanges, CredentialId, CredentialService, CredentialStore,
    NewCredential, StoreError,
};
use passdeck::dashboard::{run_pending, Dashboard, View};

/// Wraps the in-memory store and counts every call.
struct Counting {
    inner: MemoryCredentialStore,
    calls: AtomicUsize,
}

impl Counting {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for Counting {
    async fn list(&self, s: &Session) -> Result<Vec<Credential>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list(s).await
    }
    async fn insert(&self, s: &Session, n: &NewCredential) -> Result<Credential, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(s, n).await
    }
    async fn update(
        &self,
        s: &Session,
        id: &CredentialId,
        c: &CredentialChanges,
    ) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update(s, id, c).await
    }
    async fn delete(&self, s: &Session, id: &CredentialId) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(s, id).await
    }
}

async fn seeded() -> (Arc<Counting>, CredentialService, Session, Dashboard) {
    let store = Arc::new(Counting {
        inner: MemoryCredentialStore::new(),
        calls: AtomicUsize::new(0),
    });
    let service = CredentialService::new(store.clone());
    let session = Session::new("tok", "alice");
    let mut d = Dashboard::default();
    for (platform, user, notes) in [
        ("GitHub", "octo", ""),
        ("Mail", "Alice", "Personal inbox"),
        ("Bank", "acct-1", ""),
    ] {
        d.open_add();
        d.form.platform = platform.into();
        d.form.username = user.into();
        d.form.password = "Str0ng!Passw0rd".into();
        d.form.notes = notes.into();
        let action = d.submit().expect("valid form");
        run_pending(&mut d, &service, Some(&session), action)
            .await
            .unwrap();
    }
    (store, service, session, d)
}

#[tokio::test]
async fn each_action_is_one_write_plus_refetch() {
    let (store, _service, _session, d) = seeded().await;
    assert_eq!(d.total(), 3);
    assert_eq!(d.view(), View::List);
    assert_eq!(store.calls(), 6);
}

#[tokio::test]
async fn filtering_never_touches_the_store() {
    let (store, _service, _session, mut d) = seeded().await;
    let before = store.calls();
    d.set_filter("ALICE");
    assert_eq!(d.visible().len(), 1);
    d.set_filter("inbox");
    assert_eq!(d.visible()[0].platform, "Mail");
    d.set_filter("");
    assert_eq!(d.visible().len(), 3);
    assert_eq!(store.calls(), before);
}

#[tokio::test]
async fn declined_delete_leaves_list_alone() {
    let (store, _service, _session, mut d) = seeded().await;
    let before = store.calls();
    d.request_delete();
    assert_eq!(d.view(), View::ConfirmDelete);
    assert!(d.confirm_delete(false).is_none());
    assert_eq!(d.view(), View::List);
    assert_eq!(d.total(), 3);
    assert_eq!(store.calls(), before);
}

#[tokio::test]
async fn confirmed_delete_removes_row() {
    let (_store, service, session, mut d) = seeded().await;
    d.set_filter("bank");
    d.request_delete();
    let action = d.confirm_delete(true).unwrap();
    run_pending(&mut d, &service, Some(&session), action)
        .await
        .unwrap();
    d.set_filter("");
    assert_eq!(d.total(), 2);
    assert!(d.visible().iter().all(|c| c.platform != "Bank"));
}

#[tokio::test]
async fn edit_updates_the_selected_row() {
    let (_store, service, session, mut d) = seeded().await;
    d.set_filter("octo");
    d.open_edit();
    assert_eq!(d.view(), View::EditForm);
    d.form.platform = "GitHub (work)".into();
    let action = d.submit().unwrap();
    run_pending(&mut d, &service, Some(&session), action)
        .await
        .unwrap();
    assert_eq!(d.view(), View::List);
    assert_eq!(d.toast_message(), Some("Credential updated"));
    assert_eq!(d.visible()[0].platform, "GitHub (work)");
}

#[tokio::test]
async fn failed_write_restores_the_form() {
    let (_store, service, _session, mut d) = seeded().await;
    d.open_add();
    d.form.platform = "Shop".into();
    d.form.username = "me".into();
    d.form.password = "Str0ng!Passw0rd".into();
    let action = d.submit().unwrap();
    // no session: the service refuses
    let res = run_pending(&mut d, &service, None, action).await;
    assert!(res.is_err());
    assert!(!d.is_pending());
    assert_eq!(d.view(), View::AddForm);
    assert_eq!(d.form.platform, "Shop");
    assert_eq!(d.toast_message(), Some("You must be logged in to do that"));
    assert_eq!(d.total(), 3);
}
