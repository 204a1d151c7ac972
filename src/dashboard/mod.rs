pub mod controller;

pub use controller::{Dashboard, FormField, Mode, PendingAction, View};

use crate::auth::session::Session;
use crate::credentials::{CredentialService, ServiceError};

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Execute a dashboard action against the store, then feed the outcome back
/// and re-fetch the full list on success.
pub async fn run_pending(
    dashboard: &mut Dashboard,
    service: &CredentialService,
    session: Option<&Session>,
    action: PendingAction,
) -> Result<(), ServiceError> {
    let result = match &action {
        PendingAction::Insert(form) => service.save(session, form).await.map(|_| ()),
        PendingAction::Update { id, form } => service.update(session, id, form).await,
        PendingAction::Delete(id) => service.delete(session, id).await,
    };
    match result {
        Ok(()) => {
            dashboard.complete(Ok(()));
            refresh(dashboard, service, session).await
        }
        Err(e) => {
            dashboard.complete(Err(e.to_string()));
            Err(e)
        }
    }
}

/// Replace the list with a fresh fetch; failures are surfaced as a toast.
pub async fn refresh(
    dashboard: &mut Dashboard,
    service: &CredentialService,
    session: Option<&Session>,
) -> Result<(), ServiceError> {
    match service.fetch(session).await {
        Ok(rows) => {
            dashboard.replace_credentials(rows);
            Ok(())
        }
        Err(e) => {
            dashboard.toast(failure_message(&e.to_string()));
            Err(e)
        }
    }
}

pub(crate) fn failure_message(reason: &str) -> String {
    if reason.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        reason.to_string()
    }
}
