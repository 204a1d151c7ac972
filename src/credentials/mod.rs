pub mod form;
pub mod memory;
pub mod models;
pub mod ports;
pub mod rest;
pub mod service;

pub use form::{CredentialForm, ValidationError};
pub use models::{Credential, CredentialChanges, CredentialId, NewCredential};
pub use ports::{CredentialStore, StoreError};
pub use service::{CredentialService, ServiceError};
