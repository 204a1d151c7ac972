use secrecy::SecretString;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

use crate::credentials::models::{Credential, CredentialChanges, NewCredential};
use crate::passwords::{check_password_strength, PasswordStrength};
use secrecy::ExposeSecret;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{}", .0.feedback.join(". "))]
    WeakPassword(PasswordStrength),
}

/// Editable add/edit form contents. Empty `url`/`notes` mean "not set".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialForm {
    pub platform: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

impl fmt::Debug for CredentialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialForm")
            .field("platform", &self.platform)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}

/// A form that passed field checks and the strength gate.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    platform: String,
    username: String,
    password: SecretString,
    url: Option<String>,
    notes: Option<String>,
    pub strength: PasswordStrength,
}

fn optional(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

impl CredentialForm {
    pub fn from_credential(c: &Credential) -> Self {
        Self {
            platform: c.platform.clone(),
            username: c.username.clone(),
            password: c.password.expose_secret().to_string(),
            url: c.url.clone().unwrap_or_default(),
            notes: c.notes.clone().unwrap_or_default(),
        }
    }

    pub fn strength(&self) -> PasswordStrength {
        check_password_strength(&self.password)
    }

    /// Required fields first, then the strength gate.
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        if self.platform.trim().is_empty() {
            return Err(ValidationError::MissingField("Platform"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("Username"));
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        let strength = self.strength();
        if !strength.is_acceptable() {
            return Err(ValidationError::WeakPassword(strength));
        }
        Ok(ValidatedForm {
            platform: self.platform.trim().to_string(),
            username: self.username.trim().to_string(),
            password: SecretString::new(self.password.clone().into()),
            url: optional(&self.url),
            notes: optional(&self.notes),
            strength,
        })
    }

    pub fn clear(&mut self) {
        self.password.zeroize();
        self.platform.clear();
        self.username.clear();
        self.url.clear();
        self.notes.clear();
    }
}

impl ValidatedForm {
    pub fn into_new(self, user_id: &str) -> NewCredential {
        NewCredential {
            user_id: user_id.to_string(),
            platform: self.platform,
            username: self.username,
            password: self.password,
            url: self.url,
            notes: self.notes,
        }
    }

    pub fn into_changes(self) -> CredentialChanges {
        CredentialChanges {
            platform: self.platform,
            username: self.username,
            password: self.password,
            url: self.url,
            notes: self.notes,
        }
    }
}
