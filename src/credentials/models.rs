use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Store-assigned row identifier. PostgREST may hand back text (uuid) or a
/// bigint depending on the table, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CredentialId(String);

impl CredentialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CredentialId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => CredentialId(s),
            RawId::Int(n) => CredentialId(n.to_string()),
        })
    }
}

/// One saved secret as the store returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
    pub user_id: String,
    pub platform: String,
    pub username: String,
    #[serde(with = "crate::passwords::serde_secret::required")]
    pub password: SecretString,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Case-insensitive substring match on platform, username and notes.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.platform.to_lowercase().contains(needle)
            || self.username.to_lowercase().contains(needle)
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
    }
}

/// Insert payload. `user_id` is always the caller's session user.
#[derive(Debug, Clone, Serialize)]
pub struct NewCredential {
    pub user_id: String,
    pub platform: String,
    pub username: String,
    #[serde(with = "crate::passwords::serde_secret::required")]
    pub password: SecretString,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Update payload. Ownership is not editable.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialChanges {
    pub platform: String,
    pub username: String,
    #[serde(with = "crate::passwords::serde_secret::required")]
    pub password: SecretString,
    pub url: Option<String>,
    pub notes: Option<String>,
}
