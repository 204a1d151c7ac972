//! Session cache between CLI runs: a RON envelope carrying its own expiry.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::auth::session::Session;
use crate::filesystem::secure::write_private;

/// Used when the provider did not report an expiry.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct SessionEnvelope {
    expires_at_unix: i64,
    session: Session,
}

pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    let expires_at_unix = session
        .expires_at
        .unwrap_or_else(|| Utc::now().timestamp() + DEFAULT_SESSION_TTL_SECS);
    let mut session = session.clone();
    session.expires_at.get_or_insert(expires_at_unix);
    let envelope = SessionEnvelope {
        expires_at_unix,
        session,
    };
    let ron = ron::to_string(&envelope).context("failed to serialize session")?;
    write_private(path, ron.as_bytes())
}

/// Stored session, or `None` when there is none, it is corrupt, or it has
/// expired. Expired envelopes that still hold a refresh token are returned so
/// the caller can renew them.
pub fn load_session(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).context("Failed to read session file")?;
    let content = String::from_utf8_lossy(&bytes);

    let envelope: SessionEnvelope = match ron::from_str(&content) {
        Ok(v) => v,
        Err(_) => {
            // Corrupt or invalid format; clear it
            let _ = fs::remove_file(path);
            return Ok(None);
        }
    };

    if Utc::now().timestamp() >= envelope.expires_at_unix && envelope.session.refresh_token.is_none() {
        let _ = fs::remove_file(path);
        return Ok(None);
    }

    Ok(Some(envelope.session))
}

pub fn clear_session(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).context("Failed to remove session file")?;
    }
    Ok(())
}
