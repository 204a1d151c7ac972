//! Shared HTTP plumbing for the hosted backend (PostgREST + GoTrue).

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

const USER_AGENT: &str = concat!("passdeck/", env!("CARGO_PKG_VERSION"));

/// Base URL, public API key and a pooled client. Cheap to clone.
#[derive(Clone)]
pub struct Backend {
    base: Url,
    anon_key: SecretString,
    client: reqwest::Client,
}

impl Backend {
    pub fn new(base: Url, anon_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base: normalize_base(base),
            anon_key: SecretString::new(anon_key.into().into()),
            client,
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `path` is relative, e.g. `rest/v1/passwords`.
    pub fn endpoint(&self, path: &str) -> Url {
        // Joining a relative path onto a base that ends in '/' cannot fail.
        self.base
            .join(path.trim_start_matches('/'))
            .unwrap_or_else(|_| self.base.clone())
    }

    /// `apikey` plus a bearer token; the anon key stands in when signed out.
    pub fn headers(&self, bearer: Option<&SecretString>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let key = self.anon_key.expose_secret();
        if let Ok(v) = HeaderValue::from_str(key) {
            headers.insert("apikey", v);
        }
        let token = bearer.map(|t| t.expose_secret()).unwrap_or(key);
        if let Ok(mut v) = HeaderValue::from_str(&format!("Bearer {token}")) {
            v.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, v);
        }
        headers
    }
}

fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base
}

/// Pull a human-readable reason out of an error body. Both PostgREST and
/// GoTrue use JSON, with the reason under one of a few keys.
pub fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(Value::String(s)) = map.get(key) {
                if !s.trim().is_empty() {
                    return s.clone();
                }
            }
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let b = Backend::new(Url::parse("https://x.example.co/proxy").unwrap(), "anon");
        assert_eq!(
            b.endpoint("rest/v1/passwords").as_str(),
            "https://x.example.co/proxy/rest/v1/passwords"
        );
        let b = Backend::new(Url::parse("https://x.example.co").unwrap(), "anon");
        assert_eq!(
            b.endpoint("/auth/v1/signup").as_str(),
            "https://x.example.co/auth/v1/signup"
        );
    }

    #[test]
    fn headers_fall_back_to_anon_key() {
        let b = Backend::new(Url::parse("https://x.example.co").unwrap(), "anon");
        let h = b.headers(None);
        assert_eq!(h.get("apikey").unwrap(), "anon");
        assert_eq!(h.get("authorization").unwrap(), "Bearer anon");
        let tok = SecretString::new("user-token".into());
        let h = b.headers(Some(&tok));
        assert_eq!(h.get("authorization").unwrap(), "Bearer user-token");
    }

    #[test]
    fn error_message_prefers_known_keys() {
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message(r#"{"code":"42501","message":"permission denied"}"#),
            "permission denied"
        );
        assert_eq!(error_message("  bad gateway \n"), "bad gateway");
        assert_eq!(error_message(r#"{"msg":""}"#), r#"{"msg":""}"#);
    }
}
