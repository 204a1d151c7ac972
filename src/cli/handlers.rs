use anyhow::{anyhow, bail, Context, Result};
use inquire::{Confirm, Password, Text};
use secrecy::ExposeSecret;
use serde_json::json;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::auth::persist::{clear_session, load_session, save_session};
use crate::auth::{LoginForm, Session, SignUpForm, SignUpOutcome};
use crate::config::Config;
use crate::context::Services;
use crate::credentials::{Credential, CredentialForm, CredentialId};
use crate::passwords::{check_password_strength, generate_strong_password, hash_password};

pub(crate) struct AddArgs {
    pub platform: Option<String>,
    pub username: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub generate: bool,
    pub password: Option<String>,
}

pub(crate) struct EditArgs {
    pub platform: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub generate: bool,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Same rule as the dashboard filter: lowercase, untrimmed substring.
fn retain_matching(rows: &mut Vec<Credential>, query: &str) {
    let q = query.to_lowercase();
    rows.retain(|c| c.matches(&q));
}

/// `PASSDECK_PASSWORD` wins over the hidden prompt.
fn read_password(prompt: &str) -> Result<String> {
    if let Ok(pw) = env::var("PASSDECK_PASSWORD") {
        return Ok(pw);
    }
    Ok(Password::new(prompt).without_confirmation().prompt()?)
}

fn read_text(prompt: &str, given: Option<String>) -> Result<String> {
    match given {
        Some(v) => Ok(v),
        None => Ok(Text::new(prompt).prompt()?),
    }
}

pub(crate) fn handle_generate(length: usize) -> Result<()> {
    println!("{}", generate_strong_password(length));
    Ok(())
}

pub(crate) fn handle_strength(password: &str) -> Result<()> {
    let s = check_password_strength(password);
    println!("Score: {}/6", s.score);
    for line in &s.feedback {
        println!("  • {line}");
    }
    Ok(())
}

pub(crate) fn handle_hash(password: &str) -> Result<()> {
    let phc = hash_password(password)?;
    println!("{phc}");
    Ok(())
}

pub(crate) struct Handlers {
    services: Services,
    session_path: Option<PathBuf>,
    generator_length: usize,
}

impl Handlers {
    pub fn new(config: &Config, services: Services) -> Self {
        // Offline sessions only live as long as the in-memory backend.
        let session_path = (!config.offline).then(|| config.session_path.clone());
        Self {
            services,
            session_path,
            generator_length: config.generator_length,
        }
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        match &self.session_path {
            Some(path) => self.services.resume_session(path).await,
            None => Ok(None),
        }
    }

    async fn require_session(&self) -> Result<Session> {
        self.current_session()
            .await?
            .ok_or_else(|| anyhow!("You must be logged in to do that. Run `passdeck login` first."))
    }

    fn remember(&self, session: &Session) -> Result<()> {
        if let Some(path) = &self.session_path {
            save_session(path, session).context("failed to cache session")?;
        }
        Ok(())
    }

    pub async fn handle_signup(&self, email: Option<String>) -> Result<()> {
        let email = read_text("Email", email)?;
        let (password, confirm) = match env::var("PASSDECK_PASSWORD") {
            Ok(pw) => (pw.clone(), pw),
            Err(_) => (
                Password::new("Password").without_confirmation().prompt()?,
                Password::new("Confirm password")
                    .without_confirmation()
                    .prompt()?,
            ),
        };
        let mut form = SignUpForm {
            email,
            password,
            confirm,
        };
        let outcome = self.services.auth.sign_up(&form).await;
        form.clear_secrets();
        match outcome.map_err(|e| anyhow!(e.user_message()))? {
            SignUpOutcome::SignedIn(session) => {
                self.remember(&session)?;
                info!(user = %session.user_id, "signed in");
                println!("✅ Account created. Logged in as {}", session.display_name());
            }
            SignUpOutcome::ConfirmationSent => {
                println!("📧 Check your email to confirm your account, then run `passdeck login`.");
            }
        }
        Ok(())
    }

    pub async fn handle_login(&self, email: Option<String>) -> Result<()> {
        let email = read_text("Email", email)?;
        let mut form = LoginForm {
            email,
            password: read_password("Password")?,
        };
        let result = self.services.auth.log_in(&form).await;
        form.clear_secrets();
        let session = result.map_err(|e| anyhow!(e.user_message()))?;
        self.remember(&session)?;
        info!(user = %session.user_id, "signed in");
        println!("✅ Logged in as {}", session.display_name());
        Ok(())
    }

    pub async fn handle_reset(&self, email: &str) -> Result<()> {
        self.services
            .auth
            .reset_password(email)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        println!("📧 Password reset email sent to {email}");
        Ok(())
    }

    pub fn handle_oauth(&self) -> Result<()> {
        let url = self
            .services
            .auth
            .google_url()
            .map_err(|e| anyhow!(e.user_message()))?;
        println!("Open this URL in your browser to continue:\n{url}");
        Ok(())
    }

    pub async fn handle_logout(&self) -> Result<()> {
        let Some(path) = &self.session_path else {
            println!("Not logged in.");
            return Ok(());
        };
        match load_session(path)? {
            Some(session) => {
                if let Err(e) = self.services.auth.log_out(&session).await {
                    warn!(error = %e, "sign-out request failed");
                }
                clear_session(path)?;
                info!(user = %session.user_id, "signed out");
                println!("🔒 Logged out.");
            }
            None => println!("Not logged in."),
        }
        Ok(())
    }

    pub async fn handle_whoami(&self) -> Result<()> {
        match self.current_session().await? {
            Some(s) => println!("{} ({})", s.display_name(), s.user_id),
            None => println!("Not logged in."),
        }
        Ok(())
    }

    pub async fn handle_list(&self, query: Option<String>, json_mode: bool, reveal: bool) -> Result<()> {
        let session = self.require_session().await?;
        let mut rows = self.services.credentials.fetch(Some(&session)).await?;
        if let Some(q) = query {
            retain_matching(&mut rows, &q);
        }

        if json_mode {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|c| {
                    let mut v = json!({
                        "id": c.id.as_str(),
                        "platform": c.platform,
                        "username": c.username,
                        "url": c.url,
                        "notes": c.notes,
                    });
                    if reveal {
                        v["password"] = json!(c.password.expose_secret());
                    }
                    v
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        if rows.is_empty() {
            println!("(empty)");
            return Ok(());
        }
        for c in rows {
            let url = c.url.as_deref().unwrap_or("");
            if reveal {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    c.id,
                    c.platform,
                    c.username,
                    c.password.expose_secret(),
                    url
                );
            } else {
                println!("{}\t{}\t{}\t{}", c.id, c.platform, c.username, url);
            }
        }
        Ok(())
    }

    fn fresh_password(&self) -> String {
        let generated = generate_strong_password(self.generator_length);
        let s = check_password_strength(&generated);
        println!("🔒 Generated password strength: {}/6", s.score);
        generated
    }

    pub async fn handle_add(&self, args: AddArgs) -> Result<()> {
        let session = self.require_session().await?;
        let platform = read_text("Platform", args.platform)?;
        let username = read_text("Username", args.username)?;
        let password = if args.generate {
            self.fresh_password()
        } else {
            match args.password {
                Some(p) => p,
                None => read_password("Password")?,
            }
        };
        let mut form = CredentialForm {
            platform,
            username,
            password,
            url: args.url.unwrap_or_default(),
            notes: args.notes.unwrap_or_default(),
        };
        let saved = self.services.credentials.save(Some(&session), &form).await;
        form.clear();
        let saved = saved?;
        println!("✅ Credential saved ({}).", saved.id);
        Ok(())
    }

    async fn find(&self, session: &Session, id: &CredentialId) -> Result<Option<Credential>> {
        let rows = self.services.credentials.fetch(Some(session)).await?;
        Ok(rows.into_iter().find(|c| &c.id == id))
    }

    pub async fn handle_edit(&self, id: &str, args: EditArgs) -> Result<()> {
        let session = self.require_session().await?;
        let id = CredentialId::new(id);
        let Some(current) = self.find(&session, &id).await? else {
            bail!("No credential found with id '{id}'");
        };
        let mut form = CredentialForm::from_credential(&current);
        if let Some(v) = args.platform {
            form.platform = v;
        }
        if let Some(v) = args.username {
            form.username = v;
        }
        if args.generate {
            form.password = self.fresh_password();
        } else if let Some(v) = args.password {
            form.password = v;
        }
        if let Some(v) = args.url {
            form.url = v;
        }
        if let Some(v) = args.notes {
            form.notes = v;
        }
        let result = self.services.credentials.update(Some(&session), &id, &form).await;
        form.clear();
        result?;
        println!("✅ Credential updated.");
        Ok(())
    }

    pub async fn handle_rm(&self, id: &str, yes: bool) -> Result<()> {
        let session = self.require_session().await?;
        let id = CredentialId::new(id);
        let Some(current) = self.find(&session, &id).await? else {
            println!("❌ No credential found with id '{id}'");
            return Ok(());
        };

        if !yes {
            let msg = format!("Delete '{} ({})' ?", current.platform, current.username);
            let proceed = Confirm::new(&msg).with_default(false).prompt()?;
            if !proceed {
                println!("❎ Deletion cancelled.");
                return Ok(());
            }
        }

        self.services.credentials.delete(Some(&session), &id).await?;
        println!("🗑️ Credential removed.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn row(platform: &str) -> Credential {
        Credential {
            id: CredentialId::new(platform),
            user_id: "u1".into(),
            platform: platform.into(),
            username: "me".into(),
            password: SecretString::new("x".into()),
            url: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn list_query_is_not_trimmed() {
        let mut rows = vec![row("Work Mail"), row("Workshop")];
        retain_matching(&mut rows, "WORK ");
        let names: Vec<_> = rows.iter().map(|c| c.platform.as_str()).collect();
        assert_eq!(names, vec!["Work Mail"]);

        let mut rows = vec![row("Work Mail"), row("Workshop")];
        retain_matching(&mut rows, "  ");
        assert!(rows.is_empty());
    }
}
