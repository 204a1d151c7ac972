use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::credentials::rest::DEFAULT_TABLE;
use crate::passwords::DEFAULT_LENGTH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("backend not configured: set PASSDECK_URL and PASSDECK_ANON_KEY (or backend_url/anon_key in config.toml), or pass --offline")]
    MissingBackend,
    #[error("invalid backend url \"{0}\": {1}")]
    InvalidUrl(String, String),
    #[error("unknown theme \"{0}\" (expected dark or light)")]
    InvalidTheme(String),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ConfigError::InvalidTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub backend_url: Option<String>,
    pub anon_key: Option<String>,
    pub table: Option<String>,
    pub theme: Option<ThemeMode>,
    pub generator_length: Option<usize>,
    pub redirect_url: Option<String>,
    pub session_path: Option<String>,
}

/// Values supplied on the command line; they beat env and file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub anon_key: Option<String>,
    pub offline: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Option<String>,
    pub anon_key: Option<String>,
    pub table: String,
    pub theme: ThemeMode,
    pub generator_length: usize,
    pub redirect_url: Option<String>,
    pub session_path: PathBuf,
    pub offline: bool,
}

impl Config {
    pub fn create(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        // 1) Load config file if present
        let file_cfg = load_file_config();

        // 2) Backend: CLI > env > file
        let backend_url = overrides
            .backend_url
            .or_else(|| env::var("PASSDECK_URL").ok())
            .or(file_cfg.backend_url);
        let anon_key = overrides
            .anon_key
            .or_else(|| env::var("PASSDECK_ANON_KEY").ok())
            .or(file_cfg.anon_key);

        // 3) Table and redirect: env > file > default
        let table = env::var("PASSDECK_TABLE")
            .ok()
            .or(file_cfg.table)
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let redirect_url = env::var("PASSDECK_REDIRECT_URL")
            .ok()
            .or(file_cfg.redirect_url);

        // 4) Theme: env > file > dark
        let theme = match env::var("PASSDECK_THEME") {
            Ok(s) => s.parse()?,
            Err(_) => file_cfg.theme.unwrap_or_default(),
        };

        // 5) Generator length: env > file > 16
        let generator_length = env::var("PASSDECK_GEN_LENGTH")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .or(file_cfg.generator_length)
            .unwrap_or(DEFAULT_LENGTH);

        let session_path = file_cfg
            .session_path
            .map(PathBuf::from)
            .unwrap_or_else(default_session_path);

        Ok(Config {
            backend_url,
            anon_key,
            table,
            theme,
            generator_length,
            redirect_url,
            session_path,
            offline: overrides.offline,
        })
    }

    /// Parsed backend URL and API key, or why they are unusable.
    pub fn backend(&self) -> Result<(Url, String), ConfigError> {
        let (Some(raw), Some(key)) = (self.backend_url.as_deref(), self.anon_key.as_deref())
        else {
            return Err(ConfigError::MissingBackend);
        };
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
        Ok((url, key.to_string()))
    }
}

fn load_file_config() -> FileConfig {
    let (_, cfg) = load_file_config_with_path();
    cfg
}

pub fn load_file_config_with_path() -> (PathBuf, FileConfig) {
    // Allow tests/users to override config dir via PASSDECK_CONFIG_DIR; else use platform default
    let cfg_dir = if let Ok(p) = env::var("PASSDECK_CONFIG_DIR") {
        PathBuf::from(p)
    } else {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    let path = cfg_dir.join("passdeck").join("config.toml");
    let cfg = if let Ok(bytes) = std::fs::read(&path) {
        if let Ok(s) = String::from_utf8(bytes) {
            toml::from_str::<FileConfig>(&s).unwrap_or_default()
        } else {
            FileConfig::default()
        }
    } else {
        FileConfig::default()
    };
    (path, cfg)
}

fn default_session_path() -> PathBuf {
    // PASSDECK_DATA_DIR, then platform data_dir, then ~/.passdeck
    if let Ok(base) = env::var("PASSDECK_DATA_DIR") {
        return PathBuf::from(base).join("passdeck").join("session.ron");
    }
    if let Some(mut p) = dirs::data_dir() {
        p.push("passdeck");
        p.push("session.ron");
        return p;
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&home).join(".passdeck").join("session.ron")
}
