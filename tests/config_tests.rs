use passdeck::config::{Config, ConfigError, ConfigOverrides, ThemeMode};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const VARS: [&str; 8] = [
    "PASSDECK_URL",
    "PASSDECK_ANON_KEY",
    "PASSDECK_TABLE",
    "PASSDECK_THEME",
    "PASSDECK_GEN_LENGTH",
    "PASSDECK_REDIRECT_URL",
    "PASSDECK_CONFIG_DIR",
    "PASSDECK_DATA_DIR",
];

fn isolate(root: &Path) {
    for v in VARS {
        env::remove_var(v);
    }
    env::set_var("HOME", root);
    env::set_var("PASSDECK_CONFIG_DIR", root.join("cfg"));
    env::set_var("PASSDECK_DATA_DIR", root.join("data"));
}

fn write_config_file(root: &Path, content: &str) {
    let dir = root.join("cfg").join("passdeck");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join("config.toml"), content).expect("write config file");
}

#[test]
#[serial]
fn defaults_without_file_or_env() {
    let td = tempdir().unwrap();
    isolate(td.path());
    let cfg = Config::create(ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.table, "passwords");
    assert_eq!(cfg.theme, ThemeMode::Dark);
    assert_eq!(cfg.generator_length, 16);
    assert!(cfg.backend_url.is_none());
    assert_eq!(
        cfg.session_path,
        td.path().join("data").join("passdeck").join("session.ron")
    );
    assert!(matches!(cfg.backend(), Err(ConfigError::MissingBackend)));
}

#[test]
#[serial]
fn backend_precedence_cli_over_env_over_file() {
    let td = tempdir().unwrap();
    isolate(td.path());
    write_config_file(
        td.path(),
        "backend_url = \"https://file.example.co\"\nanon_key = \"file-key\"\ntable = \"vault\"\n",
    );

    let cfg = Config::create(ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.backend_url.as_deref(), Some("https://file.example.co"));
    assert_eq!(cfg.table, "vault");

    env::set_var("PASSDECK_URL", "https://env.example.co");
    let cfg = Config::create(ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.backend_url.as_deref(), Some("https://env.example.co"));
    assert_eq!(cfg.anon_key.as_deref(), Some("file-key"));

    let cfg = Config::create(ConfigOverrides {
        backend_url: Some("https://cli.example.co".into()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(cfg.backend_url.as_deref(), Some("https://cli.example.co"));
    let (url, key) = cfg.backend().unwrap();
    assert_eq!(url.host_str(), Some("cli.example.co"));
    assert_eq!(key, "file-key");
    env::remove_var("PASSDECK_URL");
}

#[test]
#[serial]
fn theme_and_generator_from_env_beat_file() {
    let td = tempdir().unwrap();
    isolate(td.path());
    write_config_file(td.path(), "theme = \"light\"\ngenerator_length = 20\n");
    let cfg = Config::create(ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.theme, ThemeMode::Light);
    assert_eq!(cfg.generator_length, 20);

    env::set_var("PASSDECK_THEME", "dark");
    env::set_var("PASSDECK_GEN_LENGTH", "32");
    let cfg = Config::create(ConfigOverrides::default()).unwrap();
    assert_eq!(cfg.theme, ThemeMode::Dark);
    assert_eq!(cfg.generator_length, 32);

    env::set_var("PASSDECK_THEME", "sepia");
    assert!(matches!(
        Config::create(ConfigOverrides::default()),
        Err(ConfigError::InvalidTheme(_))
    ));
    env::remove_var("PASSDECK_THEME");
    env::remove_var("PASSDECK_GEN_LENGTH");
}

#[test]
#[serial]
fn invalid_backend_url_is_reported() {
    let td = tempdir().unwrap();
    isolate(td.path());
    let cfg = Config::create(ConfigOverrides {
        backend_url: Some("not a url".into()),
        anon_key: Some("k".into()),
        offline: false,
    })
    .unwrap();
    assert!(matches!(cfg.backend(), Err(ConfigError::InvalidUrl(_, _))));
}

#[test]
#[serial]
fn offline_needs_no_backend() {
    let td = tempdir().unwrap();
    isolate(td.path());
    let cfg = Config::create(ConfigOverrides {
        offline: true,
        ..Default::default()
    })
    .unwrap();
    assert!(passdeck::context::Services::from_config(&cfg).is_ok());
}
