#![allow(clippy::unwrap_used)]
// Config file round-trips through figment and toml.

use std::collections::HashMap;

use wserest_config::{Config, ConfigError, Profile, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.default_profile.as_deref(), Some("default"));
    assert_eq!(cfg.defaults.timeout, 30);
    assert!(cfg.profiles.is_empty());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[profiles.studio\nhost = ").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)), "{err:?}");
}

#[test]
fn profiles_are_read_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_profile = "studio"

[defaults]
timeout = 10

[profiles.studio]
host = "http://studio.local:8087/v2"
username = "admin"
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    let studio = &cfg.profiles["studio"];
    assert_eq!(cfg.default_profile.as_deref(), Some("studio"));
    assert_eq!(cfg.defaults.timeout, 10);
    assert_eq!(cfg.defaults.output, "table");
    assert_eq!(studio.host, "http://studio.local:8087/v2");
    assert_eq!(studio.server_instance, "_defaultServer_");
    assert_eq!(studio.username.as_deref(), Some("admin"));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut profiles = HashMap::new();
    profiles.insert(
        "lab".to_string(),
        Profile {
            host: "http://lab:8087/v2".into(),
            vhost_instance: "vh1".into(),
            ..Profile::default()
        },
    );
    let cfg = Config {
        default_profile: Some("lab".into()),
        profiles,
        ..Config::default()
    };

    save_config_to(&cfg, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.profiles["lab"].vhost_instance, "vh1");
    assert_eq!(loaded.profiles["lab"].host, "http://lab:8087/v2");
}
