//! Shared configuration for wserest tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `wserest_api::Settings`. The CLI adds flag-aware
//! overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wserest_api::settings::{DEFAULT_HOST, DEFAULT_SERVER_INSTANCE, DEFAULT_VHOST_INSTANCE};
use wserest_api::{AuthMethod, Settings, TlsMode, TransportConfig};

const KEYRING_SERVICE: &str = "wserest";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for user '{username}' in profile '{profile}'")]
    NoCredentials { profile: String, username: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: explicit choice, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named Streaming Engine profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// REST base URL (e.g., "http://wse.example.com:8087/v2").
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_server_instance")]
    pub server_instance: String,

    #[serde(default = "default_vhost_instance")]
    pub vhost_instance: String,

    /// Username for basic auth. No username means no authentication.
    pub username: Option<String>,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            server_instance: default_server_instance(),
            vhost_instance: default_vhost_instance(),
            username: None,
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_server_instance() -> String {
    DEFAULT_SERVER_INSTANCE.into()
}
fn default_vhost_instance() -> String {
    DEFAULT_VHOST_INSTANCE.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wserest", "wserest").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wserest");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
///
/// A missing file yields the defaults; an unreadable or malformed one is an
/// error.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file path, layered with `WSE_` env vars.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WSE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the auth method for a profile.
///
/// No username means no authentication. With a username the password is
/// looked up in order: `password_env`, `WSE_PASSWORD`, system keyring,
/// plaintext in config.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthMethod, ConfigError> {
    let Some(username) = profile.username.clone() else {
        return Ok(AuthMethod::None);
    };

    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(basic(username, val));
        }
    }

    // 2. Global env var
    if let Ok(pw) = std::env::var("WSE_PASSWORD") {
        return Ok(basic(username, pw));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(basic(username, pw));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(basic(username, pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        username,
    })
}

fn basic(username: String, password: String) -> AuthMethod {
    AuthMethod::Basic {
        username,
        password: SecretString::from(password),
    }
}

/// Store a profile password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Validation {
            field: "password".into(),
            reason: format!("keyring error: {e}"),
        })
}

// ── Profile → Settings ──────────────────────────────────────────────

/// Build API `Settings` from a profile, falling back to `defaults` for
/// TLS and timeout.
pub fn profile_to_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<Settings, ConfigError> {
    let url: url::Url = profile.host.parse().map_err(|_| ConfigError::Validation {
        field: "host".into(),
        reason: format!("invalid URL: {}", profile.host),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let auth = resolve_auth(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(Settings::new(profile.host.as_str())
        .with_server_instance(&profile.server_instance)
        .with_vhost_instance(&profile.vhost_instance)
        .with_auth(auth)
        .with_transport(TransportConfig::default().with_tls(tls).with_timeout(timeout)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn profile_without_username_has_no_auth() {
        let auth = resolve_auth(&Profile::default(), "default").unwrap();
        assert!(matches!(auth, AuthMethod::None));
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let profile = Profile {
            username: Some("admin".into()),
            password: Some("pw".into()),
            password_env: Some("WSEREST_TEST_UNSET_PASSWORD_VAR".into()),
            ..Profile::default()
        };
        let auth = resolve_auth(&profile, "wserest-test-no-keyring-entry").unwrap();
        match auth {
            AuthMethod::Basic { username, .. } => assert_eq!(username, "admin"),
            AuthMethod::None => panic!("expected basic auth"),
        }
    }

    #[test]
    fn settings_follow_profile() {
        let profile = Profile {
            host: "https://wse.example.com:8087/v2/".into(),
            server_instance: "edge".into(),
            vhost_instance: String::new(),
            insecure: Some(true),
            timeout: Some(5),
            ..Profile::default()
        };
        let settings = profile_to_settings(&profile, "edge", &Defaults::default()).unwrap();
        assert_eq!(
            settings.vhost_uri(),
            "https://wse.example.com:8087/v2/servers/edge/vhosts/_defaultVHost_"
        );
        assert_eq!(settings.transport().tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(settings.transport().timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let profile = Profile {
            host: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_settings(&profile, "bad", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "host"));
    }

    #[test]
    fn active_profile_prefers_explicit_choice() {
        let cfg = Config {
            default_profile: Some("prod".into()),
            ..Config::default()
        };
        assert_eq!(cfg.active_profile_name(Some("lab")), "lab");
        assert_eq!(cfg.active_profile_name(None), "prod");
    }
}
