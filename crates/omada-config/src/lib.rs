//! Shared configuration for the Omada CLI.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `omada_api::ClientConfig`. The CLI layers its flag overrides on top.

use std::collections::BTreeMap;
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

use omada_api::{ClientConfig, DEFAULT_PAGE_SIZE, DEFAULT_SITE, TlsMode, TokenPlacement, TransportConfig};

/// Prefix for environment overrides (`OMADA_DEFAULTS__TIMEOUT=60`).
pub const ENV_PREFIX: &str = "OMADA_";

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "OMADA_CONFIG";

/// Fallback username variable.
pub const USERNAME_ENV: &str = "OMADA_USERNAME";

/// Fallback password variable.
pub const PASSWORD_ENV: &str = "OMADA_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

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
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name, falling back to `default_profile`.
    pub fn profile<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, p)| (k.as_str(), p))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_true() -> bool {
    true
}
fn default_site() -> String {
    DEFAULT_SITE.into()
}

/// A named controller profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Controller root URL (e.g. "https://omada.local:8043").
    pub baseurl: String,

    /// Site display name.
    #[serde(default = "default_site")]
    pub site: String,

    /// Verify the controller's TLS certificate.
    #[serde(default = "default_true")]
    pub verify: bool,

    /// Emit warnings (insecure TLS, stripped settings).
    #[serde(default = "default_true")]
    pub warnings: bool,

    /// Turn on debug logging for this profile.
    #[serde(default)]
    pub verbose: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Plaintext password. Prefer `password_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Where the session token goes: "header", "query", or "both".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_placement: Option<TokenPlacement>,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl Profile {
    pub fn new(baseurl: impl Into<String>) -> Self {
        Self {
            baseurl: baseurl.into(),
            site: default_site(),
            verify: true,
            warnings: true,
            verbose: false,
            username: None,
            password: None,
            password_env: None,
            token_placement: None,
            ca_cert: None,
            timeout: None,
            page_size: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `OMADA_CONFIG`, then platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "omada", "omada").map_or_else(
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
    p.push("omada");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, then apply `OMADA_` environment overrides.
///
/// Nested keys use a double underscore: `OMADA_PROFILES__LAB__SITE=Lab`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve username + password from the profile and environment.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    resolve_credentials_with(profile, profile_name, |var| std::env::var(var).ok())
}

/// [`resolve_credentials`] with an injectable environment lookup.
///
/// Username: profile, then `OMADA_USERNAME`. Password: the variable named
/// by `password_env`, then `OMADA_PASSWORD`, then plaintext.
pub fn resolve_credentials_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(String, SecretString), ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let username = profile
        .username
        .clone()
        .or_else(|| env(USERNAME_ENV))
        .ok_or_else(no_credentials)?;

    let password = profile
        .password_env
        .as_deref()
        .and_then(&env)
        .or_else(|| env(PASSWORD_ENV))
        .or_else(|| profile.password.clone())
        .ok_or_else(no_credentials)?;

    Ok((username, SecretString::from(password)))
}

/// Build a `ClientConfig` from a profile, with no CLI flag overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let url: url::Url = profile
        .baseurl
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "baseurl".into(),
            reason: format!("invalid URL: {}", profile.baseurl),
        })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "baseurl".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }

    let tls = match (&profile.ca_cert, profile.verify) {
        (_, false) => TlsMode::DangerAcceptInvalid,
        (Some(ca), true) => TlsMode::CustomCa(ca.clone()),
        (None, true) => TlsMode::System,
    };

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        warnings: profile.warnings,
        cookie_jar: None,
    };

    Ok(ClientConfig {
        base_url: url,
        site: profile.site.clone(),
        transport,
        token_placement: profile.token_placement.unwrap_or_default(),
        page_size: profile.page_size.unwrap_or(defaults.page_size).max(1),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
timeout = 45

[profiles.lab]
baseurl = "https://omada.lab:8043"
verify = false
username = "admin"
password_env = "LAB_PW"
token_placement = "header"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        let (name, profile) = cfg.profile(None).unwrap();

        assert_eq!(name, "lab");
        assert_eq!(profile.site, "Default");
        assert!(!profile.verify);
        assert!(profile.warnings);
        assert_eq!(profile.token_placement, Some(TokenPlacement::Header));
        assert_eq!(cfg.defaults.timeout, 45);
        assert_eq!(cfg.defaults.page_size, 10);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults, Defaults::default());
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn unknown_profile() {
        let cfg = Config::default();
        let err = cfg.profile(Some("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { ref name } if name == "nope"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        let mut profile = Profile::new("https://10.0.0.5:8043");
        profile.username = Some("ops".into());
        cfg.profiles.insert("default".into(), profile);

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.profiles, cfg.profiles);
    }

    #[test]
    fn password_env_wins_over_plaintext() {
        let mut profile = Profile::new("https://omada.local");
        profile.username = Some("admin".into());
        profile.password = Some("plain".into());
        profile.password_env = Some("SITE_PW".into());

        let env = |var: &str| match var {
            "SITE_PW" => Some("from-env".to_owned()),
            PASSWORD_ENV => Some("generic".to_owned()),
            _ => None,
        };
        let (user, pw) = resolve_credentials_with(&profile, "default", env).unwrap();
        assert_eq!(user, "admin");
        assert_eq!(pw.expose_secret(), "from-env");
    }

    #[test]
    fn generic_password_env_before_plaintext() {
        let mut profile = Profile::new("https://omada.local");
        profile.username = Some("admin".into());
        profile.password = Some("plain".into());

        let env = |var: &str| (var == PASSWORD_ENV).then(|| "generic".to_owned());
        let (_, pw) = resolve_credentials_with(&profile, "default", env).unwrap();
        assert_eq!(pw.expose_secret(), "generic");

        let (_, pw) = resolve_credentials_with(&profile, "default", no_env).unwrap();
        assert_eq!(pw.expose_secret(), "plain");
    }

    #[test]
    fn missing_username_is_no_credentials() {
        let mut profile = Profile::new("https://omada.local");
        profile.password = Some("plain".into());
        let err = resolve_credentials_with(&profile, "lab", no_env).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "lab"));
    }

    #[test]
    fn client_config_from_profile() {
        let mut profile = Profile::new("https://omada.local:8043");
        profile.verify = false;
        profile.page_size = Some(0);
        let config = profile_to_client_config(&profile, &Defaults::default()).unwrap();

        assert_eq!(config.base_url.as_str(), "https://omada.local:8043/");
        assert_eq!(config.transport.tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(config.transport.timeout, Duration::from_secs(30));
        assert_eq!(config.token_placement, TokenPlacement::Both);
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn rejects_non_http_baseurl() {
        let profile = Profile::new("ftp://omada.local");
        let err = profile_to_client_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
