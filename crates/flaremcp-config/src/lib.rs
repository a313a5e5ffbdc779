//! Configuration for the flaremcp server.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `flaremcp_api` credentials. Profiles let one
//! machine talk to several Cloudflare accounts; the common case is a
//! single `default` profile or just `CLOUDFLARE_API_TOKEN` in the
//! environment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use flaremcp_api::{Credentials, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
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

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Auth mode: "token" (scoped API token) or "key" (global key + email).
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    /// API token (plaintext — prefer keyring or env var).
    pub api_token: Option<String>,

    /// Environment variable name containing the API token.
    pub api_token_env: Option<String>,

    /// Global API key (plaintext — prefer keyring or env var).
    pub api_key: Option<String>,

    /// Account email, required for "key" auth.
    pub email: Option<String>,

    /// Override the API base URL (testing / gateways).
    pub base_url: Option<String>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_auth_mode() -> String {
    "token".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "flaremcp", "flaremcp").map_or_else(
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
    p.push("flaremcp");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("FLAREMCP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an API token from the credential chain.
pub fn resolve_api_token(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Canonical env var
    if let Ok(token) = std::env::var("CLOUDFLARE_API_TOKEN") {
        return Ok(SecretString::from(token));
    }

    // 2. Profile's api_token_env → env var lookup
    if let Some(ref env_name) = profile.api_token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("flaremcp", &format!("{profile_name}/api-token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref token) = profile.api_token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve global-key credentials (key + email).
pub fn resolve_api_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<(SecretString, String), ConfigError> {
    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var("CLOUDFLARE_EMAIL").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Env var
    if let Ok(key) = std::env::var("CLOUDFLARE_API_KEY") {
        return Ok((SecretString::from(key), email));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new("flaremcp", &format!("{profile_name}/api-key")) {
        if let Ok(key) = entry.get_password() {
            return Ok((SecretString::from(key), email));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok((SecretString::from(key.clone()), email));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `Credentials` from a profile's `auth_mode` field.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    match profile.auth_mode.as_str() {
        "token" => {
            let token = resolve_api_token(profile, profile_name)?;
            Ok(Credentials::ApiToken { token })
        }
        "key" => {
            let (key, email) = resolve_api_key(profile, profile_name)?;
            Ok(Credentials::ApiKey { key, email })
        }
        other => Err(ConfigError::Validation {
            field: "auth_mode".into(),
            reason: format!("expected 'token' or 'key', got '{other}'"),
        }),
    }
}

/// Build a `TransportConfig` from a profile plus global defaults.
pub fn profile_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    TransportConfig {
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_auth_mode_is_rejected() {
        let profile = Profile {
            auth_mode: "oauth".into(),
            ..Profile::default()
        };

        let err = resolve_auth(&profile, "default").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "auth_mode"));
    }

    #[test]
    fn key_auth_requires_email() {
        let profile = Profile {
            auth_mode: "key".into(),
            api_key: Some("abc123".into()),
            email: None,
            ..Profile::default()
        };

        // No email in profile (and none expected in the test env).
        if std::env::var("CLOUDFLARE_EMAIL").is_ok() {
            return;
        }
        let err = resolve_api_key(&profile, "default").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn profile_timeout_overrides_defaults() {
        let profile = Profile {
            timeout: Some(5),
            ..Profile::default()
        };
        let defaults = Defaults { timeout: 30 };

        let transport = profile_transport(&profile, &defaults);
        assert_eq!(transport.timeout, Duration::from_secs(5));

        let transport = profile_transport(&Profile::default(), &defaults);
        assert_eq!(transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "work".into(),
            Profile {
                auth_mode: "token".into(),
                api_token_env: Some("CF_WORK_TOKEN".into()),
                ..Profile::default()
            },
        );

        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.default_profile.as_deref(), Some("default"));
        let work = &parsed.profiles["work"];
        assert_eq!(work.auth_mode, "token");
        assert_eq!(work.api_token_env.as_deref(), Some("CF_WORK_TOKEN"));
    }
}
