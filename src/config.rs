//! User configuration.
//!
//! Stored as YAML in the platform config directory
//! (`~/.config/drill/config.yaml` on Linux) and includes:
//! - The exam backend's base URL
//! - The bearer token for the signed-in user
//! - Request timeout and the pass mark shown in progress output
//!
//! `DRILL_CONFIG` points at an alternative file. `DRILL_API_URL` and
//! `DRILL_TOKEN` take precedence over the file's values.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};

pub const CONFIG_PATH_ENV: &str = "DRILL_CONFIG";
pub const API_URL_ENV: &str = "DRILL_API_URL";
pub const TOKEN_ENV: &str = "DRILL_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the exam backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Authentication
    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Passing score in percent (default: 75)
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u8,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pass_mark() -> u8 {
    75
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth: AuthConfig::default(),
            request_timeout: default_request_timeout(),
            pass_mark: default_pass_mark(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthConfig {
    fn is_empty(&self) -> bool {
        self.token.is_none()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Path of the config file, honoring `DRILL_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "drill")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or_else(|| {
                DrillError::Config("could not determine a configuration directory".to_string())
            })
    }

    /// Load configuration from file, or return defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DrillError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DrillError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            DrillError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // The file holds a bearer token: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Backend base URL from environment or config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }
        self.api_url.clone()
    }

    /// Bearer token from environment or config file
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some(token);
        }
        self.auth.token.clone().filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: String) {
        self.auth.token = Some(token);
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Sets `key` from its string form. Returns the canonical key name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<&'static str> {
        match key {
            "api_url" => {
                let parsed = url::Url::parse(value).map_err(|e| {
                    DrillError::Config(format!("invalid value '{value}' for api_url: {e}"))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(DrillError::Config(format!(
                        "api_url must be an http or https URL, got '{value}'"
                    )));
                }
                self.api_url = value.trim_end_matches('/').to_string();
                Ok("api_url")
            }
            "auth.token" => {
                self.set_token(value.to_string());
                Ok("auth.token")
            }
            "request_timeout" => {
                self.request_timeout = value.parse::<u64>().map_err(|_| {
                    DrillError::Config(format!(
                        "invalid value '{value}' for request_timeout. Expected seconds"
                    ))
                })?;
                Ok("request_timeout")
            }
            "pass_mark" => {
                let mark = value.parse::<u8>().ok().filter(|m| *m <= 100).ok_or_else(|| {
                    DrillError::Config(format!(
                        "invalid value '{value}' for pass_mark. Expected 0-100"
                    ))
                })?;
                self.pass_mark = mark;
                Ok("pass_mark")
            }
            "auth_token" | "auth-token" | "token" => Err(DrillError::Config(format!(
                "invalid config key '{key}'. Use: 'auth.token'"
            ))),
            _ => Err(DrillError::Config(format!(
                "unknown config key '{key}'. Valid keys: api_url, auth.token, request_timeout, pass_mark"
            ))),
        }
    }
}
