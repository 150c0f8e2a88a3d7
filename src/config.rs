// src/config.rs
//! Credentials and facilitator transport settings.
//!
//! Secrets come only from the environment. Transport settings are layered:
//! defaults, then an optional TOML file, then env overrides.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};

// --- env names & defaults ---
pub const ENV_API_KEY_ID: &str = "CDP_API_KEY_ID";
pub const ENV_API_KEY_SECRET: &str = "CDP_API_KEY_SECRET";
pub const ENV_CONFIG_PATH: &str = "X402_FACILITATOR_CONFIG_PATH";
pub const ENV_FACILITATOR_URL: &str = "X402_FACILITATOR_URL";
pub const ENV_TIMEOUT_SECS: &str = "X402_FACILITATOR_TIMEOUT_SECS";

pub const DEFAULT_CONFIG_PATH: &str = "config/facilitator.toml";
pub const DEFAULT_FACILITATOR_URL: &str = "https://api.cdp.coinbase.com/platform/v2/x402";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("x402-discovery/", env!("CARGO_PKG_VERSION"));

/// API key pair used to authenticate against the facilitator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_id: String,
    key_secret: String,
}

impl Credentials {
    /// Both parts must be non-empty; whitespace-only counts as empty.
    /// Values are stored exactly as supplied.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Result<Self> {
        let key_id = key_id.into();
        let key_secret = key_secret.into();
        let mut missing = Vec::new();
        if key_id.trim().is_empty() {
            missing.push(ENV_API_KEY_ID);
        }
        if key_secret.trim().is_empty() {
            missing.push(ENV_API_KEY_SECRET);
        }
        if !missing.is_empty() {
            return Err(DiscoveryError::config(format!(
                "missing required credentials: {}",
                missing.join(" and ")
            )));
        }
        Ok(Self { key_id, key_secret })
    }

    /// Read `CDP_API_KEY_ID` / `CDP_API_KEY_SECRET`. Does not load `.env`; the
    /// binary does that once at startup.
    pub fn from_env() -> Result<Self> {
        let id = std::env::var(ENV_API_KEY_ID).unwrap_or_default();
        let secret = std::env::var(ENV_API_KEY_SECRET).unwrap_or_default();
        Self::new(id, secret)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn key_secret(&self) -> &str {
        &self.key_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("key_secret", &format_args!("<redacted {} bytes>", self.key_secret.len()))
            .finish()
    }
}

/// Where and how to reach the facilitator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilitatorConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FacilitatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FACILITATOR_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// On-disk shape of `config/facilitator.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl FacilitatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Apply a TOML settings file on top of the current values.
    pub fn merge_file(mut self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DiscoveryError::config(format!("reading {}: {e}", path.display()))
        })?;
        let file: FileSettings = toml::from_str(&content).map_err(|e| {
            DiscoveryError::config(format!("parsing {}: {e}", path.display()))
        })?;
        if let Some(url) = file.url {
            self.base_url = url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(ua) = file.user_agent {
            self.user_agent = ua;
        }
        Ok(self)
    }

    /// Apply `X402_FACILITATOR_URL` / `X402_FACILITATOR_TIMEOUT_SECS` when set.
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var(ENV_FACILITATOR_URL) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DiscoveryError::config(format!("{ENV_TIMEOUT_SECS} is not a number: {raw:?}"))
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Layered load:
    /// 1) defaults
    /// 2) $X402_FACILITATOR_CONFIG_PATH (must exist) or config/facilitator.toml (if present)
    /// 3) env overrides
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(DiscoveryError::config(format!(
                    "{ENV_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                )));
            }
            cfg = cfg.merge_file(&pb)?;
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                cfg = cfg.merge_file(&default_p)?;
            }
        }
        cfg.merge_env()
    }
}
