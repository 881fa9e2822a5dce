// veilmail-client/src/config.rs
use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(feature = "reqwest")]
use crate::client::{ClientOptions, VeilMail};
#[cfg(feature = "reqwest")]
use veilmail_api::ReqwestClient;

pub const API_KEY_ENV: &str = "VEILMAIL_API_KEY";
pub const BASE_URL_ENV: &str = "VEILMAIL_BASE_URL";
pub const WEBHOOK_SECRET_ENV: &str = "VEILMAIL_WEBHOOK_SECRET";

#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// `veil_live_…` or `veil_test_…`
    #[serde(default)]
    pub api_key: String,
    /// Override for self-hosted or staging APIs
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Signing secret used by `webhook verify`
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

impl Config {
    /// Load from the per-user config file, creating it on first use
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default = Self::default();
            default.save_to(path)?;
            return Ok(default);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Environment variables win over the file
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = key;
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.base_url = Some(url);
        }
        if let Some(secret) = lookup(WEBHOOK_SECRET_ENV) {
            self.webhook_secret = Some(secret);
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        // Owner read/write only, the file holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("veilmail").join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn webhook_secret(&self) -> Result<&str> {
        self.webhook_secret.as_deref().ok_or_else(|| {
            anyhow!("Webhook secret not set. Run `veilmail setup` or set {WEBHOOK_SECRET_ENV}")
        })
    }

    #[cfg(feature = "reqwest")]
    pub fn client(&self) -> Result<VeilMail<ReqwestClient>> {
        if self.api_key.is_empty() {
            return Err(anyhow!(
                "API key not set. Run `veilmail setup` or set {API_KEY_ENV}"
            ));
        }

        let options = ClientOptions {
            base_url: self.base_url.clone(),
            timeout: self.timeout(),
        };
        Ok(VeilMail::with_options(&self.api_key, options)?)
    }
}
