// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SalesclipError};
use crate::models::ChannelLabels;
use crate::report::DEFAULT_TITLE;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Salesclip", "salesclip"));

pub const CONFIG_ENV: &str = "SALESCLIP_CONFIG";
pub const SHEETS_API_KEY_ENV: &str = "SALESCLIP_SHEETS_API_KEY";
pub const SHEETS_CREDENTIALS_ENV: &str = "SALESCLIP_SHEETS_CREDENTIALS";
pub const TELEGRAM_TOKEN_ENV: &str = "SALESCLIP_TELEGRAM_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub sheets: Option<SheetsConfig>,
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Also append log lines to this file.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    #[serde(default = "default_range")]
    pub range: String,
    pub api_key: Option<String>,
    /// Service-account key file; takes precedence over `api_key`.
    pub credentials_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub whitelist: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub online_label: String,
    pub partner_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let labels = ChannelLabels::default();
        Self {
            title: DEFAULT_TITLE.to_string(),
            online_label: labels.online,
            partner_label: labels.partner,
        }
    }
}

impl ReportConfig {
    pub fn channel_labels(&self) -> ChannelLabels {
        ChannelLabels {
            online: self.online_label.clone(),
            partner: self.partner_label.clone(),
        }
    }
}

fn default_range() -> String {
    "Sheet1!A:F".to_string()
}

/// `$SALESCLIP_CONFIG` if set, else `config.toml` in the platform config dir.
pub fn config_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        SalesclipError::Config("Could not determine platform-specific config dir".into())
    })?;
    Ok(proj.config_dir().join("config.toml"))
}

impl Config {
    /// Load from the default location. A missing file means an empty config.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            let mut cfg = Config::default();
            cfg.apply_env_overrides();
            return Ok(cfg);
        }
        Self::from_path(&path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SalesclipError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        cfg.apply_env_overrides();
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(SHEETS_API_KEY_ENV) {
            if let Some(sheets) = self.sheets.as_mut() {
                sheets.api_key = Some(key);
            }
        }
        if let Some(path) = std::env::var_os(SHEETS_CREDENTIALS_ENV) {
            if let Some(sheets) = self.sheets.as_mut() {
                sheets.credentials_file = Some(PathBuf::from(path));
            }
        }
        if let Ok(token) = std::env::var(TELEGRAM_TOKEN_ENV) {
            match self.telegram.as_mut() {
                Some(tg) => tg.token = token,
                None => {
                    self.telegram = Some(TelegramConfig {
                        token,
                        whitelist: Vec::new(),
                    })
                }
            }
        }
    }
}
