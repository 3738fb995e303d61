//! Configuration management
//!
//! Settings live in `settings.json` inside the app directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:8085", "timeoutSecs": 30 }
//! }
//! ```
//! Fields this crate does not manage are kept when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::marketplace::DEFAULT_TIMEOUT_SECS;

/// Backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8085";

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "GROCER_API_URL";
/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "GROCER_TIMEOUT_SECS";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Where a setting's effective value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Default,
    File,
    Env,
}

/// Grocer configuration (effective values after env overrides)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_url_source: Source,
    pub timeout_secs: u64,
    pub timeout_source: Source,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_url_source: Source::Default,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timeout_source: Source::Default,
        }
    }
}

fn read_settings(app_dir: &Path) -> Result<SettingsFile> {
    let settings_path = app_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {:?}", settings_path))?;
    // A hand-edited file that no longer parses falls back to defaults
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

/// Check that `url` is an absolute http(s) URL
pub fn validate_api_url(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url.trim()).with_context(|| format!("Invalid URL '{}'", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("API URL must use http or https, got '{}'", parsed.scheme());
    }
    Ok(())
}

impl Config {
    /// Load config from the app directory, then apply env overrides
    pub fn load(app_dir: &Path) -> Result<Self> {
        let raw = read_settings(app_dir)?;
        let mut config = Self::from_settings(&raw);
        config.apply_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )?;
        Ok(config)
    }

    fn from_settings(raw: &SettingsFile) -> Self {
        let mut config = Self::default();
        if let Some(url) = raw.api.base_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            config.api_url = url.to_string();
            config.api_url_source = Source::File;
        }
        if let Some(secs) = raw.api.timeout_secs.filter(|s| *s > 0) {
            config.timeout_secs = secs;
            config.timeout_source = Source::File;
        }
        config
    }

    fn apply_overrides(&mut self, url: Option<String>, timeout: Option<String>) -> Result<()> {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.api_url = url;
            self.api_url_source = Source::Env;
        }
        if let Some(timeout) = timeout.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            let secs: u64 = timeout
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_ENV))?;
            if secs == 0 {
                bail!("{} must be greater than zero", TIMEOUT_ENV);
            }
            self.timeout_secs = secs;
            self.timeout_source = Source::Env;
        }
        Ok(())
    }

    /// Change the backend URL
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        validate_api_url(url)?;
        self.api_url = url.trim().trim_end_matches('/').to_string();
        self.api_url_source = Source::File;
        Ok(())
    }

    /// Save config to the app directory
    ///
    /// Only values that came from the file (or were set through this
    /// struct) are written; env overrides are never persisted.
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let mut settings = read_settings(app_dir)?;

        if self.api_url_source == Source::File {
            settings.api.base_url = Some(self.api_url.clone());
        }
        if self.timeout_source == Source::File {
            settings.api.timeout_secs = Some(self.timeout_secs);
        }

        std::fs::create_dir_all(app_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(app_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::from_settings(&read_settings(dir.path()).unwrap());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_url_source, Source::Default);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_reads_file_values() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"api":{"baseUrl":"https://market.example","timeoutSecs":5}}"#,
        )
        .unwrap();

        let config = Config::from_settings(&read_settings(dir.path()).unwrap());
        assert_eq!(config.api_url, "https://market.example");
        assert_eq!(config.api_url_source, Source::File);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = Config::default();
        config
            .apply_overrides(Some("http://10.0.0.2:8085".into()), Some("12".into()))
            .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2:8085");
        assert_eq!(config.api_url_source, Source::Env);
        assert_eq!(config.timeout_secs, 12);

        assert!(config.apply_overrides(None, Some("soon".into())).is_err());
        assert!(config.apply_overrides(None, Some("0".into())).is_err());
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(Some("  ".into()), Some(String::new())).unwrap();
        assert_eq!(config.api_url_source, Source::Default);
        assert_eq!(config.timeout_source, Source::Default);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let config = Config::from_settings(&read_settings(dir.path()).unwrap());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"theme":"dark","api":{"baseUrl":"http://old","proxy":"socks5://x"}}"#,
        )
        .unwrap();

        let mut config = Config::from_settings(&read_settings(dir.path()).unwrap());
        config.set_api_url("https://new.example/").unwrap();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("settings.json")).unwrap())
                .unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["api"]["proxy"], "socks5://x");
        assert_eq!(saved["api"]["baseUrl"], "https://new.example");
    }

    #[test]
    fn test_env_override_not_persisted() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config
            .apply_overrides(Some("http://from-env".into()), None)
            .unwrap();
        config.save(dir.path()).unwrap();

        let saved = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(!saved.contains("from-env"));
    }

    #[test]
    fn test_set_api_url_rejects_bad_urls() {
        let mut config = Config::default();
        assert!(config.set_api_url("not a url").is_err());
        assert!(config.set_api_url("ftp://files.example").is_err());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
