//! Site configuration (`waypoint.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use waypoint_observability::{LogFormat, LogLevel};

use crate::error::SiteError;

/// Default config file name.
pub const CONFIG_FILE: &str = "waypoint.toml";

/// Base URL of the public placeholder API.
pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Site configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub prerender: PrerenderSection,

    #[serde(default)]
    pub log: LogSection,
}

impl SiteConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.display().to_string(),
            source,
        })?;

        if is_json(path) {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, SiteError> {
        toml::from_str(content).map_err(|e| SiteError::Config(e.to_string()))
    }

    pub fn from_json(content: &str) -> Result<Self, SiteError> {
        serde_json::from_str(content).map_err(|e| SiteError::Config(e.to_string()))
    }

    /// Save config to a file, in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SiteError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| SiteError::Config(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| SiteError::Config(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|source| SiteError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), SiteError> {
        let base = self.api.base_url.as_str();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SiteError::Config(format!(
                "api.base_url must be an http(s) URL, got `{}`",
                base
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(SiteError::Config("api.timeout_ms must be positive".into()));
        }
        if self.site.title.trim().is_empty() {
            return Err(SiteError::Config("site.title must not be empty".into()));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Document-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_name")]
    pub name: String,

    /// Page title and `og:title`.
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_path: Option<String>,
}

fn default_name() -> String {
    "waypoint".to_string()
}

fn default_title() -> String {
    "Very cool app".to_string()
}

fn default_description() -> String {
    "This app is the best".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: default_title(),
            description: default_description(),
            css_path: None,
        }
    }
}

/// Placeholder API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_api_base")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay before the first retry; doubles after each.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Prerender settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrerenderSection {
    /// Include every route without params.
    #[serde(default = "default_true")]
    pub static_routes: bool,

    /// Include `/product/{id}` for every post.
    #[serde(default = "default_true")]
    pub products: bool,

    /// Where `waypoint prerender` writes its manifest.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_true() -> bool {
    true
}

fn default_output() -> String {
    "prerender.json".to_string()
}

impl Default for PrerenderSection {
    fn default() -> Self {
        Self {
            static_routes: true,
            products: true,
            output: default_output(),
        }
    }
}

/// Loader log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    #[serde(default = "default_level")]
    pub level: LogLevel,

    #[serde(default = "default_format")]
    pub format: LogFormat,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

fn default_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
