//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use waypoint_core::{RouteRegistry, SiteApp, SiteConfig, CONFIG_FILE};
use waypoint_data::{LoaderContext, PostsApi};
use waypoint_observability::StructuredLogger;

use crate::output::Output;

/// File names searched for, in order, in each directory.
const CONFIG_NAMES: [&str; 3] = [CONFIG_FILE, ".waypoint.toml", "waypoint.json"];

/// Execution context for CLI commands.
pub struct Context {
    pub config: SiteConfig,
    /// Where `config` came from, if a file was found.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or search upwards from the
    /// current directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let config = SiteConfig::load(path)
                    .with_context(|| format!("Failed to load config file: {}", path))?;
                (config, Some(PathBuf::from(path)))
            }
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (SiteConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Validate the loaded config and flatten the site's route table.
    pub fn site(&self) -> Result<RouteRegistry> {
        let (_, routes) = SiteApp::from_config(self.config.clone())
            .with_site_routes()
            .build()
            .context("Invalid site")?;
        Ok(routes)
    }

    /// Posts API per `[api]`.
    pub fn api(&self) -> Result<PostsApi> {
        PostsApi::from_settings(&self.config.api).context("Failed to build HTTP client")
    }

    /// Loader dependencies with a fresh request-scoped logger per `[log]`.
    pub fn loaders(&self) -> Result<LoaderContext> {
        let logger = StructuredLogger::for_request()
            .with_min_level(self.config.log.level)
            .with_format(self.config.log.format);
        Ok(LoaderContext::new(self.api()?, logger))
    }
}

/// Find the nearest config file in `start` or its parents.
fn find_config(start: &Path) -> Option<(SiteConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.exists() {
                match SiteConfig::load(&path) {
                    Ok(config) => return Some((config, path)),
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping config"),
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: SiteConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("."),
        }
    }

    // === Site Tests ===

    #[test]
    fn test_site_flattens_route_table() {
        let routes = context(SiteConfig::default()).site().unwrap();
        assert_eq!(routes.routes().len(), 20);
        assert!(routes.resolve("/product/1").is_some());
    }

    #[test]
    fn test_site_rejects_invalid_config() {
        let mut config = SiteConfig::default();
        config.api.base_url = "localhost".into();
        let err = context(config).site().unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid site"));
    }

    // === Config Search Tests ===

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[site]\ntitle = \"Found\"\n").unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert_eq!(config.site.title, "Found");
        assert_eq!(path, dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[site]\ntitle = \"Outer\"\n").unwrap();
        std::fs::write(nested.join("waypoint.json"), r#"{"site": {"title": "Inner"}}"#).unwrap();

        let (config, _) = find_config(&nested).unwrap();
        assert_eq!(config.site.title, "Inner");
    }
}
