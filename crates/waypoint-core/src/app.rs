//! Site builder.

use waypoint_router::{RouteConfig, RouteRegistry};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::routes::route_table;

/// Waypoint site builder.
///
/// # Example
///
/// ```rust
/// use waypoint_core::{SiteApp, SiteConfig};
///
/// let (config, routes) = SiteApp::from_config(SiteConfig::default())
///     .with_site_routes()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.site.title, "Very cool app");
/// assert_eq!(routes.resolve("/").unwrap().id, "routes/home");
/// ```
#[derive(Debug, Default)]
pub struct SiteApp {
    config: SiteConfig,
    routes: Vec<RouteConfig>,
}

impl SiteApp {
    /// Start from a loaded configuration.
    pub fn from_config(config: SiteConfig) -> Self {
        Self {
            config,
            routes: Vec::new(),
        }
    }

    /// Append the full site route table.
    pub fn with_site_routes(mut self) -> Self {
        self.routes.extend(route_table());
        self
    }

    /// Validate the configuration and flatten the routes.
    pub fn build(self) -> Result<(SiteConfig, RouteRegistry), SiteError> {
        self.config.validate()?;
        let registry = RouteRegistry::from_config(self.routes)?;
        tracing::debug!(
            site = %self.config.site.name,
            routes = registry.routes().len(),
            "site built"
        );
        Ok((self.config, registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_app_builds_site_routes() {
        let mut config = SiteConfig::default();
        config.site.name = "Shop".into();
        let (config, routes) = SiteApp::from_config(config)
            .with_site_routes()
            .build()
            .unwrap();

        assert_eq!(config.site.name, "Shop");
        assert_eq!(routes.routes().len(), 20);
        assert_eq!(routes.resolve("/wizard/plan").unwrap().id, "routes/wizard/wizard");
    }

    #[test]
    fn test_site_app_without_routes_is_empty() {
        let (_, routes) = SiteApp::from_config(SiteConfig::default()).build().unwrap();
        assert!(routes.routes().is_empty());
    }

    #[test]
    fn test_site_app_rejects_bad_config() {
        let mut config = SiteConfig::default();
        config.api.base_url = "localhost".into();
        let result = SiteApp::from_config(config).with_site_routes().build();
        assert!(matches!(result, Err(SiteError::Config(_))));
    }
}
