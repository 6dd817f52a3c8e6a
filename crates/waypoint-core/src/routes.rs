//! The site's route table.

use serde_json::json;
use waypoint_router::{index, layout, prefix, route, RouteConfig, RouteMeta, RouteRegistry};

use crate::error::SiteError;

pub const HOME: &str = "routes/home";
pub const PRODUCT: &str = "routes/product";
pub const PROJECT_DETAIL: &str = "project";
pub const TEAM: &str = "routes/teams/team";
pub const PROJECT: &str = "routes/projects/project";
pub const WIZARD: &str = "routes/wizard/wizard";

/// Mount point of the wizard's step routes.
pub const WIZARD_BASE: &str = "/wizard";

/// Headers sent with the home page.
pub fn home_headers() -> Vec<(String, String)> {
    vec![
        ("X-Stretchy-Pants".to_string(), "its for fun".to_string()),
        (
            "Cache-Control".to_string(),
            "max-age=300, s-maxage=3600".to_string(),
        ),
    ]
}

fn home_meta() -> RouteMeta {
    let meta = RouteMeta::new()
        .with_handle(json!({ "its": "all yours" }))
        .with_hydrate_fallback("Loading Game...")
        .with_loader()
        .with_client_loader(false)
        .with_action()
        .with_client_action();

    home_headers()
        .into_iter()
        .fold(meta, |meta, (name, value)| meta.with_header(name, value))
}

/// Every route of the site, in declaration order.
pub fn route_table() -> Vec<RouteConfig> {
    vec![
        index(HOME).meta(home_meta()),
        route("about", "routes/about"),
        route("login", "routes/login"),
        route("setting", "routes/setting/setting").children(vec![
            index("routes/setting/index"),
            route("product", "routes/setting/product"),
            route("user", "routes/setting/user"),
        ]),
        layout(
            "routes/layout",
            vec![
                index("routes/marketing/home"),
                route("contact", "routes/marketing/contact"),
            ],
        ),
        prefix(
            "projects",
            vec![
                index("routes/projects/home"),
                layout(
                    "routes/projects/project-layout",
                    vec![
                        route(":pid", PROJECT),
                        route(":pid/edit", "routes/projects/edit-project"),
                    ],
                ),
            ],
        ),
        route("teams/:teamId", TEAM),
        route(":lang?/categories", "routes/categories/categories"),
        route("files/*", "routes/files/files"),
        route("wizard/*", WIZARD),
        route("product/:pid", PRODUCT).meta(
            RouteMeta::new()
                .with_loader()
                .with_client_loader(true)
                .with_hydrate_fallback("Loading..."),
        ),
        route("projectDetail/:pid", PROJECT_DETAIL).meta(RouteMeta::new().with_action()),
    ]
}

/// Flattened site routes.
pub fn site_routes() -> Result<RouteRegistry, SiteError> {
    Ok(RouteRegistry::from_config(route_table())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: &str) -> waypoint_router::RouteMatch {
        site_routes().unwrap().resolve(path).unwrap()
    }

    #[test]
    fn test_table_flattens() {
        let registry = site_routes().unwrap();
        assert_eq!(registry.routes()[0].id, HOME);
        assert_eq!(registry.routes().len(), 20);
    }

    #[test]
    fn test_home_wins_root() {
        let m = resolve("/");
        assert_eq!(m.id, HOME);
        assert_eq!(m.matches.len(), 1);
        assert_eq!(m.matches[0].handle, Some(json!({ "its": "all yours" })));
    }

    #[test]
    fn test_dynamic_team() {
        let m = resolve("/teams/42");
        assert_eq!(m.id, TEAM);
        assert_eq!(m.param("teamId"), Some("42"));
    }

    #[test]
    fn test_optional_lang() {
        let bare = resolve("/categories");
        assert_eq!(bare.id, "routes/categories/categories");
        assert_eq!(bare.param("lang"), None);

        let localized = resolve("/en/categories");
        assert_eq!(localized.param("lang"), Some("en"));
    }

    #[test]
    fn test_files_splat() {
        assert_eq!(resolve("/files/a/b.txt").param("*"), Some("a/b.txt"));
    }

    #[test]
    fn test_project_chain() {
        let m = resolve("/projects/7/edit");
        assert_eq!(m.id, "routes/projects/edit-project");
        assert_eq!(m.matches[0].id, "routes/projects/project-layout");
        assert_eq!(m.param("pid"), Some("7"));

        assert_eq!(resolve("/projects/7").id, PROJECT);
        assert_eq!(resolve("/projects").id, "routes/projects/home");
    }

    #[test]
    fn test_wizard_steps_share_route() {
        assert_eq!(resolve("/wizard").id, WIZARD);
        assert_eq!(resolve("/wizard/step-3").param("*"), Some("step-3"));
    }

    #[test]
    fn test_contact_through_layout() {
        let m = resolve("/contact");
        assert_eq!(m.matches[0].id, "routes/layout");
        assert_eq!(m.id, "routes/marketing/contact");
    }

    #[test]
    fn test_product_meta() {
        let registry = site_routes().unwrap();
        let product = registry.get(PRODUCT).unwrap();
        assert!(product.meta.loader);
        assert!(product.meta.hydrate);
        assert_eq!(product.meta.hydrate_fallback.as_deref(), Some("Loading..."));
        assert_eq!(resolve("/product/5").param("pid"), Some("5"));
    }

    #[test]
    fn test_home_headers() {
        let registry = site_routes().unwrap();
        let home = registry.get(HOME).unwrap();
        assert_eq!(home.meta.headers, home_headers());
        assert_eq!(home.meta.hydrate_fallback.as_deref(), Some("Loading Game..."));
    }
}
