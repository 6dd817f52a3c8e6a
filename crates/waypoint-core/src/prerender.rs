//! Paths to render ahead of time.

use serde::Serialize;
use waypoint_router::RouteRegistry;

use crate::config::PrerenderSection;

/// Product page path for a post id.
pub fn product_path(id: u64) -> String {
    format!("/product/{}", id)
}

/// Every path to prerender: static routes first, then one product page per post.
pub fn prerender_paths(
    registry: &RouteRegistry,
    settings: &PrerenderSection,
    post_ids: &[u64],
) -> Vec<String> {
    let mut paths = Vec::new();
    if settings.static_routes {
        paths.extend(registry.static_paths());
    }
    if settings.products {
        paths.extend(post_ids.iter().copied().map(product_path));
    }
    paths
}

/// Written by `waypoint prerender`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerenderManifest {
    pub generated_at: String,
    pub paths: Vec<String>,
}
