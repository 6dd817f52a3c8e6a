//! Waypoint core.
//!
//! The pieces of the site that do not depend on rendering:
//! - `SiteConfig` - `waypoint.toml` with `[site]`, `[api]`, `[prerender]`, `[log]`
//! - `route_table` - every route the site declares
//! - `meta_tags` / `links` - document head entries
//! - `SiteApp` - validated config plus the flattened route table
//! - `ErrorReport` - what the root and home error boundaries show
//! - `prerender_paths` - static routes plus one page per product
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{site_routes, ErrorReport, RouteFailure};
//!
//! let routes = site_routes().unwrap();
//! assert!(routes.resolve("/nope/nope").is_none());
//!
//! let report = ErrorReport::root(&RouteFailure::not_found(), false);
//! assert_eq!(report.heading, "404");
//! ```

pub mod prelude;
mod app;
mod boundary;
mod config;
mod document;
mod error;
mod prerender;
mod routes;

pub use app::*;
pub use boundary::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use prerender::*;
pub use routes::*;

// Re-export waypoint-router
pub use waypoint_router::{RouteEntry, RouteMatch, RouteMeta, RouteRegistry};
