//! Route tables for Waypoint.
//!
//! Routes are declared as a tree and flattened into a [`RouteRegistry`]:
//!
//! ```text
//! index("routes/home")                    -> /
//! route("/teams/:teamId", ...)            -> dynamic segment
//! route("/:lang?/categories", ...)        -> optional segment
//! route("/files/*", ...)                  -> splat, captured under `*`
//! layout("routes/layout", [...])          -> wraps children, adds no segments
//! prefix("projects", [...])               -> adds segments, renders nothing
//! ```
//!
//! # Usage
//!
//! ```rust
//! use waypoint_router::{index, route, RouteRegistry};
//!
//! let registry = RouteRegistry::from_config(vec![
//!     index("routes/home"),
//!     route("/teams/:teamId", "routes/teams/team"),
//! ])
//! .unwrap();
//!
//! let matched = registry.resolve("/teams/42").unwrap();
//! assert_eq!(matched.id, "routes/teams/team");
//! assert_eq!(matched.param("teamId"), Some("42"));
//! ```

pub mod prelude;
mod error;
mod pattern;
mod table;

pub use error::*;
pub use pattern::*;
pub use table::*;

// Re-export leptos_router essentials
pub use leptos_router::{
    components::{Outlet, ParentRoute, Route, Router, Routes, A},
    hooks::{use_location, use_navigate, use_params_map},
    path, NavigateOptions,
};
