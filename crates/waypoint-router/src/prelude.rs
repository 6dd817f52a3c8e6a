//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use waypoint_router::prelude::*;
//! ```

pub use crate::{
    index, layout, path, prefix, route, use_location, use_navigate, use_params_map, NavigateOptions,
    Outlet, ParentRoute, Route, RouteConfig, RouteEntry, RouteMatch, RouteMeta, RouteRegistry, Router,
    Routes,
};
