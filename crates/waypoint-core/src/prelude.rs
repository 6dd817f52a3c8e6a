//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use waypoint_core::prelude::*;
//! ```

pub use crate::{
    links, meta_tags, prerender_paths, site_routes, ErrorReport, RouteFailure, SiteApp,
    SiteConfig, SiteError,
};
pub use waypoint_router::prelude::*;
