//! Error types for waypoint-core.

use thiserror::Error;
use waypoint_router::RouteError;

/// Errors that can occur while assembling the site.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Route table is malformed.
    #[error(transparent)]
    Route(#[from] RouteError),
}
