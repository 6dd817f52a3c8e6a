//! Route table errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route id `{0}` is declared twice")]
    DuplicateId(String),

    #[error("no route matches `{0}`")]
    NotFound(String),
}
