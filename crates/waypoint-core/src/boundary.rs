//! Error boundary reports.
//!
//! A route failure is either an HTTP-style response (a loader rejecting with a
//! status), an error raised while rendering or loading, or something else
//! entirely. Boundaries turn it into a heading, details and an optional stack.

use http::StatusCode;
use serde::Serialize;

const DEFAULT_HEADING: &str = "Oops!";
const DEFAULT_DETAILS: &str = "An unexpected error occurred.";
const NOT_FOUND_DETAILS: &str = "The requested page could not be found.";

/// What a route boundary caught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteFailure {
    Response {
        status: u16,
        status_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    Unknown,
}

impl RouteFailure {
    /// A response failure with the canonical reason phrase for `status`.
    pub fn response(status: u16) -> Self {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        RouteFailure::Response {
            status,
            status_text,
            data: None,
        }
    }

    pub fn not_found() -> Self {
        Self::response(404)
    }

    pub fn with_data(self, body: impl Into<String>) -> Self {
        match self {
            RouteFailure::Response {
                status,
                status_text,
                ..
            } => RouteFailure::Response {
                status,
                status_text,
                data: Some(body.into()),
            },
            other => other,
        }
    }

    /// An error value, with its `source()` chain as the stack.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut frames = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            frames.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        RouteFailure::Error {
            message: err.to_string(),
            stack: (!frames.is_empty()).then(|| frames.join("\n")),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RouteFailure::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Rendered content of an error boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub heading: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorReport {
    /// The document-level boundary.
    ///
    /// Error messages and stacks are only shown when `dev` is set.
    pub fn root(failure: &RouteFailure, dev: bool) -> Self {
        match failure {
            RouteFailure::Response { status: 404, .. } => Self {
                heading: "404".to_string(),
                details: NOT_FOUND_DETAILS.to_string(),
                stack: None,
            },
            RouteFailure::Response { status_text, .. } => Self {
                heading: "Error".to_string(),
                details: if status_text.is_empty() {
                    DEFAULT_DETAILS.to_string()
                } else {
                    status_text.clone()
                },
                stack: None,
            },
            RouteFailure::Error { message, stack } if dev => Self {
                heading: DEFAULT_HEADING.to_string(),
                details: message.clone(),
                stack: stack.clone(),
            },
            _ => Self {
                heading: DEFAULT_HEADING.to_string(),
                details: DEFAULT_DETAILS.to_string(),
                stack: None,
            },
        }
    }

    /// The home route's boundary, which always shows what it caught.
    pub fn detailed(failure: &RouteFailure) -> Self {
        match failure {
            RouteFailure::Response {
                status,
                status_text,
                data,
            } => Self {
                heading: format!("{} {}", status, status_text),
                details: data.clone().unwrap_or_default(),
                stack: None,
            },
            RouteFailure::Error { message, stack } => Self {
                heading: "Error".to_string(),
                details: message.clone(),
                stack: stack.clone(),
            },
            RouteFailure::Unknown => Self {
                heading: "Unknown Error".to_string(),
                details: String::new(),
                stack: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("loader failed")]
    struct Outer(#[source] std::io::Error);

    // === Failure Tests ===

    #[test]
    fn test_response_reason_phrase() {
        assert_eq!(
            RouteFailure::response(503),
            RouteFailure::Response {
                status: 503,
                status_text: "Service Unavailable".into(),
                data: None,
            }
        );
        assert_eq!(RouteFailure::not_found().status(), Some(404));
    }

    #[test]
    fn test_unknown_status_has_empty_text() {
        let RouteFailure::Response { status_text, .. } = RouteFailure::response(599) else {
            panic!("expected a response");
        };
        assert!(status_text.is_empty());
    }

    #[test]
    fn test_from_error_collects_sources() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "socket closed"));
        let RouteFailure::Error { message, stack } = RouteFailure::from_error(&err) else {
            panic!("expected an error");
        };
        assert_eq!(message, "loader failed");
        assert_eq!(stack.as_deref(), Some("caused by: socket closed"));
    }

    // === Root Boundary Tests ===

    #[test]
    fn test_root_404() {
        let report = ErrorReport::root(&RouteFailure::not_found(), false);
        assert_eq!(report.heading, "404");
        assert_eq!(report.details, "The requested page could not be found.");
    }

    #[test]
    fn test_root_other_status() {
        let report = ErrorReport::root(&RouteFailure::response(500), false);
        assert_eq!(report.heading, "Error");
        assert_eq!(report.details, "Internal Server Error");

        let report = ErrorReport::root(&RouteFailure::response(599), false);
        assert_eq!(report.details, "An unexpected error occurred.");
    }

    #[test]
    fn test_root_hides_errors_outside_dev() {
        let failure = RouteFailure::Error {
            message: "boom".into(),
            stack: Some("at home".into()),
        };

        let prod = ErrorReport::root(&failure, false);
        assert_eq!(prod.heading, "Oops!");
        assert_eq!(prod.details, "An unexpected error occurred.");
        assert!(prod.stack.is_none());

        let dev = ErrorReport::root(&failure, true);
        assert_eq!(dev.details, "boom");
        assert_eq!(dev.stack.as_deref(), Some("at home"));
    }

    // === Detailed Boundary Tests ===

    #[test]
    fn test_detailed_response() {
        let failure = RouteFailure::response(418).with_data("short and stout");
        let report = ErrorReport::detailed(&failure);
        assert_eq!(report.heading, "418 I'm a teapot");
        assert_eq!(report.details, "short and stout");
    }

    #[test]
    fn test_detailed_error_and_unknown() {
        let report = ErrorReport::detailed(&RouteFailure::Error {
            message: "boom".into(),
            stack: None,
        });
        assert_eq!(report.heading, "Error");
        assert_eq!(report.details, "boom");

        assert_eq!(
            ErrorReport::detailed(&RouteFailure::Unknown).heading,
            "Unknown Error"
        );
    }
}
