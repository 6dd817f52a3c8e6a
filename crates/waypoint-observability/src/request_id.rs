//! Request identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Unique request identifier for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

impl RequestId {
    /// Generate a new request ID: wall-clock nanos plus a process-wide sequence.
    pub fn generate() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{:x}-{:04x}", nanos, seq))
    }

    /// Create from an existing ID string (e.g. an incoming `x-request-id`).
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
