//! Observability for Waypoint.
//!
//! This crate provides:
//! - `RequestId` - Identifier correlating every log line of one loader or action run
//! - `StructuredLogger` - Request-scoped structured logging (JSON or human)
//! - `init_tracing` - `tracing` subscriber setup for binaries

mod logging;
mod request_id;
mod subscriber;

pub use logging::*;
pub use request_id::*;
pub use subscriber::*;
