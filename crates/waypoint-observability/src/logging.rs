//! Structured logging with request context.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::request_id::RequestId;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Request ID for correlation.
    pub request_id: String,
    /// Route module that emitted the entry (e.g. `routes/product`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Route path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.level, self.message);

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Human => write!(f, "human"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "pretty" | "text" => Ok(Self::Human),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// In-memory sink collecting formatted lines.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

#[derive(Debug, Clone)]
enum Sink {
    /// Stderr (Spin captures this).
    Stderr,
    Buffer(LogBuffer),
}

/// Structured logger with request context.
///
/// One logger is created per loader or action invocation so every line it
/// writes carries the same request id and route.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    module: Option<String>,
    route: Option<String>,
    start_time: std::time::Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: Sink,
}

impl StructuredLogger {
    /// Create a new logger with request context.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            module: None,
            route: None,
            start_time: std::time::Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Sink::Stderr,
        }
    }

    /// Create a logger for a fresh request.
    pub fn for_request() -> Self {
        Self::new(RequestId::generate())
    }

    /// Set the route module name.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set the route path.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Write into `buffer` instead of stderr.
    pub fn with_buffer(mut self, buffer: LogBuffer) -> Self {
        self.sink = Sink::Buffer(buffer);
        self
    }

    /// Derive a logger for a nested route, sharing request id and sink.
    pub fn child(&self, module: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            ..self.clone()
        }
    }

    /// Log at trace level.
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, BTreeMap::new());
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            request_id: self.request_id.to_string(),
            module: self.module.clone(),
            route: self.route.clone(),
            fields,
            elapsed_us: Some(self.start_time.elapsed().as_micros() as u64),
        };

        let output = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };

        match &self.sink {
            Sink::Stderr => eprintln!("{}", output),
            Sink::Buffer(buffer) => buffer.push(output),
        }
    }

    /// Get the request ID.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a duration field (in milliseconds).
    pub fn duration_ms(mut self, key: &str, duration: std::time::Duration) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(duration.as_millis() as u64));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}
