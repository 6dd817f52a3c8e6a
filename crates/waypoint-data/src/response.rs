//! HTTP response handling.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::FetchError;

/// An HTTP response, fully buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A `200` with a JSON body.
    pub fn json_ok(value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(200, headers, value.to_string().into_bytes())
    }

    /// An empty response with the given status.
    pub fn status_only(status: u16) -> Self {
        Self::new(status, HashMap::new(), Vec::new())
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 5xx
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Turn a non-2xx response into [`FetchError::HttpError`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = match self.text() {
            Ok(body) if !body.trim().is_empty() => body,
            _ => http::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}
