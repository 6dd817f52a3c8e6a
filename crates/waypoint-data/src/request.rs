//! Outbound request description.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::FetchError;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request, ready to hand to a [`Transport`](crate::Transport).
///
/// Transports borrow it, so a retry resends the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "/posts")
            .json(&serde_json::json!({ "pid": 2 }))
            .unwrap();
        assert_eq!(req.headers["Content-Type"], "application/json");
        assert_eq!(req.body.as_deref(), Some(br#"{"pid":2}"#.as_slice()));
    }

    #[test]
    fn test_header_overwrites() {
        let req = RequestBuilder::new(Method::Get, "/posts")
            .accept("text/plain")
            .accept("application/json");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers["Accept"], "application/json");
        assert_eq!(req.method.as_str(), "GET");
    }
}
