//! Pluggable HTTP transports.
//!
//! Natively requests go through `reqwest`; inside a Spin component they go
//! through Spin's outbound HTTP. Tests script responses with
//! [`ScriptedTransport`].

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response};

/// Sends one request and buffers the response.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use crate::TimeoutConfig;

    /// `reqwest`-backed transport.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(timeout: TimeoutConfig) -> Result<Self, FetchError> {
            let client = reqwest::Client::builder()
                .connect_timeout(timeout.connect)
                .timeout(timeout.total)
                .user_agent(concat!("waypoint/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| FetchError::RequestError(e.to_string()))?;
            Ok(Self { client })
        }
    }

    fn map_error(e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
            let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
                .map_err(|e| FetchError::RequestError(e.to_string()))?;

            let mut builder = self.client.request(method, &request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().await.map_err(map_error)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                .collect();
            let body = response.bytes().await.map_err(map_error)?.to_vec();

            Ok(Response::new(status, headers, body))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use spin::SpinTransport;

#[cfg(target_arch = "wasm32")]
mod spin {
    use super::*;
    use crate::Method;

    /// Spin outbound HTTP. Timeouts are enforced by the host.
    #[derive(Debug, Clone, Default)]
    pub struct SpinTransport;

    #[async_trait(?Send)]
    impl Transport for SpinTransport {
        async fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
            use spin_sdk::http::{Method as SpinMethod, Request};

            let method = match request.method {
                Method::Get => SpinMethod::Get,
                Method::Post => SpinMethod::Post,
                Method::Put => SpinMethod::Put,
                Method::Patch => SpinMethod::Patch,
                Method::Delete => SpinMethod::Delete,
            };

            let mut builder = Request::builder();
            builder.method(method).uri(request.url.as_str());
            for (key, value) in &request.headers {
                builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder.body(body.clone());
            }

            let response: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
                .await
                .map_err(|e| FetchError::RequestError(e.to_string()))?;

            let status = *response.status();
            let headers = response
                .headers()
                .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
                .collect();
            let body = response.into_body();

            Ok(Response::new(status, headers, body))
        }
    }
}

/// Replays queued results in order and records what was asked for.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    queue: Mutex<VecDeque<Result<Response, FetchError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next unanswered request.
    pub fn push(self, result: Result<Response, FetchError>) -> Self {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(result);
        }
        self
    }

    /// Queue a `200` JSON response.
    pub fn push_json(self, value: serde_json::Value) -> Self {
        self.push(Ok(Response::json_ok(&value)))
    }

    /// Queue an empty response with `status`.
    pub fn push_status(self, status: u16) -> Self {
        self.push(Ok(Response::status_only(status)))
    }

    /// `METHOD url` of every request sent so far.
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(format!("{} {}", request.method.as_str(), request.url));
        }
        self.queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Err(FetchError::RequestError("no scripted response left".into())))
    }
}
