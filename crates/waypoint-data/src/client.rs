//! Fetch client with timeout and retry policy.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;
use crate::transport::Transport;
use crate::{FetchError, Method, RequestBuilder, Response};

/// Timeout and retry settings applied to every request of a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    pub timeout: TimeoutConfig,
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// HTTP client for outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    policy: FetchPolicy,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Client over an explicit transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: BTreeMap::new(),
            policy: FetchPolicy::default(),
            transport,
        }
    }

    /// Client over the platform transport (`reqwest` natively, Spin on `wasm32`).
    pub fn platform(policy: FetchPolicy) -> Result<Self, FetchError> {
        #[cfg(not(target_arch = "wasm32"))]
        let transport: Arc<dyn Transport> =
            Arc::new(crate::transport::ReqwestTransport::new(policy.timeout)?);
        #[cfg(target_arch = "wasm32")]
        let transport: Arc<dyn Transport> = Arc::new(crate::transport::SpinTransport);

        Ok(Self::with_transport(transport).with_policy(policy))
    }

    /// Prepend `base_url` to relative request URLs.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            client: self.clone(),
        }
    }

    /// GET `url` and decode a JSON body, surfacing non-2xx statuses.
    pub async fn get_json<T: DeserializeOwned>(&self, url: impl Into<String>) -> Result<T, FetchError> {
        self.get(url).accept("application/json").send_json().await
    }
}

/// A request bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    client: FetchClient,
}

impl ClientRequestBuilder {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request as it will be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send, retrying per the client's policy.
    ///
    /// A non-2xx response that is not retried (or runs out of retries) is
    /// returned as-is; see [`send_json`](Self::send_json) to surface it.
    pub async fn send(self) -> Result<Response, FetchError> {
        let policy = &self.client.policy.retry;
        let url = &self.builder.url;
        let mut attempt = 0;

        loop {
            let retry = match self.client.transport.send(&self.builder).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => {
                    if !policy.should_retry_status(response.status, attempt) {
                        return Ok(response);
                    }
                    format!("status {}", response.status)
                }
                Err(err) => {
                    if !policy.should_retry_error(&err, attempt) {
                        tracing::debug!(%url, error = %err, attempt, "fetch failed");
                        return Err(err);
                    }
                    err.to_string()
                }
            };

            let delay = policy.backoff.delay_for_attempt(attempt);
            tracing::warn!(%url, reason = %retry, attempt, delay_ms = delay.as_millis() as u64, "retrying fetch");
            pause(delay).await;
            attempt += 1;
        }
    }

    /// Send and decode a JSON body; non-2xx becomes [`FetchError::HttpError`].
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.error_for_status()?.json()
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// No timer in the Spin guest; retries go out immediately.
#[cfg(target_arch = "wasm32")]
async fn pause(_delay: Duration) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::BackoffStrategy;
    use crate::transport::ScriptedTransport;
    use serde_json::json;

    fn client(transport: ScriptedTransport, retries: u32) -> (FetchClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(transport);
        let policy = FetchPolicy::new(
            TimeoutConfig::default(),
            RetryPolicy::new(retries).with_backoff(BackoffStrategy::None),
        );
        let client = FetchClient::with_transport(transport.clone())
            .with_base_url("https://api.test/")
            .with_policy(policy);
        (client, transport)
    }

    // === URL Tests ===

    #[test]
    fn test_base_url_joining() {
        let (client, _) = client(ScriptedTransport::new(), 0);
        assert_eq!(client.get("/posts/1").request().url, "https://api.test/posts/1");
        assert_eq!(client.get("posts").request().url, "https://api.test/posts");
        assert_eq!(
            client.get("http://other.test/x").request().url,
            "http://other.test/x"
        );
    }

    #[test]
    fn test_default_headers_applied() {
        let (client, _) = client(ScriptedTransport::new(), 0);
        let client = client.with_default_header("X-Trace", "1");
        assert_eq!(client.post("/posts").request().headers["X-Trace"], "1");
    }

    // === Send Tests ===

    #[tokio::test]
    async fn test_get_json() {
        let (client, transport) = client(ScriptedTransport::new().push_json(json!({ "id": 1 })), 1);
        let value: serde_json::Value = client.get_json("/posts/1").await.unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(transport.requests(), vec!["GET https://api.test/posts/1"]);
    }

    #[tokio::test]
    async fn test_not_found_is_surfaced_without_retry() {
        let (client, transport) = client(ScriptedTransport::new().push_status(404), 3);
        let err = client.get_json::<serde_json::Value>("/posts/999").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let transport = ScriptedTransport::new()
            .push_status(503)
            .push_json(json!({ "id": 2 }));
        let (client, transport) = client(transport, 1);

        let value: serde_json::Value = client.get_json("/posts/2").await.unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let transport = ScriptedTransport::new().push_status(500).push_status(502);
        let (client, transport) = client(transport, 1);

        let err = client.get_json::<serde_json::Value>("/posts").await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_retried_then_surfaced() {
        let transport = ScriptedTransport::new()
            .push(Err(FetchError::Timeout))
            .push(Err(FetchError::Timeout));
        let (client, _) = client(transport, 1);

        assert_eq!(client.get("/posts").send().await, Err(FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_parse_error_not_retried() {
        let transport = ScriptedTransport::new().push(Ok(Response::new(
            200,
            Default::default(),
            b"<html>".to_vec(),
        )));
        let (client, transport) = client(transport, 2);

        let err = client.get_json::<serde_json::Value>("/posts").await.unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));
        assert_eq!(transport.requests().len(), 1);
    }
}
