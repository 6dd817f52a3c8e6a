//! Route loaders and actions.
//!
//! Each function is the data side of one route module. Server variants run
//! during SSR (or from a server function); client variants run in the browser
//! after hydration.

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use waypoint_core::RouteFailure;
use waypoint_observability::StructuredLogger;

use crate::posts::{Post, PostsApi};
use crate::FetchError;

pub const SERVER_MESSAGE: &str = "Data from the server";
pub const CLIENT_MESSAGE: &str = "Data from the client";

/// Errors raised by loaders and actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    #[error("missing parameter `{0}`")]
    MissingParam(String),

    #[error("invalid parameter `{name}`: {value:?}")]
    InvalidParam { name: String, value: String },

    #[error("upstream fetch failed")]
    Fetch(#[from] FetchError),
}

impl LoaderError {
    /// Status the route should answer with.
    pub fn status(&self) -> u16 {
        match self {
            LoaderError::MissingParam(_) | LoaderError::InvalidParam { .. } => 400,
            LoaderError::Fetch(FetchError::HttpError { status, .. }) => *status,
            LoaderError::Fetch(FetchError::Timeout) => 504,
            LoaderError::Fetch(_) => 502,
        }
    }

    /// What the route's error boundary receives.
    pub fn route_failure(&self) -> RouteFailure {
        match self {
            LoaderError::Fetch(FetchError::HttpError { status, message }) => {
                RouteFailure::response(*status).with_data(message.clone())
            }
            LoaderError::MissingParam(_) | LoaderError::InvalidParam { .. } => {
                RouteFailure::response(400).with_data(self.to_string())
            }
            other => RouteFailure::from_error(other),
        }
    }
}

/// Dependencies of every loader: the API and a request-scoped logger.
#[derive(Debug, Clone)]
pub struct LoaderContext {
    api: PostsApi,
    logger: StructuredLogger,
}

impl LoaderContext {
    pub fn new(api: PostsApi, logger: StructuredLogger) -> Self {
        Self { api, logger }
    }

    pub fn api(&self) -> &PostsApi {
        &self.api
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }
}

// === Home ===

/// Home page data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeData {
    pub message: String,
}

/// Result of the home page's form actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub ok: bool,
}

pub fn home_loader(ctx: &LoaderContext) -> HomeData {
    ctx.logger.child("routes/home").debug("server load");
    HomeData {
        message: SERVER_MESSAGE.to_string(),
    }
}

pub fn home_client_loader(ctx: &LoaderContext) -> HomeData {
    ctx.logger.child("routes/home").debug("client load");
    HomeData {
        message: CLIENT_MESSAGE.to_string(),
    }
}

pub fn home_action(ctx: &LoaderContext) -> ActionResult {
    ctx.logger.child("routes/home").info("server action");
    ActionResult { ok: true }
}

pub fn home_client_action(ctx: &LoaderContext) -> ActionResult {
    ctx.logger.child("routes/home").info("client action");
    ActionResult { ok: true }
}

// === Product ===

/// Which side produced a product page's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadedBy {
    Server,
    Client,
}

/// Product page data: a post plus where it was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub post: Post,
    pub loaded_by: LoadedBy,
}

/// Parse a numeric route parameter.
pub fn parse_id(name: &str, value: Option<&str>) -> Result<u64, LoaderError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LoaderError::MissingParam(name.to_string()))?;
    value.parse().map_err(|_| LoaderError::InvalidParam {
        name: name.to_string(),
        value: value.to_string(),
    })
}

async fn fetch_post(
    ctx: &LoaderContext,
    module: &str,
    what: &str,
    pid: u64,
) -> Result<Post, LoaderError> {
    let logger = ctx.logger.child(module);
    let started = Instant::now();

    match ctx.api.post(pid).await {
        Ok(post) => {
            logger
                .info_builder(what)
                .field_i64("pid", pid as i64)
                .duration_ms("took_ms", started.elapsed())
                .emit();
            Ok(post)
        }
        Err(err) => {
            logger
                .error_builder(what)
                .field_i64("pid", pid as i64)
                .field("error", err.to_string())
                .emit();
            Err(err.into())
        }
    }
}

/// Server loader for `/product/:pid`.
pub async fn product_loader(ctx: &LoaderContext, pid: Option<&str>) -> Result<Product, LoaderError> {
    let pid = parse_id("pid", pid)?;
    let post = fetch_post(ctx, "routes/product", "server request for product", pid).await?;
    Ok(Product {
        post,
        loaded_by: LoadedBy::Server,
    })
}

/// Client loader for `/product/:pid`.
///
/// Waits for the server loader first, then fetches the post again from the
/// browser. Also runs on hydration.
pub async fn product_client_loader<F>(
    ctx: &LoaderContext,
    pid: Option<&str>,
    server_loader: F,
) -> Result<Product, LoaderError>
where
    F: Future<Output = Result<Product, LoaderError>>,
{
    let server_data = server_loader.await?;
    ctx.logger
        .child("routes/product")
        .debug_builder("server data received")
        .field_i64("id", server_data.post.id as i64)
        .emit();

    let pid = parse_id("pid", pid)?;
    let post = fetch_post(ctx, "routes/product", "client request for product", pid).await?;
    Ok(Product {
        post,
        loaded_by: LoadedBy::Client,
    })
}

// === Project detail ===

/// Server action for `/projectDetail/:pid`: looks up the post named by the
/// form's `pid` field.
pub async fn project_action(
    ctx: &LoaderContext,
    form: &HashMap<String, String>,
) -> Result<Post, LoaderError> {
    let pid = parse_id("pid", form.get("pid").map(String::as_str))?;
    fetch_post(ctx, "project", "server submission", pid).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::transport::ScriptedTransport;
    use crate::{FetchClient, FetchPolicy, RetryPolicy};
    use serde_json::json;
    use waypoint_observability::{LogBuffer, LogFormat, RequestId};

    fn post_json(id: u64) -> serde_json::Value {
        json!({ "id": id, "title": format!("post {}", id), "body": "…", "userId": 1 })
    }

    fn context(transport: ScriptedTransport) -> (LoaderContext, Arc<ScriptedTransport>, LogBuffer) {
        let transport = Arc::new(transport);
        let client = FetchClient::with_transport(transport.clone())
            .with_base_url("https://api.test")
            .with_policy(FetchPolicy {
                retry: RetryPolicy::none(),
                ..FetchPolicy::default()
            });
        let buffer = LogBuffer::new();
        let logger = StructuredLogger::new(RequestId::from_string("req-1"))
            .with_format(LogFormat::Json)
            .with_buffer(buffer.clone());
        (LoaderContext::new(PostsApi::new(client), logger), transport, buffer)
    }

    // === Home Tests ===

    #[test]
    fn test_home_loaders() {
        let (ctx, transport, _) = context(ScriptedTransport::new());
        assert_eq!(home_loader(&ctx).message, "Data from the server");
        assert_eq!(home_client_loader(&ctx).message, "Data from the client");
        assert!(home_action(&ctx).ok);
        assert!(home_client_action(&ctx).ok);
        assert!(transport.requests().is_empty());
    }

    // === Product Tests ===

    #[tokio::test]
    async fn test_product_loader() {
        let (ctx, _, logs) = context(ScriptedTransport::new().push_json(post_json(3)));

        let product = product_loader(&ctx, Some("3")).await.unwrap();
        assert_eq!(product.post.id, 3);
        assert_eq!(product.loaded_by, LoadedBy::Server);

        let line: serde_json::Value = serde_json::from_str(&logs.lines()[0]).unwrap();
        assert_eq!(line["module"], "routes/product");
        assert_eq!(line["pid"], 3);
    }

    #[tokio::test]
    async fn test_product_client_loader_awaits_server_first() {
        let transport = ScriptedTransport::new()
            .push_json(post_json(2))
            .push_json(post_json(2));
        let (ctx, transport, _) = context(transport);

        let product = product_client_loader(&ctx, Some("2"), product_loader(&ctx, Some("2")))
            .await
            .unwrap();

        assert_eq!(product.loaded_by, LoadedBy::Client);
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(
            serde_json::to_value(&product).unwrap()["loaded_by"],
            "client"
        );
    }

    #[tokio::test]
    async fn test_product_client_loader_stops_on_server_error() {
        let (ctx, transport, _) = context(ScriptedTransport::new().push_status(404));

        let err = product_client_loader(&ctx, Some("9"), product_loader(&ctx, Some("9")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_product_loader_bad_pid() {
        let (ctx, transport, _) = context(ScriptedTransport::new());

        let err = product_loader(&ctx, Some("abc")).await.unwrap_err();
        assert_eq!(
            err,
            LoaderError::InvalidParam {
                name: "pid".into(),
                value: "abc".into()
            }
        );
        assert_eq!(err.status(), 400);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_product_not_found_maps_to_404_failure() {
        let (ctx, _, logs) = context(ScriptedTransport::new().push_status(404));

        let err = product_loader(&ctx, Some("1000")).await.unwrap_err();
        assert_eq!(err.route_failure().status(), Some(404));
        assert!(logs.lines()[0].contains(r#""level":"error""#));
    }

    // === Project Action Tests ===

    #[tokio::test]
    async fn test_project_action_reads_pid() {
        let (ctx, transport, _) = context(ScriptedTransport::new().push_json(post_json(5)));
        let form = HashMap::from([("pid".to_string(), "5".to_string())]);

        let post = project_action(&ctx, &form).await.unwrap();
        assert_eq!(post.title, "post 5");
        assert_eq!(transport.requests(), vec!["GET https://api.test/posts/5"]);
    }

    #[tokio::test]
    async fn test_project_action_missing_pid() {
        let (ctx, _, _) = context(ScriptedTransport::new());
        let err = project_action(&ctx, &HashMap::new()).await.unwrap_err();
        assert_eq!(err, LoaderError::MissingParam("pid".into()));
    }

    // === Error Mapping Tests ===

    #[test]
    fn test_status_mapping() {
        assert_eq!(LoaderError::from(FetchError::Timeout).status(), 504);
        assert_eq!(
            LoaderError::from(FetchError::RequestError("reset".into())).status(),
            502
        );
    }

    #[test]
    fn test_transport_failure_becomes_error_failure() {
        let failure = LoaderError::from(FetchError::Timeout).route_failure();
        let RouteFailure::Error { message, stack } = failure else {
            panic!("expected an error failure");
        };
        assert_eq!(message, "upstream fetch failed");
        assert_eq!(stack.as_deref(), Some("caused by: Request timed out"));
    }
}
