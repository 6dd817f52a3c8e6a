//! The placeholder posts API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use waypoint_core::ApiSection;

use crate::{BackoffStrategy, FetchClient, FetchError, FetchPolicy, RetryPolicy, TimeoutConfig};

/// A post, also shown as a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Typed access to `/posts`.
#[derive(Debug, Clone)]
pub struct PostsApi {
    client: FetchClient,
}

impl PostsApi {
    /// `client` must carry the API base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Platform client configured from the `[api]` section.
    pub fn from_settings(settings: &ApiSection) -> Result<Self, FetchError> {
        let base = Duration::from_millis(settings.retry_delay_ms);
        let policy = FetchPolicy::new(
            TimeoutConfig::from_millis(settings.timeout_ms),
            RetryPolicy::new(settings.retries).with_backoff(BackoffStrategy::Exponential {
                base,
                max: base.saturating_mul(8),
            }),
        );
        let client = FetchClient::platform(policy)?.with_base_url(settings.base_url.clone());
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// `GET /posts/{id}`
    pub async fn post(&self, id: u64) -> Result<Post, FetchError> {
        self.client.get_json(format!("/posts/{}", id)).await
    }

    /// `GET /posts`
    pub async fn posts(&self) -> Result<Vec<Post>, FetchError> {
        self.client.get_json("/posts").await
    }

    /// Ids of every post, in API order.
    pub async fn post_ids(&self) -> Result<Vec<u64>, FetchError> {
        Ok(self.posts().await?.into_iter().map(|p| p.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::transport::ScriptedTransport;
    use serde_json::json;

    fn api(transport: ScriptedTransport) -> (PostsApi, Arc<ScriptedTransport>) {
        let transport = Arc::new(transport);
        let client = FetchClient::with_transport(transport.clone())
            .with_base_url("https://jsonplaceholder.typicode.com")
            .with_policy(FetchPolicy {
                retry: RetryPolicy::none(),
                ..FetchPolicy::default()
            });
        (PostsApi::new(client), transport)
    }

    #[tokio::test]
    async fn test_post() {
        let (api, transport) = api(ScriptedTransport::new().push_json(json!({
            "id": 1, "title": "t", "body": "b", "userId": 7
        })));

        let post = api.post(1).await.unwrap();
        assert_eq!(post.user_id, Some(7));
        assert_eq!(
            transport.requests(),
            vec!["GET https://jsonplaceholder.typicode.com/posts/1"]
        );
    }

    #[tokio::test]
    async fn test_post_ids() {
        let (api, _) = api(ScriptedTransport::new().push_json(json!([
            { "id": 1, "title": "a", "body": "", "userId": 1 },
            { "id": 2, "title": "b", "body": "", "userId": 1 }
        ])));
        assert_eq!(api.post_ids().await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_post_without_user_id() {
        let (api, _) = api(ScriptedTransport::new().push_json(json!({
            "id": 1, "title": "t", "body": "b"
        })));

        let post = api.post(1).await.unwrap();
        assert_eq!(post.title, "t");
        assert_eq!(post.user_id, None);
    }

    #[tokio::test]
    async fn test_missing_title_or_body_is_parse_error() {
        let (api, _) = api(
            ScriptedTransport::new()
                .push_json(json!({ "id": 1, "body": "b" }))
                .push_json(json!({ "id": 1, "title": "t" })),
        );
        assert!(matches!(api.post(1).await, Err(FetchError::ParseError(_))));
        assert!(matches!(api.post(1).await, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_from_settings() {
        let settings = ApiSection {
            retries: 2,
            retry_delay_ms: 10,
            ..ApiSection::default()
        };
        let api = PostsApi::from_settings(&settings).unwrap();
        let policy = api.client().policy();
        assert_eq!(policy.retry.max_retries, 2);
        assert_eq!(
            policy.retry.backoff.delay_for_attempt(5),
            Duration::from_millis(80)
        );
        assert_eq!(
            api.client().base_url(),
            Some("https://jsonplaceholder.typicode.com")
        );
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = Post {
            id: 1,
            title: "t".into(),
            body: "b".into(),
            user_id: Some(2),
        };
        assert_eq!(serde_json::to_value(&post).unwrap()["userId"], 2);
    }
}
