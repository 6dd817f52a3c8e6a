//! Data access for Waypoint routes.
//!
//! - `FetchClient` - outbound HTTP with timeout and retry policy over a
//!   pluggable `Transport` (`reqwest` natively, Spin outbound HTTP on `wasm32`)
//! - `PostsApi` - the placeholder `/posts` API
//! - `loaders` - the loaders and actions of the site's routes
//!
//! # Example
//!
//! ```rust,ignore
//! use waypoint_data::{FetchClient, FetchPolicy, PostsApi};
//!
//! let client = FetchClient::platform(FetchPolicy::default())?
//!     .with_base_url("https://jsonplaceholder.typicode.com");
//! let post = PostsApi::new(client).post(1).await?;
//! ```

mod client;
mod error;
pub mod loaders;
mod posts;
mod request;
mod response;
mod retry;
mod timeout;
mod transport;

pub use client::{ClientRequestBuilder, FetchClient, FetchPolicy};
pub use error::FetchError;
pub use loaders::{LoaderContext, LoaderError};
pub use posts::{Post, PostsApi};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use timeout::TimeoutConfig;
pub use transport::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::loaders::*;
    pub use crate::{FetchClient, FetchError, FetchPolicy, Post, PostsApi};
}
