//! Server functions backing the route loaders and actions.

use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;
use serde::{Deserialize, Serialize};

/// Home page loader data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeView {
    pub message: String,
}

/// A placeholder post as rendered by the product and project pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostView {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: Option<u64>,
    /// "server" or "client"; empty for action results.
    pub loaded_by: String,
}

#[cfg(feature = "ssr")]
mod server {
    use leptos::server_fn::error::ServerFnError;
    use waypoint_core::{ApiSection, ErrorReport};
    use waypoint_data::{LoaderContext, LoaderError, Post, PostsApi};
    use waypoint_observability::StructuredLogger;

    use super::PostView;

    pub fn loader_context(route: &str) -> Result<LoaderContext, ServerFnError> {
        let api = PostsApi::from_settings(&ApiSection::default())
            .map_err(|e| ServerFnError::new(format!("HTTP client error: {}", e)))?;
        let logger = StructuredLogger::for_request().with_route(route);
        Ok(LoaderContext::new(api, logger))
    }

    /// Set the response status and render the failure the way the route
    /// boundary would.
    pub fn loader_failure(err: LoaderError) -> ServerFnError {
        if let Some(resp) = leptos::prelude::use_context::<leptos_wasi::response::ResponseOptions>() {
            if let Ok(status) = leptos_wasi::prelude::StatusCode::from_u16(err.status()) {
                resp.set_status(status);
            }
        }
        let report = ErrorReport::detailed(&err.route_failure());
        ServerFnError::new(format!("{}: {}", report.heading, report.details))
    }

    pub fn post_view(post: Post, loaded_by: &str) -> PostView {
        PostView {
            id: post.id,
            title: post.title,
            body: post.body,
            user_id: post.user_id,
            loaded_by: loaded_by.to_string(),
        }
    }
}

/// Home `loader`.
#[leptos::server(prefix = "/api")]
pub async fn load_home() -> Result<HomeView, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let ctx = server::loader_context("/")?;
        let data = waypoint_data::loaders::home_loader(&ctx);
        Ok(HomeView {
            message: data.message,
        })
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Home `clientLoader`.
#[leptos::server(prefix = "/api")]
pub async fn load_home_client() -> Result<HomeView, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let ctx = server::loader_context("/")?;
        let data = waypoint_data::loaders::home_client_loader(&ctx);
        Ok(HomeView {
            message: data.message,
        })
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Home `action`; `client` picks the `clientAction` variant.
#[leptos::server(prefix = "/api")]
pub async fn home_action(client: bool) -> Result<bool, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let ctx = server::loader_context("/")?;
        let result = if client {
            waypoint_data::loaders::home_client_action(&ctx)
        } else {
            waypoint_data::loaders::home_action(&ctx)
        };
        Ok(result.ok)
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = client;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Product `loader`, or the hydrating `clientLoader` when `client` is set.
#[leptos::server(prefix = "/api")]
pub async fn load_product(pid: String, client: bool) -> Result<PostView, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        use waypoint_data::loaders::{product_client_loader, product_loader, LoadedBy};

        let ctx = server::loader_context("/product/:pid")?;
        let product = if client {
            product_client_loader(&ctx, Some(&pid), product_loader(&ctx, Some(&pid))).await
        } else {
            product_loader(&ctx, Some(&pid)).await
        }
        .map_err(server::loader_failure)?;

        let loaded_by = match product.loaded_by {
            LoadedBy::Server => "server",
            LoadedBy::Client => "client",
        };
        Ok(server::post_view(product.post, loaded_by))
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = (pid, client);
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Project detail `action`: looks up the post named by the form's `pid`.
#[leptos::server(prefix = "/api")]
pub async fn submit_project(pid: String) -> Result<PostView, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        let ctx = server::loader_context("/projectDetail/:pid")?;
        let form = std::collections::HashMap::from([("pid".to_string(), pid)]);
        let post = waypoint_data::loaders::project_action(&ctx, &form)
            .await
            .map_err(server::loader_failure)?;
        Ok(server::post_view(post, ""))
    }

    #[cfg(not(feature = "ssr"))]
    {
        let _ = pid;
        Err(ServerFnError::new("Server-only function"))
    }
}
