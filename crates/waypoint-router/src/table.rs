//! Route configuration tables and the flattened registry.

use serde::Serialize;

use crate::error::RouteError;
use crate::pattern::{Params, RoutePattern};

/// Static per-route information.
///
/// Everything here is known when the table is declared; the flags say which
/// data functions the route module exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Data exposed to every match in the chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
    /// Rendered while the client loader runs during hydration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydrate_fallback: Option<String>,
    pub loader: bool,
    pub client_loader: bool,
    /// The client loader also runs on the initial hydration.
    pub hydrate: bool,
    pub action: bool,
    pub client_action: bool,
}

impl RouteMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_handle(mut self, handle: serde_json::Value) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_hydrate_fallback(mut self, text: impl Into<String>) -> Self {
        self.hydrate_fallback = Some(text.into());
        self
    }

    pub fn with_loader(mut self) -> Self {
        self.loader = true;
        self
    }

    /// Add a client loader; `hydrate` makes it run on first render too.
    pub fn with_client_loader(mut self, hydrate: bool) -> Self {
        self.client_loader = true;
        self.hydrate = hydrate;
        self
    }

    pub fn with_action(mut self) -> Self {
        self.action = true;
        self
    }

    pub fn with_client_action(mut self) -> Self {
        self.client_action = true;
        self
    }

    /// Short flag list for listings, e.g. `loader,clientLoader(hydrate)`.
    pub fn exports(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.loader {
            out.push("loader");
        }
        if self.client_loader {
            out.push(if self.hydrate {
                "clientLoader(hydrate)"
            } else {
                "clientLoader"
            });
        }
        if self.action {
            out.push("action");
        }
        if self.client_action {
            out.push("clientAction");
        }
        if !self.headers.is_empty() {
            out.push("headers");
        }
        out
    }
}

/// How a declared route participates in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Renders at its parent's path.
    Index,
    /// Adds path segments and renders a module.
    Route,
    /// Wraps children in a module without adding segments.
    Layout,
    /// Adds path segments without a module.
    Prefix,
}

/// One node of a declared route tree.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    kind: RouteKind,
    path: Option<String>,
    module: Option<String>,
    meta: RouteMeta,
    children: Vec<RouteConfig>,
}

/// Index route rendering `module` at the parent's path.
pub fn index(module: impl Into<String>) -> RouteConfig {
    RouteConfig {
        kind: RouteKind::Index,
        path: None,
        module: Some(module.into()),
        meta: RouteMeta::default(),
        children: Vec::new(),
    }
}

/// Route rendering `module` at `path` (relative to the parent).
pub fn route(path: impl Into<String>, module: impl Into<String>) -> RouteConfig {
    RouteConfig {
        kind: RouteKind::Route,
        path: Some(path.into()),
        module: Some(module.into()),
        meta: RouteMeta::default(),
        children: Vec::new(),
    }
}

/// Pathless layout wrapping `children`.
pub fn layout(module: impl Into<String>, children: Vec<RouteConfig>) -> RouteConfig {
    RouteConfig {
        kind: RouteKind::Layout,
        path: None,
        module: Some(module.into()),
        meta: RouteMeta::default(),
        children,
    }
}

/// Prepend `path` to every child without adding a module.
pub fn prefix(path: impl Into<String>, children: Vec<RouteConfig>) -> RouteConfig {
    RouteConfig {
        kind: RouteKind::Prefix,
        path: Some(path.into()),
        module: None,
        meta: RouteMeta::default(),
        children,
    }
}

impl RouteConfig {
    pub fn children(mut self, children: Vec<RouteConfig>) -> Self {
        self.children = children;
        self
    }

    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }
}

/// A flattened route with its full pattern and ancestry.
#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    /// Route module, unique in the registry.
    pub id: String,
    pub kind: RouteKind,
    pub pattern: RoutePattern,
    /// Ancestor route ids, outermost first.
    pub parents: Vec<String>,
    pub meta: RouteMeta,
}

impl RouteEntry {
    /// Layouts only ever match as part of a child's chain.
    pub fn is_candidate(&self) -> bool {
        self.kind != RouteKind::Layout
    }

    /// Ranking used to choose among matching candidates.
    pub fn rank(&self) -> i32 {
        let bonus = if self.kind == RouteKind::Index { 2 } else { 0 };
        self.pattern.score() + bonus
    }
}

/// One level of a resolved match chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRoute {
    pub id: String,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<serde_json::Value>,
}

/// Result of resolving a path against the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    /// Id of the leaf route.
    pub id: String,
    pub pattern: String,
    pub params: Params,
    /// Outermost parent to leaf.
    pub matches: Vec<MatchedRoute>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Every handle in the chain, outermost first.
    pub fn handles(&self) -> impl Iterator<Item = &serde_json::Value> {
        self.matches.iter().filter_map(|m| m.handle.as_ref())
    }
}

/// Registry of every declared route, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a declared route tree.
    pub fn from_config(routes: Vec<RouteConfig>) -> Result<Self, RouteError> {
        let mut registry = Self::new();
        for config in routes {
            registry.add(config)?;
        }
        Ok(registry)
    }

    /// Add a declared route (and its children) after the existing ones.
    pub fn add(&mut self, config: RouteConfig) -> Result<(), RouteError> {
        self.flatten(config, &RoutePattern::root(), &[])
    }

    fn flatten(
        &mut self,
        config: RouteConfig,
        base: &RoutePattern,
        parents: &[String],
    ) -> Result<(), RouteError> {
        let pattern = match &config.path {
            Some(path) => base.join(&RoutePattern::parse(path)?)?,
            None => base.clone(),
        };

        let Some(module) = config.module else {
            // Prefix: children inherit the segments, not a parent.
            for child in config.children {
                self.flatten(child, &pattern, parents)?;
            }
            return Ok(());
        };

        if self.get(&module).is_some() {
            return Err(RouteError::DuplicateId(module));
        }

        tracing::trace!(id = %module, pattern = %pattern, kind = ?config.kind, "route registered");
        self.entries.push(RouteEntry {
            id: module.clone(),
            kind: config.kind,
            pattern: pattern.clone(),
            parents: parents.to_vec(),
            meta: config.meta,
        });

        let mut chain = parents.to_vec();
        chain.push(module);
        for child in config.children {
            self.flatten(child, &pattern, &chain)?;
        }
        Ok(())
    }

    /// All routes, in declaration order.
    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Resolve `path` to the best-ranked route.
    ///
    /// Ties go to the route declared first.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let mut best: Option<(i32, &RouteEntry, Params)> = None;

        for entry in self.entries.iter().filter(|e| e.is_candidate()) {
            let Some(params) = entry.pattern.matches(path) else {
                continue;
            };
            let rank = entry.rank();
            if best.as_ref().map_or(true, |(top, _, _)| rank > *top) {
                best = Some((rank, entry, params));
            }
        }

        let (_, entry, params) = best?;
        let matches = entry
            .parents
            .iter()
            .filter_map(|id| self.get(id))
            .chain(std::iter::once(entry))
            .map(|e| MatchedRoute {
                id: e.id.clone(),
                pattern: e.pattern.to_string(),
                handle: e.meta.handle.clone(),
            })
            .collect();

        tracing::debug!(path, id = %entry.id, "route resolved");
        Some(RouteMatch {
            id: entry.id.clone(),
            pattern: entry.pattern.to_string(),
            params,
            matches,
        })
    }

    /// Like [`resolve`](Self::resolve), failing with [`RouteError::NotFound`].
    pub fn try_resolve(&self, path: &str) -> Result<RouteMatch, RouteError> {
        self.resolve(path)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    /// Concrete paths of every candidate without params, deduplicated.
    pub fn static_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for entry in self.entries.iter().filter(|e| e.is_candidate()) {
            if !entry.pattern.is_static() {
                continue;
            }
            let path = entry.pattern.to_string();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}
