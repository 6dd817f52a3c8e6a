//! Path patterns and segment matching.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::RouteError;

/// Name a bare `*` splat is captured under.
pub const SPLAT_PARAM: &str = "*";

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, compared ASCII-case-insensitively.
    Static(String),
    /// `:name`
    Param(String),
    /// `:name?`
    Optional(String),
    /// `*` or `*name`; only valid as the last segment.
    Splat(String),
}

impl Segment {
    fn parse(raw: &str, pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if let Some(rest) = raw.strip_prefix(':') {
            let (name, optional) = match rest.strip_suffix('?') {
                Some(name) => (name, true),
                None => (rest, false),
            };
            if name.is_empty() {
                return Err(invalid("parameter without a name"));
            }
            return Ok(if optional {
                Segment::Optional(name.to_string())
            } else {
                Segment::Param(name.to_string())
            });
        }

        if let Some(name) = raw.strip_prefix('*') {
            let name = if name.is_empty() { SPLAT_PARAM } else { name };
            return Ok(Segment::Splat(name.to_string()));
        }

        if raw.contains('*') {
            return Err(invalid("`*` must start its segment"));
        }
        Ok(Segment::Static(raw.to_string()))
    }

    /// Contribution of this segment to a route's rank.
    pub fn score(&self) -> i32 {
        match self {
            Segment::Static(_) => 10,
            Segment::Param(_) => 3,
            Segment::Optional(_) => 2,
            Segment::Splat(_) => -2,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Segment::Static(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(s) => write!(f, "{}", s),
            Segment::Param(name) => write!(f, ":{}", name),
            Segment::Optional(name) => write!(f, ":{}?", name),
            Segment::Splat(name) if name == SPLAT_PARAM => write!(f, "*"),
            Segment::Splat(name) => write!(f, "*{}", name),
        }
    }
}

/// Parameters captured by a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed route pattern such as `/:lang?/categories`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// The pattern matching only `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|raw| Segment::parse(raw, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let splat_at = segments
            .iter()
            .position(|s| matches!(s, Segment::Splat(_)));
        if let Some(i) = splat_at {
            if i + 1 != segments.len() {
                return Err(RouteError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "splat must be the last segment".to_string(),
                });
            }
        }

        Ok(Self { segments })
    }

    /// Append `child` to this pattern.
    pub fn join(&self, child: &RoutePattern) -> Result<Self, RouteError> {
        if matches!(self.segments.last(), Some(Segment::Splat(_))) && !child.segments.is_empty() {
            return Err(RouteError::InvalidPattern {
                pattern: format!("{}{}", self, child),
                reason: "cannot nest below a splat".to_string(),
            });
        }
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern has only literal segments.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(Segment::is_static)
    }

    pub fn score(&self) -> i32 {
        self.segments.iter().map(Segment::score).sum()
    }

    /// Names of every parameter the pattern can capture.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(n) | Segment::Optional(n) | Segment::Splat(n) => Some(n.as_str()),
                Segment::Static(_) => None,
            })
            .collect()
    }

    /// Match a concrete path. Empty segments in `path` are ignored.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        if match_segments(&self.segments, &parts, &mut params) {
            Some(params)
        } else {
            None
        }
    }
}

fn match_segments(segments: &[Segment], parts: &[&str], params: &mut Params) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return parts.is_empty();
    };

    match segment {
        Segment::Static(text) => match parts.split_first() {
            Some((part, tail)) if part.eq_ignore_ascii_case(text) => {
                match_segments(rest, tail, params)
            }
            _ => false,
        },
        Segment::Param(name) => match parts.split_first() {
            Some((part, tail)) => {
                params.insert(name.clone(), *part);
                match_segments(rest, tail, params) || {
                    params.0.remove(name);
                    false
                }
            }
            None => false,
        },
        Segment::Optional(name) => {
            if let Some((part, tail)) = parts.split_first() {
                params.insert(name.clone(), *part);
                if match_segments(rest, tail, params) {
                    return true;
                }
                params.0.remove(name);
            }
            match_segments(rest, parts, params)
        }
        Segment::Splat(name) => {
            params.insert(name.clone(), parts.join("/"));
            true
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for RoutePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> RoutePattern {
        RoutePattern::parse(s).unwrap()
    }

    // === Parse Tests ===

    #[test]
    fn test_parse_segments() {
        let p = pattern("/:lang?/categories");
        assert_eq!(
            p.segments(),
            &[
                Segment::Optional("lang".into()),
                Segment::Static("categories".into())
            ]
        );
        assert_eq!(p.to_string(), "/:lang?/categories");
    }

    #[test]
    fn test_parse_ignores_empty_segments() {
        assert_eq!(pattern("//teams///:teamId/"), pattern("teams/:teamId"));
        assert_eq!(pattern("").to_string(), "/");
    }

    #[test]
    fn test_parse_rejects_bad_patterns() {
        assert!(RoutePattern::parse("/files/*/more").is_err());
        assert!(RoutePattern::parse("/teams/:").is_err());
        assert!(RoutePattern::parse("/a*b").is_err());
    }

    #[test]
    fn test_bare_splat_name() {
        assert_eq!(pattern("/files/*").param_names(), vec!["*"]);
        assert_eq!(pattern("/blog/*slug").param_names(), vec!["slug"]);
    }

    // === Match Tests ===

    #[test]
    fn test_match_static_case_insensitive() {
        assert!(pattern("/about").matches("/About").is_some());
        assert!(pattern("/about").matches("/about/").is_some());
        assert!(pattern("/about").matches("/about/me").is_none());
    }

    #[test]
    fn test_match_dynamic() {
        let params = pattern("/teams/:teamId").matches("/teams/42").unwrap();
        assert_eq!(params.get("teamId"), Some("42"));
        assert!(pattern("/teams/:teamId").matches("/teams").is_none());
    }

    #[test]
    fn test_match_optional() {
        let p = pattern("/:lang?/categories");

        let without = p.matches("/categories").unwrap();
        assert_eq!(without.get("lang"), None);

        let with = p.matches("/en/categories").unwrap();
        assert_eq!(with.get("lang"), Some("en"));

        assert!(p.matches("/en/fr/categories").is_none());
    }

    #[test]
    fn test_match_optional_backtracks() {
        // "categories" must not be swallowed by :lang?
        let p = pattern("/:lang?/categories");
        assert_eq!(p.matches("/categories").unwrap().len(), 0);
    }

    #[test]
    fn test_match_splat() {
        let p = pattern("/files/*");
        let params = p.matches("/files/a/b.txt").unwrap();
        assert_eq!(params.get("*"), Some("a/b.txt"));
        assert_eq!(p.matches("/files").unwrap().get("*"), Some(""));
    }

    #[test]
    fn test_match_strips_query_and_fragment() {
        let params = pattern("/product/:pid").matches("/product/3?x=1#top").unwrap();
        assert_eq!(params.get("pid"), Some("3"));
    }

    #[test]
    fn test_root_matches_only_root() {
        assert!(RoutePattern::root().matches("/").is_some());
        assert!(RoutePattern::root().matches("").is_some());
        assert!(RoutePattern::root().matches("/about").is_none());
    }

    // === Score Tests ===

    #[test]
    fn test_scores() {
        assert_eq!(pattern("/teams/:teamId").score(), 13);
        assert_eq!(pattern("/:lang?/categories").score(), 12);
        assert_eq!(pattern("/files/*").score(), 8);
        assert!(pattern("/about").is_static());
        assert!(!pattern("/files/*").is_static());
    }

    #[test]
    fn test_join() {
        let joined = pattern("/projects").join(&pattern(":pid/edit")).unwrap();
        assert_eq!(joined.to_string(), "/projects/:pid/edit");
        assert!(pattern("/files/*").join(&pattern("x")).is_err());
    }
}
