//! Route matching logic.
//!
//! # Responsibilities
//! - Match a (mount-prefix stripped) request path against a route condition
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex, plain `starts_with` scans

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches when the path starts with any of the given prefixes.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefixes: Vec<String>,
}

impl PathPrefixMatcher {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// Matches every path. Used for the catch-all API route.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyPath;

impl Matcher for AnyPath {
    fn matches(&self, _path: &str) -> bool {
        true
    }
}
