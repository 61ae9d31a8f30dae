//! Glob matching of page paths against `showOn` / `hideOn` patterns.
//!
//! ## Pattern Syntax
//!
//! - `*` matches within one path segment, never across `/`
//! - `**` matches across segments; `/docs/**` also matches `/docs` itself
//! - `?`, `[abc]` and `{a,b}` work as in shell globs
//! - Matching is case-sensitive, and wildcards match dot-prefixed
//!   segments (`/.well-known/x` is matched by `/*/x`)
//!
//! ## Path Normalization
//!
//! Before matching, paths lose their query string and fragment, repeated
//! slashes collapse, and one trailing slash is dropped (except for `/`):
//!
//! ```text
//! /guides//intro/?ref=nav#setup  →  /guides/intro
//! ```
//!
//! ## Caching
//!
//! Compiled matchers live in a [`MatcherCache`] bounded to
//! [`MATCHER_CACHE_CAPACITY`] patterns with least-recently-used eviction.
//! Lookup, compilation and insertion happen under one lock, so two requests
//! missing on the same pattern never race on the eviction order.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Maximum number of distinct compiled patterns kept alive.
pub const MATCHER_CACHE_CAPACITY: usize = 100;

#[derive(Error, Debug, Clone)]
#[error("invalid glob pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// Normalize a request path for matching.
///
/// Idempotent: normalizing an already-normalized path returns it unchanged.
pub fn normalize_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or_default();
    let path = path.split('#').next().unwrap_or_default();

    let mut normalized = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
    globs: GlobSet,
}

impl PathMatcher {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match an already-normalized path.
    pub fn is_match(&self, normalized_path: &str) -> bool {
        self.globs.is_match(normalized_path)
    }
}

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

/// Compile a glob pattern into a reusable matcher.
pub fn compile(pattern: &str) -> Result<PathMatcher, PatternError> {
    let to_error = |source| PatternError {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    builder.add(build_glob(pattern).map_err(to_error)?);

    // A trailing slash is stripped during normalization, so `base/**` has to
    // accept `base` for `base/` to match.
    if let Some(base) = pattern.strip_suffix("/**")
        && !base.is_empty()
        && !base.ends_with('/')
    {
        builder.add(build_glob(base).map_err(to_error)?);
    }

    let globs = builder.build().map_err(to_error)?;
    Ok(PathMatcher {
        pattern: pattern.to_string(),
        globs,
    })
}

/// Bounded least-recently-used cache of compiled matchers, keyed by pattern.
#[derive(Debug)]
pub struct MatcherCache {
    entries: Mutex<LruCache<String, Arc<PathMatcher>>>,
}

impl Default for MatcherCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::MIN.saturating_add(MATCHER_CACHE_CAPACITY - 1))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached matcher for `pattern`, compiling it on a miss.
    ///
    /// A hit promotes the entry to most-recently-used; inserting past
    /// capacity evicts the least-recently-used entry first. Patterns that
    /// fail to compile are not cached.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<PathMatcher>, PatternError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(matcher) = entries.get(pattern) {
            return Ok(Arc::clone(matcher));
        }

        let matcher = Arc::new(compile(pattern)?);
        if let Some((evicted, _)) = entries.push(pattern.to_string(), Arc::clone(&matcher)) {
            tracing::debug!(pattern = %evicted, "evicted glob matcher from cache");
        }
        Ok(matcher)
    }

    /// True iff any pattern matches the path. Empty `patterns` never match.
    pub fn matches_patterns(&self, path: &str, patterns: &[String]) -> bool {
        if patterns.is_empty() {
            return false;
        }
        self.matches_normalized(&normalize_path(path), patterns)
    }

    /// Like [`matches_patterns`](Self::matches_patterns) for a path that has
    /// already been through [`normalize_path`].
    ///
    /// A pattern that does not compile matches nothing and logs a warning.
    pub fn matches_normalized(&self, normalized_path: &str, patterns: &[String]) -> bool {
        patterns
            .iter()
            .any(|pattern| match self.get_or_compile(pattern) {
                Ok(matcher) => matcher.is_match(normalized_path),
                Err(err) => {
                    tracing::warn!("{err}; pattern ignored");
                    false
                }
            })
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `pattern` is cached, without touching its recency.
    pub fn contains(&self, pattern: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(pattern)
    }
}
