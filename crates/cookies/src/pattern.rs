//! Name-keyed extraction of a single value from a `Cookie` request header.
//!
//! Each cookie name compiles to `(?:^|;) *<escaped name>=([^;]*)`; the first
//! match wins. Compiled patterns are memoised process-wide in a
//! [`PatternCache`] backed by `arc-swap`, so lookups never block. A pattern
//! is a pure function of its name, so two threads racing to insert the same
//! entry is harmless.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use regex::Regex;

use crate::error::CookieError;

/// Upper bound on memoised patterns. Names beyond it are compiled per call.
const MAX_PATTERNS: usize = 1024;

static PATTERNS: LazyLock<PatternCache> = LazyLock::new(PatternCache::new);

/// Lock-free memo of compiled cookie-name patterns.
#[derive(Debug)]
pub struct PatternCache {
    inner: ArcSwap<HashMap<String, Regex>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// The process-wide cache used by [`extract`].
    pub fn global() -> &'static PatternCache {
        &PATTERNS
    }

    /// Return the number of memoised patterns.
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    /// Return `true` if nothing is memoised yet.
    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    /// Return the pattern for `name`, compiling and memoising it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::InvalidPattern`] if the escaped pattern fails to
    /// compile.
    pub fn pattern(&self, name: &str) -> Result<Regex, CookieError> {
        if let Some(found) = self.inner.load().get(name) {
            return Ok(found.clone());
        }

        let compiled = Regex::new(&format!("(?:^|;) *{}=([^;]*)", regex::escape(name)))?;
        if self.len() < MAX_PATTERNS {
            self.inner.rcu(|current| {
                let mut next = HashMap::clone(current);
                next.insert(name.to_owned(), compiled.clone());
                Arc::new(next)
            });
        }
        Ok(compiled)
    }

    /// Extract the raw value of `name` from a `Cookie` header string.
    ///
    /// # Errors
    ///
    /// See [`PatternCache::pattern`].
    pub fn extract(&self, header: &str, name: &str) -> Result<Option<String>, CookieError> {
        let pattern = self.pattern(name)?;
        Ok(pattern
            .captures(header)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned()))
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `name` from a `Cookie` header using the process-wide cache.
///
/// # Errors
///
/// See [`PatternCache::pattern`].
pub fn extract(header: &str, name: &str) -> Result<Option<String>, CookieError> {
    PatternCache::global().extract(header, name)
}
