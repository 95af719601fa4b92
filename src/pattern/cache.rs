//! # Compiled Pattern Cache
//!
//! Compiling a bracket template into a regex is the expensive step of a match.
//! This cache stores compiled patterns keyed by the template string and shares
//! them across callers through `Arc`.
//!
//! ## Thread Safety
//!
//! The cache uses `Arc<RwLock<HashMap>>`:
//! - Multiple readers can look up patterns simultaneously
//! - Writers take exclusive access only for insertions and clears
//! - Cloning the cache shares the same storage
//!
//! The cache holds compiled patterns only. Captures are always returned to the
//! caller and never stored here.
//!
//! ## Configuration
//!
//! The cache can be disabled via `BRACKET_PATTERN_CACHE=off` (see
//! [`RuntimeConfig`](crate::runtime_config::RuntimeConfig)).

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use super::compiler::CompiledPattern;
use crate::error::RouterError;

/// Thread-safe cache of compiled route patterns.
#[derive(Debug, Clone)]
pub struct PatternCache {
    cache: Arc<RwLock<HashMap<String, Arc<CompiledPattern>>>>,
    enabled: bool,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PatternCache {
    /// Create a new pattern cache.
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether compiled patterns are retained (from `RuntimeConfig`)
    pub fn new(enabled: bool) -> Self {
        debug!(enabled = enabled, "Initializing compiled pattern cache");
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            enabled,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get a cached pattern or compile and cache a new one.
    ///
    /// When the cache is disabled, `compile` runs on every call and nothing
    /// is retained.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `compile`; failures are never cached.
    pub fn get_or_compile<F>(&self, template: &str, compile: F) -> Result<Arc<CompiledPattern>, RouterError>
    where
        F: FnOnce() -> Result<CompiledPattern, RouterError>,
    {
        if !self.enabled {
            return compile().map(Arc::new);
        }

        // Fast path: read lock only
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(pattern) = cache.get(template) {
                return Ok(Arc::clone(pattern));
            }
        }

        let compiled = Arc::new(compile()?);
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have compiled the same template while we waited
        if let Some(existing) = cache.get(template) {
            return Ok(Arc::clone(existing));
        }

        cache.insert(template.to_string(), Arc::clone(&compiled));
        debug!(
            template = template,
            pattern = %compiled.as_str(),
            cache_size = cache.len(),
            "Route pattern compiled and cached"
        );
        Ok(compiled)
    }

    /// Drop every cached pattern, e.g. after the match type table changed.
    pub fn clear(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let evicted = cache.len();
        cache.clear();
        info!(evicted = evicted, "Compiled pattern cache cleared");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
