//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `BRACKET_PATTERN_CACHE`
//!
//! `on` (default) keeps compiled route patterns in a shared cache keyed by
//! template; `off` recompiles on every match. Turning it off is only useful
//! when measuring compilation cost.
//!
//! ### `BRACKET_BASE_PATH`
//!
//! Base path for routers built from route files that do not set one,
//! e.g. `/app` when the application is served from a subdirectory.
//! Default: empty.
//!
//! ## Usage
//!
//! ```rust
//! use bracket_router::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Pattern cache enabled: {}", config.pattern_cache);
//! ```

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Whether compiled patterns are cached (default: true)
    pub pattern_cache: bool,
    /// Base path applied when a route file does not set one (default: empty)
    pub base_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pattern_cache: true,
            base_path: String::new(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pattern_cache = match lookup("BRACKET_PATTERN_CACHE") {
            Some(val) => !matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "off" | "false" | "0" | "no"
            ),
            None => true,
        };
        let base_path = lookup("BRACKET_BASE_PATH").unwrap_or_default();
        RuntimeConfig {
            pattern_cache,
            base_path,
        }
    }
}
