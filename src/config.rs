//! # Route File Module
//!
//! Loads a routing table from disk. The format is picked by extension:
//! `.yaml`/`.yml`, `.json` or `.toml`.
//!
//! ```yaml
//! base_path: /app
//! match_types:
//!   cId: "[a-zA-Z]{2}[0-9](?:_[0-9]+)?"
//! routes:
//!   - method: GET|POST
//!     path: /
//!     target: home#index
//!     name: home
//!   - method: GET
//!     path: /users/[i:id]
//!     target: users#show
//!     name: users_show
//! ```
//!
//! Match types are registered before any route, so routes may use them
//! regardless of their position in the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::error::RouterError;
use crate::router::{RouteSpec, Router};
use crate::runtime_config::RuntimeConfig;

/// Supported route file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFileFormat {
    Yaml,
    Json,
    Toml,
}

impl RouteFileFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Contents of a route file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Alias -> regex fragment, merged over the built-ins
    #[serde(default)]
    pub match_types: BTreeMap<String, String>,
    #[serde(default)]
    pub routes: Vec<RouteSpec<String>>,
}

/// Parse route file contents in the given format.
pub fn parse_routes(content: &str, format: RouteFileFormat) -> Result<RouterConfig> {
    let config = match format {
        RouteFileFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML route file")?,
        RouteFileFormat::Json => serde_json::from_str(content).context("invalid JSON route file")?,
        RouteFileFormat::Toml => toml::from_str(content).context("invalid TOML route file")?,
    };
    Ok(config)
}

/// Read and parse a route file, choosing the format by extension.
pub fn load_routes(path: &Path) -> Result<RouterConfig> {
    let Some(format) = RouteFileFormat::from_path(path) else {
        bail!(
            "unsupported route file extension for {} (expected .yaml, .yml, .json or .toml)",
            path.display()
        );
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    let config = parse_routes(&content, format)
        .with_context(|| format!("failed to parse route file {}", path.display()))?;
    info!(
        path = %path.display(),
        routes_count = config.routes.len(),
        match_types_count = config.match_types.len(),
        "Route file loaded"
    );
    Ok(config)
}

impl Router<String> {
    /// Build a router from a parsed route file.
    ///
    /// The file's base path wins over the runtime configuration's.
    ///
    /// # Errors
    ///
    /// Any registration error, see [`Router::map`].
    pub fn from_config(config: RouterConfig, runtime: &RuntimeConfig) -> Result<Self, RouterError> {
        let mut router = Router::with_runtime_config(runtime);
        if let Some(base_path) = config.base_path {
            router.set_base_path(base_path);
        }
        router.add_match_types(config.match_types)?;
        router.add_routes(config.routes)?;
        Ok(router)
    }
}
