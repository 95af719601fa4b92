//! Router core - the ordered route table and the request hot path.

use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::error::RouterError;
use crate::pattern::{
    MatchTypeTable, ParamLookup, Params, PatternCache, PatternCompiler, RequestMatcher,
    UrlGenerator,
};
use crate::runtime_config::RuntimeConfig;

/// Method set used by [`Router::all`].
pub const ALL_METHODS: &str = "GET|POST";

/// Matches slower than this are logged at `warn`.
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// One registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<T> {
    /// `|`-joined HTTP methods, compared case-insensitively
    pub methods: String,
    /// Route template, without the base path
    pub template: String,
    /// Opaque value handed back on a match
    pub target: T,
    /// Optional unique name used for reverse generation
    pub name: Option<String>,
}

/// Route definition for bulk registration and route files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec<T> {
    /// `|`-joined HTTP methods, e.g. `GET|POST`
    pub method: String,
    /// Route template, e.g. `/users/[i:id]`
    pub path: String,
    pub target: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl<T> RouteSpec<T> {
    pub fn new(method: impl Into<String>, path: impl Into<String>, target: T) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            target,
            name: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// Target of the matched route
    pub target: &'a T,
    /// Named parameters extracted from the path
    pub params: Params,
    /// Name of the matched route, if it has one
    pub name: Option<&'a str>,
    /// Template of the matched route
    pub template: &'a str,
}

/// Ordered, first-match-wins route table.
///
/// Routes are tried in registration order; there is no ranking by
/// specificity. A `*` route registered last acts as a fallback.
///
/// # Example
///
/// ```rust
/// use bracket_router::Router;
///
/// # fn main() -> Result<(), bracket_router::RouterError> {
/// let mut router = Router::new();
/// router.get("/users/[i:id]", "users#show", Some("users_show"))?;
/// router.map("GET|POST", "/", "home#index", Some("home"))?;
///
/// let m = router.match_request("/users/42?tab=posts", "GET").expect("route");
/// assert_eq!(*m.target, "users#show");
/// assert_eq!(m.params.get("id"), Some("42"));
///
/// assert_eq!(router.generate("users_show", &[("id", 7)])?, "/users/7");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Router<T> {
    routes: Vec<Route<T>>,
    /// Route name -> index into `routes`
    named_routes: HashMap<String, usize>,
    base_path: String,
    matcher: RequestMatcher,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Create an empty router with the built-in match types and an
    /// enabled pattern cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runtime_config(&RuntimeConfig::default())
    }

    /// Create an empty router configured from a [`RuntimeConfig`].
    #[must_use]
    pub fn with_runtime_config(config: &RuntimeConfig) -> Self {
        let compiler = PatternCompiler::new(
            MatchTypeTable::new(),
            PatternCache::new(config.pattern_cache),
        );
        Self {
            routes: Vec::new(),
            named_routes: HashMap::new(),
            base_path: config.base_path.clone(),
            matcher: RequestMatcher::new(compiler),
        }
    }

    /// Builder-style variant of [`Router::set_base_path`].
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.set_base_path(base_path);
        self
    }

    /// Set the base path, e.g. when the application lives in a subdirectory.
    ///
    /// It is stripped from incoming paths before matching and prepended to
    /// generated URLs.
    pub fn set_base_path(&mut self, base_path: impl Into<String>) {
        self.base_path = base_path.into();
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn match_types(&self) -> &MatchTypeTable {
        self.matcher.compiler().match_types()
    }

    /// Register additional match types. Later registrations win, including
    /// over the built-ins.
    ///
    /// Every registered route is re-validated against the new table.
    ///
    /// # Errors
    ///
    /// The first compilation error among registered routes, e.g. when an
    /// override produces an invalid pattern. The new types stay registered.
    pub fn add_match_types<I, K, V>(&mut self, match_types: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.matcher.compiler_mut().add_match_types(match_types);
        for route in &self.routes {
            self.matcher.prepare(&route.template)?;
        }
        Ok(())
    }

    /// Map a route to a target.
    ///
    /// # Arguments
    ///
    /// * `methods` - One method or a `|`-joined list (`GET|POST|PATCH|PUT|DELETE`)
    /// * `template` - Route template; raw patterns start with `@`, `*` matches anything
    /// * `target` - Any value; returned on a match
    /// * `name` - Optional unique name for reverse routing
    ///
    /// # Errors
    ///
    /// * [`RouterError::DuplicateRouteName`] - the name is already registered
    /// * [`RouterError::UnknownMatchType`], [`RouterError::TemplateSyntax`],
    ///   [`RouterError::InvalidPattern`] - the template cannot be compiled
    pub fn map(
        &mut self,
        methods: &str,
        template: &str,
        target: T,
        name: Option<&str>,
    ) -> Result<(), RouterError> {
        if let Some(name) = name {
            if self.named_routes.contains_key(name) {
                return Err(RouterError::DuplicateRouteName {
                    name: name.to_string(),
                });
            }
        }

        self.matcher.prepare(template)?;

        if let Some(name) = name {
            self.named_routes.insert(name.to_string(), self.routes.len());
        }
        debug!(
            methods = methods,
            route_pattern = template,
            route_name = name,
            index = self.routes.len(),
            "Route registered"
        );
        self.routes.push(Route {
            methods: methods.to_string(),
            template: template.to_string(),
            target,
            name: name.map(str::to_string),
        });
        Ok(())
    }

    /// Register routes in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first error returned by [`Router::map`]; routes before it stay
    /// registered.
    pub fn add_routes<I>(&mut self, routes: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = RouteSpec<T>>,
    {
        for route in routes {
            self.map(&route.method, &route.path, route.target, route.name.as_deref())?;
        }
        info!(
            routes_count = self.routes.len(),
            base_path = %self.base_path,
            "Routing table loaded"
        );
        Ok(())
    }

    /// Map a `GET` route.
    ///
    /// # Errors
    ///
    /// See [`Router::map`].
    pub fn get(&mut self, template: &str, target: T, name: Option<&str>) -> Result<(), RouterError> {
        self.map(Method::GET.as_str(), template, target, name)
    }

    /// Map a `POST` route.
    ///
    /// # Errors
    ///
    /// See [`Router::map`].
    pub fn post(&mut self, template: &str, target: T, name: Option<&str>) -> Result<(), RouterError> {
        self.map(Method::POST.as_str(), template, target, name)
    }

    /// Map a `PUT` route.
    ///
    /// # Errors
    ///
    /// See [`Router::map`].
    pub fn put(&mut self, template: &str, target: T, name: Option<&str>) -> Result<(), RouterError> {
        self.map(Method::PUT.as_str(), template, target, name)
    }

    /// Map a `PATCH` route.
    ///
    /// # Errors
    ///
    /// See [`Router::map`].
    pub fn patch(&mut self, template: &str, target: T, name: Option<&str>) -> Result<(), RouterError> {
        self.map(Method::PATCH.as_str(), template, target, name)
    }

    /// Map a `DELETE` route.
    ///
    /// # Errors
    ///
    /// See [`Router::map`].
    pub fn delete(&mut self, template: &str, target: T, name: Option<&str>) -> Result<(), RouterError> {
        self.map(Method::DELETE.as_str(), template, target, name)
    }

    /// Map a route for every method in [`ALL_METHODS`].
    ///
    /// # Errors
    ///
    /// See [`Router::map`].
    pub fn all(&mut self, template: &str, target: T, name: Option<&str>) -> Result<(), RouterError> {
        self.map(ALL_METHODS, template, target, name)
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// The route registered under `name`.
    #[must_use]
    pub fn named_route(&self, name: &str) -> Option<&Route<T>> {
        self.named_routes.get(name).and_then(|&i| self.routes.get(i))
    }

    /// Template of the route registered under `name`.
    #[must_use]
    pub fn route_template(&self, name: &str) -> Option<&str> {
        self.named_route(name).map(|route| route.template.as_str())
    }

    /// Reverse routing: the URL of a named route with its blocks filled in.
    ///
    /// Optional blocks without a value are dropped; required blocks without
    /// a value stay in the URL verbatim.
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownRouteName`] if no route carries `name`.
    pub fn generate<P>(&self, name: &str, params: &P) -> Result<String, RouterError>
    where
        P: ParamLookup + ?Sized,
    {
        let template = self
            .route_template(name)
            .ok_or_else(|| RouterError::UnknownRouteName {
                name: name.to_string(),
            })?;
        UrlGenerator::generate(&self.base_path, template, params)
    }

    /// Match a request URL and method against the table.
    ///
    /// The query string is discarded and the base path stripped before
    /// comparison. The first matching route wins.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - target, named params and route name
    /// * `None` - no route matched, or the URL lies outside the base path
    #[must_use]
    pub fn match_request(&self, url: &str, method: &str) -> Option<RouteMatch<'_, T>> {
        let Some(path) = self.request_path(url) else {
            debug!(
                method = method,
                url = url,
                base_path = %self.base_path,
                "Request outside base path"
            );
            return None;
        };
        debug!(method = method, path = path, "Route match attempt");

        let match_start = Instant::now();
        for route in &self.routes {
            let params = match self
                .matcher
                .match_route(&route.methods, &route.template, path, method)
            {
                Ok(Some(params)) => params,
                Ok(None) => continue,
                Err(e) => {
                    error!(
                        route_pattern = %route.template,
                        error = %e,
                        "Route pattern failed to compile; skipping route"
                    );
                    continue;
                }
            };

            let match_duration = match_start.elapsed();
            if match_duration > SLOW_MATCH {
                warn!(
                    method = method,
                    path = path,
                    route_pattern = %route.template,
                    route_name = route.name.as_deref(),
                    path_params = ?params,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                info!(
                    method = method,
                    path = path,
                    route_pattern = %route.template,
                    route_name = route.name.as_deref(),
                    path_params = ?params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }

            return Some(RouteMatch {
                target: &route.target,
                params,
                name: route.name.as_deref(),
                template: &route.template,
            });
        }

        warn!(
            method = method,
            path = path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }

    /// Log every registered route at `info`.
    pub fn dump_routes(&self) {
        info!(
            base_path = %self.base_path,
            count = self.routes.len(),
            "Route table"
        );
        for route in &self.routes {
            info!(
                methods = %route.methods,
                route_pattern = %format_args!("{}{}", self.base_path, route.template),
                route_name = route.name.as_deref(),
                "Route"
            );
        }
    }

    /// Path relative to the base path, query string removed. `None` when the
    /// path does not start with the base path at a segment boundary.
    fn request_path<'u>(&self, url: &'u str) -> Option<&'u str> {
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        if self.base_path.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(self.base_path.as_str())?;
        let at_boundary =
            rest.is_empty() || rest.starts_with('/') || self.base_path.ends_with('/');
        at_boundary.then_some(rest)
    }
}
