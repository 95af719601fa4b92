//! # Router Module
//!
//! The router module holds the ordered route table: registration, request
//! matching and reverse URL generation by route name.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering routes (method set, template, target, optional unique name)
//! - Validating templates at registration so unknown aliases fail early
//! - Matching incoming requests in registration order, first match wins
//! - Stripping the query string and base path from incoming URLs
//! - Generating URLs for named routes
//!
//! ## Architecture
//!
//! Matching is delegated route by route to
//! [`RequestMatcher`](crate::pattern::RequestMatcher), which gates on the
//! method, takes the literal and wildcard fast paths, rejects on the literal
//! prefix and only then runs the compiled pattern. Compiled patterns are
//! shared through a cache keyed by template; captures are returned to the
//! caller, never kept on the router.
//!
//! ## Example
//!
//! ```rust
//! use bracket_router::router::Router;
//!
//! # fn main() -> Result<(), bracket_router::RouterError> {
//! let mut router = Router::new().with_base_path("/app");
//! router.post("/users/[i:id]/[:action]", "users#do", Some("users_do"))?;
//! router.all("*", "fallback", None)?;
//!
//! let hit = router.match_request("/app/users/10/update", "post").expect("match");
//! assert_eq!(hit.name, Some("users_do"));
//! assert_eq!(hit.params.get("action"), Some("update"));
//!
//! let fallback = router.match_request("/app/anything", "GET").expect("match");
//! assert!(fallback.params.is_empty());
//! # Ok(())
//! # }
//! ```

mod core;

pub use self::core::{Route, RouteMatch, RouteSpec, Router, ALL_METHODS};
