//! # bracket-router
//!
//! **bracket-router** maps HTTP requests to targets through an ordered table
//! of bracket-template routes, and generates URLs back from named routes.
//!
//! ## Overview
//!
//! A route is a method set (`GET|POST`), a template and an opaque target.
//! Templates mix literal text with parameter blocks:
//!
//! ```text
//! /users/[i:id]/[:action]?     numeric id, optional trailing action
//! /files/[**:path]              greedy capture across '/'
//! @^/legacy/\d+$                raw regular expression
//! *                             every path
//! ```
//!
//! Matching walks the routes in registration order and returns the first
//! hit together with its captured parameters. Reverse routing substitutes
//! parameters into a named route's template.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - template parsing, match type aliases, pattern compilation
//!   and caching, per-route matching and URL generation
//! - **[`router`]** - the ordered route table, named routes and base path
//! - **[`config`]** - route files in YAML, JSON or TOML
//! - **[`runtime_config`]** - environment-driven router settings
//! - **[`otel`]** - structured logging setup for binaries
//! - **[`cli`]** - the `bracket-router` command line
//!
//! ## Example
//!
//! ```rust
//! use bracket_router::Router;
//!
//! # fn main() -> Result<(), bracket_router::RouterError> {
//! let mut router = Router::new();
//! router.add_match_types([("cId", "[a-zA-Z]{2}[0-9](?:_[0-9]+)?")])?;
//! router.get("/users/[i:id]", "users#show", Some("users_show"))?;
//! router.get("/orders/[cId:code]", "orders#show", None)?;
//!
//! let hit = router.match_request("/users/42?tab=posts", "GET").expect("match");
//! assert_eq!(*hit.target, "users#show");
//! assert_eq!(hit.params.get("id"), Some("42"));
//!
//! assert_eq!(router.generate("users_show", &[("id", 7)])?, "/users/7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Matching takes `&self` and keeps no per-request state, so a built router
//! can be shared across threads. Compiled patterns sit behind a shared cache.

pub mod cli;
pub mod config;
mod error;
pub mod otel;
pub mod pattern;
pub mod router;
pub mod runtime_config;

pub use error::RouterError;
pub use pattern::Params;
pub use router::{RouteMatch, RouteSpec, Router};
