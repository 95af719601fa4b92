//! # CLI Module
//!
//! Command-line access to a routing table stored in a route file
//! (see [`config`](crate::config)).
//!
//! ## Commands
//!
//! ### `match`
//!
//! Match a URL against the table and print the target, route name and params.
//! Exits with status 1 when nothing matches.
//!
//! ```bash
//! bracket-router match --routes routes.yaml --method POST /users/10/delete
//! ```
//!
//! ### `generate`
//!
//! Reverse-route a named route:
//!
//! ```bash
//! bracket-router generate --routes routes.yaml --name users_show -p id=5
//! ```
//!
//! ### `routes`
//!
//! List the table in registration order:
//!
//! ```bash
//! bracket-router routes --routes routes.yaml
//! ```
//!
//! A global `--base-path` overrides the route file and `BRACKET_BASE_PATH`.

mod commands;


pub use commands::{run_cli, Cli, CliStatus, Commands};
