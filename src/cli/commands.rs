use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::load_routes;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for bracket-router
#[derive(Parser, Debug)]
#[command(name = "bracket-router")]
#[command(about = "Match and reverse-route URLs against a bracket-template route file", long_about = None)]
pub struct Cli {
    /// Base path override (default: route file, then BRACKET_BASE_PATH)
    #[arg(long, global = true)]
    pub base_path: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match a request URL against the route file
    Match {
        /// Path to the route file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Request URL, query string allowed
        url: String,
    },
    /// Generate the URL of a named route
    Generate {
        /// Path to the route file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// Route name
        #[arg(short, long)]
        name: String,

        /// Parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// List the routes in registration order
    Routes {
        /// Path to the route file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,
    },
}

/// Outcome of a successfully executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliStatus {
    Success,
    /// `match` found no route
    NoMatch,
}

impl From<CliStatus> for ExitCode {
    fn from(status: CliStatus) -> Self {
        match status {
            CliStatus::Success => ExitCode::SUCCESS,
            CliStatus::NoMatch => ExitCode::from(1),
        }
    }
}

/// Execute a parsed command, writing results to `out`.
///
/// # Errors
///
/// Returns an error if:
/// - The route file cannot be read or parsed
/// - A route fails to register (unknown alias, malformed template, duplicate name)
/// - The method is not a valid HTTP token
/// - `generate` names an unknown route
pub fn run_cli<W: Write>(cli: Cli, out: &mut W) -> Result<CliStatus> {
    match cli.command {
        Commands::Match {
            routes,
            method,
            json,
            url,
        } => {
            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("invalid HTTP method '{method}'"))?;
            let router = build_router(&routes, cli.base_path)?;

            let Some(hit) = router.match_request(&url, method.as_str()) else {
                if json {
                    writeln!(out, "null")?;
                } else {
                    writeln!(out, "no match: {} {}", method, url)?;
                }
                return Ok(CliStatus::NoMatch);
            };

            if json {
                let params: serde_json::Map<String, serde_json::Value> = hit
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), json!(v)))
                    .collect();
                let body = json!({
                    "target": hit.target,
                    "name": hit.name,
                    "params": params,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(out, "target: {}", hit.target)?;
                writeln!(out, "name: {}", hit.name.unwrap_or("-"))?;
                writeln!(out, "template: {}", hit.template)?;
                for (key, value) in hit.params.iter() {
                    writeln!(out, "param {key}: {value}")?;
                }
            }
            Ok(CliStatus::Success)
        }
        Commands::Generate {
            routes,
            name,
            params,
        } => {
            let router = build_router(&routes, cli.base_path)?;
            let url = router.generate(&name, &params)?;
            writeln!(out, "{url}")?;
            Ok(CliStatus::Success)
        }
        Commands::Routes { routes } => {
            let router = build_router(&routes, cli.base_path)?;
            router.dump_routes();
            for route in router.routes() {
                writeln!(
                    out,
                    "{:<16} {}{} -> {}{}",
                    route.methods,
                    router.base_path(),
                    route.template,
                    route.target,
                    route
                        .name
                        .as_deref()
                        .map(|n| format!(" ({n})"))
                        .unwrap_or_default()
                )?;
            }
            Ok(CliStatus::Success)
        }
    }
}

fn build_router(path: &Path, base_path: Option<String>) -> Result<Router<String>> {
    let config = load_routes(path)?;
    let runtime = RuntimeConfig::from_env();
    let mut router = Router::from_config(config, &runtime)
        .with_context(|| format!("failed to build router from {}", path.display()))?;
    if let Some(base_path) = base_path {
        router.set_base_path(base_path);
    }
    Ok(router)
}

pub(super) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid param '{s}': expected key=value"))?;
    if key.is_empty() {
        return Err(format!("invalid param '{s}': empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}

