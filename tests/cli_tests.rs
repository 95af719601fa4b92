use std::fs;
use std::process::Command;

const ROUTES: &str = r#"
routes:
  - method: GET
    path: /users/[i:id]
    target: users#show
    name: users_show
  - method: GET|POST
    path: /[:controller]/[:action].[:type]?
    target: generic
    name: generic
"#;

fn route_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.yaml");
    fs::write(&path, ROUTES).unwrap();
    (dir, path)
}

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bracket-router"));
    cmd.env_remove("BRACKET_BASE_PATH")
        .env_remove("RUST_LOG")
        .env("BRACKET_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_match_prints_params() {
    let (_dir, routes) = route_file();
    let output = cli()
        .arg("match")
        .arg("--routes")
        .arg(&routes)
        .arg("/users/42")
        .output()
        .expect("run cli");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("target: users#show"));
    assert!(stdout.contains("param id: 42"));
}

#[test]
fn test_cli_match_json_with_base_path() {
    let (_dir, routes) = route_file();
    let output = cli()
        .args(["--base-path", "/app", "match", "--json", "--method", "POST", "--routes"])
        .arg(&routes)
        .arg("/app/blog/show.json?x=1")
        .output()
        .expect("run cli");

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["target"], "generic");
    assert_eq!(body["params"]["controller"], "blog");
    assert_eq!(body["params"]["action"], "show");
    assert_eq!(body["params"]["type"], "json");
}

#[test]
fn test_cli_no_match_exits_with_one() {
    let (_dir, routes) = route_file();
    let output = cli()
        .arg("match")
        .arg("--routes")
        .arg(&routes)
        .args(["--method", "DELETE", "/users/42"])
        .output()
        .expect("run cli");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "no match: DELETE /users/42"
    );
}

#[test]
fn test_cli_generate() {
    let (_dir, routes) = route_file();
    let output = cli()
        .arg("generate")
        .arg("--routes")
        .arg(&routes)
        .args(["--name", "generic", "-p", "controller=blog", "-p", "action=list"])
        .output()
        .expect("run cli");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "/blog/list");
}

#[test]
fn test_cli_errors_exit_with_two() {
    let (_dir, routes) = route_file();
    let output = cli()
        .arg("generate")
        .arg("--routes")
        .arg(&routes)
        .args(["--name", "missing"])
        .output()
        .expect("run cli");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Route 'missing' does not exist."));
}

#[test]
fn test_cli_routes_lists_table() {
    let (_dir, routes) = route_file();
    let output = cli()
        .arg("routes")
        .arg("--routes")
        .arg(&routes)
        .output()
        .expect("run cli");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("/users/[i:id] -> users#show (users_show)"));
    assert!(lines[1].starts_with("GET|POST"));
}
