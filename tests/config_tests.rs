use bracket_router::config::{load_routes, parse_routes, RouteFileFormat, RouterConfig};
use bracket_router::runtime_config::RuntimeConfig;
use bracket_router::{RouteSpec, Router, RouterError};
use std::io::Write;
use std::path::Path;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const YAML: &str = r#"
base_path: /app
match_types:
  cId: "[a-zA-Z]{2}[0-9](?:_[0-9]+)?"
routes:
  - method: GET|POST
    path: /
    target: home#index
    name: home
  - method: GET
    path: /orders/[cId:code]
    target: orders#show
    name: orders_show
  - method: GET
    path: "*"
    target: fallback
"#;

const JSON: &str = r#"{
  "match_types": { "slug": "[a-z0-9-]+" },
  "routes": [
    { "method": "GET", "path": "/posts/[slug:slug]", "target": "posts#show", "name": "post" },
    { "method": "DELETE", "path": "/posts/[i:id]", "target": "posts#destroy" }
  ]
}"#;

const TOML: &str = r#"
base_path = "/api"

[[routes]]
method = "GET"
path = "/users/[i:id]/[:action]?"
target = "users#show"
name = "users_show"

[[routes]]
method = "PUT"
path = "/users/[i:id]"
target = "users#update"
"#;

#[test]
fn test_format_from_extension() {
    assert_eq!(
        RouteFileFormat::from_path(Path::new("routes.yaml")),
        Some(RouteFileFormat::Yaml)
    );
    assert_eq!(
        RouteFileFormat::from_path(Path::new("routes.YML")),
        Some(RouteFileFormat::Yaml)
    );
    assert_eq!(
        RouteFileFormat::from_path(Path::new("routes.json")),
        Some(RouteFileFormat::Json)
    );
    assert_eq!(
        RouteFileFormat::from_path(Path::new("routes.toml")),
        Some(RouteFileFormat::Toml)
    );
    assert_eq!(RouteFileFormat::from_path(Path::new("routes.ini")), None);
    assert_eq!(RouteFileFormat::from_path(Path::new("routes")), None);
}

#[test]
fn test_load_yaml_route_file() {
    let file = write_temp(".yaml", YAML);
    let config = load_routes(file.path()).unwrap();

    assert_eq!(config.base_path.as_deref(), Some("/app"));
    assert_eq!(config.routes.len(), 3);
    assert_eq!(
        config.routes[1],
        RouteSpec::new("GET", "/orders/[cId:code]", "orders#show".to_string()).named("orders_show")
    );

    let router = Router::from_config(config, &RuntimeConfig::default()).unwrap();
    let m = router.match_request("/app/orders/AB1_2", "GET").unwrap();
    assert_eq!(m.target, "orders#show");
    assert_eq!(m.params.get("code"), Some("AB1_2"));

    let m = router.match_request("/app/", "post").unwrap();
    assert_eq!(m.name, Some("home"));

    let m = router.match_request("/app/orders/nope", "GET").unwrap();
    assert_eq!(m.target, "fallback");

    assert_eq!(
        router.generate("orders_show", &[("code", "XY9")]).unwrap(),
        "/app/orders/XY9"
    );
}

#[test]
fn test_load_json_route_file() {
    let file = write_temp(".json", JSON);
    let config = load_routes(file.path()).unwrap();
    assert_eq!(config.base_path, None);

    let runtime = RuntimeConfig {
        pattern_cache: true,
        base_path: "/blog".to_string(),
    };
    let router = Router::from_config(config, &runtime).unwrap();
    assert_eq!(router.base_path(), "/blog");

    let m = router.match_request("/blog/posts/hello-world", "GET").unwrap();
    assert_eq!(m.params.get("slug"), Some("hello-world"));
    assert_eq!(
        router.match_request("/blog/posts/7", "DELETE").unwrap().target,
        "posts#destroy"
    );
    assert!(router.match_request("/blog/posts/7", "GET").is_some());
    assert!(router.match_request("/blog/posts/Hello", "GET").is_none());
}

#[test]
fn test_load_toml_route_file() {
    let file = write_temp(".toml", TOML);
    let config = load_routes(file.path()).unwrap();
    assert!(config.match_types.is_empty());

    let runtime = RuntimeConfig {
        pattern_cache: false,
        base_path: "/ignored".to_string(),
    };
    let router = Router::from_config(config, &runtime).unwrap();
    assert_eq!(router.base_path(), "/api");

    let m = router.match_request("/api/users/5/edit", "GET").unwrap();
    assert_eq!(m.params.get("id"), Some("5"));
    assert_eq!(m.params.get("action"), Some("edit"));
    assert_eq!(
        router.match_request("/api/users/5", "PUT").unwrap().target,
        "users#update"
    );
    assert_eq!(
        router.generate("users_show", &[("id", 5)]).unwrap(),
        "/api/users/5"
    );
}

#[test]
fn test_parse_routes_defaults_for_missing_sections() {
    let config = parse_routes("{}", RouteFileFormat::Json).unwrap();
    assert_eq!(config, RouterConfig::default());
}

#[test]
fn test_invalid_content_is_reported() {
    let err = parse_routes("routes: [", RouteFileFormat::Yaml).unwrap_err();
    assert!(err.to_string().contains("invalid YAML route file"));

    let err = parse_routes("[[routes]]\nmethod = ", RouteFileFormat::Toml).unwrap_err();
    assert!(err.to_string().contains("invalid TOML route file"));
}

#[test]
fn test_unsupported_extension_rejected() {
    let file = write_temp(".ini", "routes = []");
    let err = load_routes(file.path()).unwrap_err();
    assert!(err.to_string().contains("unsupported route file extension"));
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_routes(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read route file"));
}

#[test]
fn test_unknown_alias_in_route_file() {
    let config = parse_routes(
        r#"{ "routes": [ { "method": "GET", "path": "/x/[num:id]", "target": "x" } ] }"#,
        RouteFileFormat::Json,
    )
    .unwrap();
    let err = Router::from_config(config, &RuntimeConfig::default()).unwrap_err();
    assert!(matches!(err, RouterError::UnknownMatchType { ref alias, .. } if alias == "num"));
}

#[test]
fn test_duplicate_name_in_route_file() {
    let config = parse_routes(
        r#"
routes:
  - { method: GET, path: /a, target: a, name: dup }
  - { method: GET, path: /b, target: b, name: dup }
"#,
        RouteFileFormat::Yaml,
    )
    .unwrap();
    let err = Router::from_config(config, &RuntimeConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Can not redeclare route 'dup'");
}
