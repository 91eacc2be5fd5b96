//! Unit tests for CLI commands

use crate::cli::commands::build_request;
use crate::cli::{Cli, Commands, OutputFormat};
use clap::Parser;
use http::Method;

#[test]
fn test_routes_command_parses() {
    let cli = Cli::try_parse_from(["routemount", "routes", "--routes", "routes.yaml"]).unwrap();
    match cli.command {
        Commands::Routes { routes } => {
            assert_eq!(routes.unwrap().to_string_lossy(), "routes.yaml");
        }
        _ => panic!("Expected Routes command"),
    }
}

#[test]
fn test_resolve_command_with_flags() {
    let cli = Cli::try_parse_from([
        "routemount",
        "resolve",
        "--routes",
        "routes.toml",
        "--method",
        "POST",
        "--path",
        "/admin/2?x=1",
        "-H",
        "X-HTTP-Method-Override: DELETE",
        "--format",
        "json",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            method,
            path,
            headers,
            format,
            ..
        } => {
            assert_eq!(method, "POST");
            assert_eq!(path, "/admin/2?x=1");
            assert_eq!(headers, vec!["X-HTTP-Method-Override: DELETE"]);
            assert_eq!(format, OutputFormat::Json);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_resolve_requires_path() {
    assert!(Cli::try_parse_from(["routemount", "resolve", "--routes", "r.yaml"]).is_err());
}

#[test]
fn test_build_request() {
    let request = build_request(
        "post",
        "/app/admin?x=1",
        &["X-HTTP-Method-Override: PATCH".to_string()],
        Some("/app/index.php".to_string()),
    )
    .unwrap();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.effective_method(), Method::PATCH);
    assert_eq!(request.current_path(), "/admin");
}

#[test]
fn test_build_request_rejects_bad_header() {
    assert!(build_request("GET", "/", &["no-colon".to_string()], None).is_err());
}
