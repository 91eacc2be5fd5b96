mod common;

use common::temp_files::{create_temp_routes, create_temp_toml, create_temp_yaml};
use http::Method;
use routemount::dispatcher::{DispatchStatus, Dispatcher, Request};
use routemount::handler::ControllerRegistry;
use routemount::route_file::RouteFile;
use routemount::{HandlerRef, Params, ResponseBody, RouterError};
use std::sync::Arc;

const SAMPLE_YAML: &str = r#"
not_found: sample@notfound
on_complete: sample@success
before:
  - { methods: "GET|POST", pattern: "/admin/2.*", handler: "sample@auth" }
routes:
  - { methods: GET, pattern: /hello, handler: sample@hello }
  - { methods: GET, pattern: "/admin/(\\d+)", handler: sample@admin }
mounts:
  - prefix: /v1
    routes:
      - { methods: GET, pattern: /users, handler: users@index }
      - { methods: GET, pattern: "/users/{id}", handler: users@show }
"#;

const SAMPLE_TOML: &str = r#"
not_found = "sample@notfound"

[[routes]]
methods = "GET"
pattern = "/hello"
handler = "sample@hello"

[[mounts]]
prefix = "/v1"

[[mounts.routes]]
methods = "GET|POST"
pattern = "/users"
handler = "users@index"
"#;

fn writer(
    text: &'static str,
) -> impl Fn(&Params, &mut ResponseBody) -> anyhow::Result<()> + Send + Sync + 'static {
    move |_: &Params, out: &mut ResponseBody| {
        out.write_str(text);
        Ok(())
    }
}

fn sample_controllers() -> ControllerRegistry {
    let mut controllers = ControllerRegistry::new();
    controllers.register("sample", "notfound", writer("Not found! "));
    controllers.register("sample", "success", writer("Successfully worked! "));
    controllers.register("sample", "auth", writer("auth "));
    controllers.register("sample", "hello", writer("hello world!! "));
    controllers.register("sample", "admin", |params, out| {
        out.write_str(&format!("admin {} ", params.get(0).unwrap_or("?")));
        Ok(())
    });
    controllers.register("users", "index", writer("users "));
    controllers.register("users", "show", |params, out| {
        out.write_str(&format!("user {} ", params.get_named("id").unwrap_or("?")));
        Ok(())
    });
    controllers
}

fn body_of(
    dispatcher: &Dispatcher,
    on_complete: Option<&HandlerRef>,
    method: Method,
    uri: &str,
) -> (DispatchStatus, String) {
    let outcome = dispatcher
        .dispatch(&Request::new(method, uri), on_complete)
        .unwrap();
    (outcome.status, String::from_utf8(outcome.body).unwrap())
}

#[test]
fn test_yaml_route_file_end_to_end() {
    let file = create_temp_yaml(SAMPLE_YAML);
    let routes = RouteFile::load(file.path()).unwrap();
    assert_eq!(routes.route_count(), 4);
    assert_eq!(routes.before_count(), 1);

    let (router, on_complete) = routes.build_router().unwrap();
    let on_complete = on_complete.expect("file declares on_complete");
    let dispatcher = Dispatcher::new(Arc::new(router)).with_resolver(Arc::new(sample_controllers()));

    assert_eq!(
        body_of(&dispatcher, Some(&on_complete), Method::GET, "/admin/2"),
        (DispatchStatus::Handled, "auth admin 2 Successfully worked! ".to_string())
    );
    assert_eq!(
        body_of(&dispatcher, Some(&on_complete), Method::GET, "/admin/1"),
        (DispatchStatus::Handled, "admin 1 Successfully worked! ".to_string())
    );
    assert_eq!(
        body_of(&dispatcher, Some(&on_complete), Method::GET, "/v1/users/9"),
        (DispatchStatus::Handled, "user 9 Successfully worked! ".to_string())
    );
    assert_eq!(
        body_of(&dispatcher, Some(&on_complete), Method::GET, "/missing"),
        (DispatchStatus::NotFoundHandled, "Not found! ".to_string())
    );
}

#[test]
fn test_toml_route_file_end_to_end() {
    let file = create_temp_toml(SAMPLE_TOML);
    let routes = RouteFile::load(file.path()).unwrap();
    let (router, on_complete) = routes.build_router().unwrap();
    assert!(on_complete.is_none());

    let dispatcher = Dispatcher::new(Arc::new(router)).with_resolver(Arc::new(sample_controllers()));
    assert_eq!(
        body_of(&dispatcher, None, Method::POST, "/v1/users"),
        (DispatchStatus::Handled, "users ".to_string())
    );
    assert_eq!(
        body_of(&dispatcher, None, Method::GET, "/hello"),
        (DispatchStatus::Handled, "hello world!! ".to_string())
    );
}

#[test]
fn test_json_route_file_loads() {
    let file = create_temp_routes(
        r#"{"routes": [{"methods": "GET", "pattern": "/hello", "handler": "sample@hello"}]}"#,
        "json",
    );
    let routes = RouteFile::load(file.path()).unwrap();
    assert_eq!(routes.route_count(), 1);
    assert!(routes.not_found.is_none());
}

#[test]
fn test_unsupported_extension_rejected() {
    let file = create_temp_routes("routes: []", "txt");
    let err = RouteFile::load(file.path()).unwrap_err();
    match err {
        RouterError::RouteFile { reason, .. } => assert!(reason.contains("unsupported extension")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_file_rejected() {
    let err = RouteFile::load("/definitely/not/here/routes.yaml").unwrap_err();
    assert!(matches!(err, RouterError::RouteFile { .. }));
}

#[test]
fn test_invalid_pattern_in_file_fails_registration() {
    let file = create_temp_yaml("routes:\n  - { methods: GET, pattern: \"/(\", handler: x@y }\n");
    let routes = RouteFile::load(file.path()).unwrap();
    assert!(matches!(
        routes.build_router(),
        Err(RouterError::MalformedPattern { .. })
    ));
}

#[test]
fn test_unknown_controller_fails_dispatch() {
    let file = create_temp_yaml("routes:\n  - { methods: GET, pattern: /ghost, handler: ghost@boo }\n");
    let (router, _) = RouteFile::load(file.path()).unwrap().build_router().unwrap();
    let dispatcher = Dispatcher::new(Arc::new(router)).with_resolver(Arc::new(sample_controllers()));

    let err = dispatcher
        .dispatch(&Request::new(Method::GET, "/ghost"), None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RouterError>(),
        Some(RouterError::UnresolvableHandler { .. })
    ));
}
