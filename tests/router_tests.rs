//! Tests for the route table and matching engine.
//!
//! Covers the structural matching rules: segment-count gating, literal
//! equality vs placeholder binding, registration-order tie-breaking, and
//! parameter extraction order.

use http::Method;
use microroute::router::Router;

use tracing_util::TestTracing;

fn assert_route_match(router: &Router, method: Method, path: &str, expected_handler: &str) {
    match router.route(&method, path) {
        Some(route_match) => {
            let handler = route_match.route.handler.to_string();
            assert_eq!(
                handler, expected_handler,
                "Handler mismatch for {} {}: expected '{}', got '{}'",
                method, path, expected_handler, handler
            );
        }
        None => {
            assert_eq!(
                expected_handler, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
}

#[test]
fn test_single_param_extraction() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/users/{id}", "UserController@show", &[]).unwrap();

    let m = router.route(&Method::GET, "/users/42").unwrap();
    assert_eq!(m.get_path_param("id"), Some("42"));
    assert_eq!(m.path_params_map().get("id").map(String::as_str), Some("42"));
}

#[test]
fn test_multi_param_extraction_order() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router
        .get("/users/{id}/posts/{postId}", "PostController@show", &[])
        .unwrap();

    let m = router.route(&Method::GET, "/users/7/posts/99").unwrap();
    assert_eq!(m.get_path_param("id"), Some("7"));
    assert_eq!(m.get_path_param("postId"), Some("99"));
    // Extraction follows left-to-right segment order.
    let names: Vec<&str> = m.path_params.iter().map(|(k, _)| k.as_ref()).collect();
    assert_eq!(names, vec!["id", "postId"]);
}

#[test]
fn test_segment_count_gate() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/users", "UserController@index", &[]).unwrap();
    router.get("/users/{id}", "UserController@show", &[]).unwrap();

    // Segment counts differ, so the two routes never shadow each other.
    assert_route_match(&router, Method::GET, "/users", "UserController@index");
    assert_route_match(&router, Method::GET, "/users/5", "UserController@show");
    assert_route_match(&router, Method::GET, "/users/5/extra", "<none>");
}

#[test]
fn test_literal_requires_exact_equality() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/users/{id}/posts", "PostController@index", &[]).unwrap();

    assert_route_match(&router, Method::GET, "/users/1/posts", "PostController@index");
    assert_route_match(&router, Method::GET, "/users/1/Posts", "<none>");
    assert_route_match(&router, Method::GET, "/users/1/post", "<none>");
}

#[test]
fn test_placeholder_matches_empty_segment() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/users/{id}/posts", "PostController@index", &[]).unwrap();

    let m = router.route(&Method::GET, "/users//posts").unwrap();
    assert_eq!(m.get_path_param("id"), Some(""));
}

#[test]
fn test_first_registered_route_wins() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/users/{id}", "UserController@show", &[]).unwrap();
    // More specific, but registered later: never selected for /users/me.
    router.get("/users/me", "UserController@me", &[]).unwrap();

    let m = router.route(&Method::GET, "/users/me").unwrap();
    assert_eq!(m.route.handler.to_string(), "UserController@show");
    assert_eq!(m.get_path_param("id"), Some("me"));
}

#[test]
fn test_identical_routes_coexist_earlier_wins() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/items", "ItemController@first", &[]).unwrap();
    router.get("/items", "ItemController@second", &[]).unwrap();

    assert_eq!(router.routes().len(), 2);
    assert_route_match(&router, Method::GET, "/items", "ItemController@first");
}

#[test]
fn test_duplicate_param_names_last_binding_wins() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/pair/{id}/{id}", "PairController@show", &[]).unwrap();

    let m = router.route(&Method::GET, "/pair/a/b").unwrap();
    // Both bindings are retained in segment order; lookups resolve to the last.
    assert_eq!(m.path_params.len(), 2);
    assert_eq!(m.get_path_param("id"), Some("b"));
    assert_eq!(m.path_params_map().get("id").map(String::as_str), Some("b"));
}

#[test]
fn test_method_must_match() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.post("/items", "ItemController@store", &[]).unwrap();

    assert_route_match(&router, Method::GET, "/items", "<none>");
    assert_route_match(&router, Method::POST, "/items", "ItemController@store");
}

#[test]
fn test_stray_brace_segments_are_literals() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/files/{id/raw", "FileController@raw", &[]).unwrap();

    // "{id" is not a placeholder, so only the literal path matches.
    assert_route_match(&router, Method::GET, "/files/{id/raw", "FileController@raw");
    assert_route_match(&router, Method::GET, "/files/123/raw", "<none>");
}

#[test]
fn test_register_is_case_insensitive() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router
        .register("delete", "/items/{id}", "ItemController@destroy", &[])
        .unwrap();

    assert_route_match(&router, Method::DELETE, "/items/9", "ItemController@destroy");
}

#[test]
fn test_registration_rejects_bad_input() {
    use microroute::route::RouteError;

    let _tracing = TestTracing::init();
    let mut router = Router::new();

    assert!(matches!(
        router.register("PATCH", "/items", "ItemController@patch", &[]),
        Err(RouteError::UnsupportedMethod { .. })
    ));
    assert!(matches!(
        router.get("", "ItemController@index", &[]),
        Err(RouteError::EmptyPattern)
    ));
    assert!(matches!(
        router.get("/items", "ItemController", &[]),
        Err(RouteError::MalformedHandlerReference { .. })
    ));
    assert!(matches!(
        router.get("/items", "Item@Controller@index", &[]),
        Err(RouteError::MalformedHandlerReference { .. })
    ));
    // Nothing was stored by the failed registrations.
    assert!(router.routes().is_empty());
}

#[test]
fn test_root_and_unknown_paths() {
    let _tracing = TestTracing::init();
    let mut router = Router::new();
    router.get("/", "HomeController@index", &[]).unwrap();

    assert_route_match(&router, Method::GET, "/", "HomeController@index");
    assert_route_match(&router, Method::GET, "/unknown/path", "<none>");
}
