//! Tests for layer matching and the transport value types
//!
//! # Test Coverage
//!
//! Exercises the public matching surface end to end:
//! - Fast-path layers (`"/"` in prefix mode, `"*"`)
//! - Template layers with decoded captures and decode failures
//! - Request construction: query parsing, headers, path params
//! - Response constructors and header handling

use http::Method;
use stackroute::{
    decode_param, Flow, Handler, Layer, MatchOptions, Next, Params, Request, Response,
};

fn noop() -> Handler {
    Handler::request(|req: Request, res: Response, next: Next| {
        next.run(req, res, Flow::Continue);
    })
}

#[test]
fn test_star_layer_matches_any_path() {
    let layer = Layer::new("*", MatchOptions::default(), noop());
    let matched = layer
        .match_path("/a/b%20c")
        .expect("no decode error")
        .expect("match");
    assert_eq!(matched.path, "/a/b%20c");
    assert_eq!(matched.params.get("0"), Some("/a/b c"));
}

#[test]
fn test_slash_layer_matches_any_path_with_empty_result() {
    let layer = Layer::new("/", MatchOptions { end: false }, noop());
    for path in ["/", "/a", "/a/b/c"] {
        let matched = layer
            .match_path(path)
            .expect("no decode error")
            .expect("match");
        assert_eq!(matched.path, "");
        assert!(matched.params.is_empty());
    }
}

#[test]
fn test_template_layer_extracts_and_decodes() {
    let layer = Layer::new(
        "/users/{user_id}/posts/{post_id}",
        MatchOptions::default(),
        noop(),
    );
    let matched = layer
        .match_path("/users/7/posts/hello%20world")
        .expect("no decode error")
        .expect("match");
    assert_eq!(matched.params.get("user_id"), Some("7"));
    assert_eq!(matched.params.get("post_id"), Some("hello world"));
}

#[test]
fn test_decode_failure_carries_status_400() {
    let layer = Layer::new("/items/{id}", MatchOptions::default(), noop());
    let err = layer.match_path("/items/%").expect_err("malformed escape");
    assert_eq!(err.status(), 400);
    assert_eq!(err.value(), "%");

    let err = decode_param(Some("%GG")).expect_err("malformed escape");
    assert_eq!(err.status(), 400);
}

#[test]
fn test_method_tag_is_visible() {
    let layer = Layer::with_method(Method::PUT, "/", MatchOptions { end: false }, noop());
    assert_eq!(layer.method(), Some(&Method::PUT));
    assert!(Layer::new("/", MatchOptions { end: false }, noop())
        .method()
        .is_none());
}

#[test]
fn test_request_parses_query_params() {
    let req = Request::new(Method::GET, "/search?q=rust%20router&limit=10&limit=20");
    assert_eq!(req.get_query_param("q"), Some("rust router"));
    // Repeated names keep the last value.
    assert_eq!(req.get_query_param("limit"), Some("20"));
    assert_eq!(req.get_query_param("missing"), None);
}

#[test]
fn test_request_headers_are_case_insensitive() {
    let mut req = Request::new(Method::GET, "/");
    req.set_header("Content-Type", "application/json");
    assert_eq!(req.get_header("content-type"), Some("application/json"));
    req.set_header("CONTENT-TYPE", "text/plain");
    assert_eq!(req.get_header("Content-Type"), Some("text/plain"));
    assert_eq!(req.headers().len(), 1);
}

#[test]
fn test_request_carries_path_params() {
    let mut req = Request::new(Method::GET, "/pets/42");
    let mut params = Params::new();
    params.insert("id", "42");
    req.set_path_params(params);
    assert_eq!(req.get_path_param("id"), Some("42"));
}

#[test]
fn test_response_constructors() {
    let res = Response::json(201, serde_json::json!({ "ok": true }));
    assert_eq!(res.status, 201);
    assert_eq!(res.get_header("Content-Type"), Some("application/json"));

    let res = Response::error(404, "no such pet");
    assert_eq!(res.status, 404);
    assert_eq!(res.body["error"], "no such pet");

    let res = Response::default();
    assert_eq!(res.status, 200);
    assert!(res.headers.is_empty());
}
