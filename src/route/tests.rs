use super::{MethodSet, Route};
use crate::dispatch::{Flow, Next};
use crate::layer::Handler;
use crate::request::Request;
use crate::response::Response;
use http::Method;

fn noop() -> Handler {
    Handler::request(|req: Request, res: Response, next: Next| {
        next.run(req, res, Flow::Continue);
    })
}

fn extension(name: &str) -> Method {
    Method::from_bytes(name.as_bytes()).expect("extension method")
}

#[test]
fn test_method_set_insert_and_contains() {
    let mut set = MethodSet::new();
    assert!(set.is_empty());
    assert!(set.insert(&Method::GET));
    assert!(set.contains(&Method::GET));
    assert!(!set.contains(&Method::POST));
    assert!(!set.matches_all());
}

#[test]
fn test_method_set_rejects_extension_methods() {
    let mut set = MethodSet::new();
    assert!(!MethodSet::is_known(&extension("PURGE")));
    assert!(!set.insert(&extension("PURGE")));
    assert!(!set.contains(&extension("PURGE")));
    assert!(set.is_empty());
}

#[test]
fn test_method_set_iterates_in_fixed_order() {
    let mut set = MethodSet::new();
    set.insert(&Method::PATCH);
    set.insert(&Method::GET);
    set.insert(&Method::POST);
    let methods: Vec<Method> = set.iter().collect();
    assert_eq!(methods, vec![Method::GET, Method::POST, Method::PATCH]);
}

#[test]
fn test_registration_tags_layers_and_flags() {
    let mut route = Route::new("/pets");
    route.get(noop()).post(noop());
    route.all(noop());

    assert_eq!(route.stack().len(), 3);
    assert_eq!(route.stack()[0].method(), Some(&Method::GET));
    assert_eq!(route.stack()[1].method(), Some(&Method::POST));
    assert!(route.stack()[2].method().is_none());
    assert!(route.methods().contains(&Method::GET));
    assert!(route.methods().contains(&Method::POST));
    assert!(route.methods().matches_all());
}

#[test]
fn test_registration_accepts_handler_tuples() {
    let mut route = Route::new("/pets");
    route.get((noop(), noop()));
    route.put(vec![noop(), noop(), noop()]);
    assert_eq!(route.stack().len(), 5);
}

#[test]
fn test_on_rejects_extension_method_before_appending() {
    let mut route = Route::new("/pets");
    let err = route
        .on(extension("FOOBAR"), noop())
        .expect_err("extension method");
    assert!(err.to_string().contains("FOOBAR"));
    assert!(err.to_string().contains("Route.on()"));
    assert!(route.stack().is_empty());
    assert!(route.methods().is_empty());
}

#[test]
fn test_on_accepts_standard_verbs() {
    let mut route = Route::new("/pets");
    route.on(Method::DELETE, noop()).expect("standard verb");
    assert_eq!(route.stack().len(), 1);
    assert!(route.methods().contains(&Method::DELETE));
}

#[test]
fn test_handles_method_with_all_flag() {
    let mut route = Route::new("/pets");
    route.all(noop());
    assert!(route.handles_method(&Method::GET));
    assert!(route.handles_method(&Method::DELETE));
    assert!(route.handles_method(&extension("PURGE")));
}

#[test]
fn test_handles_method_head_falls_back_to_get() {
    let mut route = Route::new("/pets");
    route.get(noop());
    assert!(route.handles_method(&Method::GET));
    assert!(route.handles_method(&Method::HEAD));
    assert!(!route.handles_method(&Method::POST));
}

#[test]
fn test_explicit_head_flag_takes_precedence() {
    let mut route = Route::new("/pets");
    route.head(noop());
    assert!(route.handles_method(&Method::HEAD));
    assert!(!route.handles_method(&Method::GET));
}

#[test]
fn test_supported_methods_synthesizes_head() {
    let mut route = Route::new("/pets");
    route.get(noop()).put(noop());
    let methods = route.supported_methods();
    assert_eq!(methods, vec![Method::GET, Method::PUT, Method::HEAD]);
}

#[test]
fn test_supported_methods_no_duplicate_head() {
    let mut route = Route::new("/pets");
    route.get(noop()).head(noop());
    let methods = route.supported_methods();
    assert_eq!(methods, vec![Method::GET, Method::HEAD]);
}

#[test]
fn test_effective_method_downgrades_head_without_head_layers() {
    let mut route = Route::new("/pets");
    route.get(noop());
    assert_eq!(route.effective_method(&Method::HEAD), Method::GET);
    assert_eq!(route.effective_method(&Method::GET), Method::GET);

    let mut with_head = Route::new("/pets");
    with_head.head(noop());
    assert_eq!(with_head.effective_method(&Method::HEAD), Method::HEAD);
}
