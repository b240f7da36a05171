//! Request value type threaded through the dispatch chain.

use crate::ids::RequestId;
use crate::params::Params;
use crate::route::Route;
use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage. Header names use `Arc<str>` because they
/// repeat across requests; values are per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// The request as seen by handlers.
///
/// Dispatch takes ownership of the request and threads it through the layer
/// stack; each handler receives it and passes it on through its
/// continuation. The dispatching [`Route`] records itself onto the request
/// before the first layer runs so handlers can introspect it.
#[derive(Debug, Clone)]
pub struct Request {
    request_id: RequestId,
    method: Method,
    path: String,
    headers: HeaderVec,
    query_params: Params,
    path_params: Params,
    body: Option<Value>,
    route: Option<Arc<Route>>,
}

impl Request {
    /// Build a request. Query parameters are parsed out of the path's query
    /// string immediately; a fresh request id is minted.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let query_params = parse_query_params(&path);
        Self {
            request_id: RequestId::new(),
            method,
            path,
            headers: HeaderVec::new(),
            query_params,
            path_params: Params::new(),
            body: None,
            route: None,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path, query string included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header (case-insensitive).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// Path parameters extracted by the owning router's match.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Record extracted path parameters, replacing any previous set.
    pub fn set_path_params(&mut self, params: Params) {
        self.path_params = params;
    }

    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name)
    }

    #[must_use]
    pub fn query_params(&self) -> &Params {
        &self.query_params
    }

    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name)
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// The route currently dispatching this request, once dispatch has
    /// begun.
    #[must_use]
    pub fn route(&self) -> Option<&Arc<Route>> {
        self.route.as_ref()
    }

    pub(crate) fn set_route(&mut self, route: Arc<Route>) {
        self.route = Some(route);
    }
}

/// Parse query string parameters from a request path.
///
/// Extracts everything after the `?` and URL-decodes names and values;
/// repeated names keep the last value.
#[must_use]
pub fn parse_query_params(path: &str) -> Params {
    let mut params = Params::new();
    if let Some(pos) = path.find('?') {
        for (name, value) in url::form_urlencoded::parse(path[pos + 1..].as_bytes()) {
            params.insert(name.as_ref(), value.as_ref());
        }
    }
    params
}
