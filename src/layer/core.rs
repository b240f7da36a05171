use crate::dispatch::{Flow, Next};
use crate::error::DecodeError;
use crate::params::Params;
use crate::pattern::{Key, MatchOptions, PathExpression, PathPattern};
use crate::request::Request;
use crate::response::Response;
use anyhow::anyhow;
use http::Method;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// Callable for a normal request handler.
pub type RequestFn = Arc<dyn Fn(Request, Response, Next)>;

/// Callable for an error handler.
pub type ErrorFn = Arc<dyn Fn(anyhow::Error, Request, Response, Next)>;

/// A handler with its role fixed at registration time.
///
/// The role decides which dispatch phase invokes the handler: request
/// handlers run while the chain is clean, error handlers run once an error is
/// pending. A layer whose role does not apply to the current phase forwards
/// the chain state untouched.
#[derive(Clone)]
pub enum Handler {
    Request(RequestFn),
    Error(ErrorFn),
}

impl Handler {
    /// Wrap a normal request handler.
    pub fn request<F>(f: F) -> Self
    where
        F: Fn(Request, Response, Next) + 'static,
    {
        Handler::Request(Arc::new(f))
    }

    /// Wrap an error handler.
    pub fn error<F>(f: F) -> Self
    where
        F: Fn(anyhow::Error, Request, Response, Next) + 'static,
    {
        Handler::Error(Arc::new(f))
    }

    #[must_use]
    pub fn is_error_handler(&self) -> bool {
        matches!(self, Handler::Error(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Request(_) => f.write_str("Handler::Request"),
            Handler::Error(_) => f.write_str("Handler::Error"),
        }
    }
}

/// Conversion into the flat handler list accepted by registration.
///
/// Implemented for closures (as request handlers), [`Handler`], vectors and
/// arrays of handlers, and tuples of any of these — nested tuples flatten in
/// order. The marker type parameter keeps the closure blanket apart from the
/// other impls; callers never name it.
pub trait IntoHandlers<M> {
    fn into_handlers(self) -> Vec<Handler>;
}

#[doc(hidden)]
pub struct ViaHandler;

#[doc(hidden)]
pub struct ViaFn;

#[doc(hidden)]
pub struct ViaList;

impl IntoHandlers<ViaHandler> for Handler {
    fn into_handlers(self) -> Vec<Handler> {
        vec![self]
    }
}

impl IntoHandlers<ViaList> for Vec<Handler> {
    fn into_handlers(self) -> Vec<Handler> {
        self
    }
}

impl<const N: usize> IntoHandlers<ViaList> for [Handler; N] {
    fn into_handlers(self) -> Vec<Handler> {
        self.into_iter().collect()
    }
}

impl<F> IntoHandlers<ViaFn> for F
where
    F: Fn(Request, Response, Next) + 'static,
{
    fn into_handlers(self) -> Vec<Handler> {
        vec![Handler::request(self)]
    }
}

macro_rules! tuple_into_handlers {
    ($( ( $($h:ident $m:ident),+ ) ),+ $(,)?) => {$(
        impl<$($h, $m),+> IntoHandlers<($($m,)+)> for ($($h,)+)
        where
            $($h: IntoHandlers<$m>),+
        {
            fn into_handlers(self) -> Vec<Handler> {
                #[allow(non_snake_case)]
                let ($($h,)+) = self;
                let mut handlers = Vec::new();
                $(handlers.extend($h.into_handlers());)+
                handlers
            }
        }
    )+};
}

tuple_into_handlers!(
    (H1 M1),
    (H1 M1, H2 M2),
    (H1 M1, H2 M2, H3 M3),
    (H1 M1, H2 M2, H3 M3, H4 M4),
    (H1 M1, H2 M2, H3 M3, H4 M4, H5 M5),
);

/// Result of a successful path match: the matched substring and the decoded
/// parameters, returned to the caller rather than stored on the layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathMatch {
    /// The substring of the request path the pattern consumed.
    pub path: String,
    /// Decoded captures keyed by the pattern's capture keys.
    pub params: Params,
}

/// Percent-decode a captured path segment.
///
/// Missing and empty inputs pass through undecoded. A `%` not followed by two
/// hex digits, or a decode producing invalid UTF-8, is a [`DecodeError`]
/// carrying the offending raw value and an HTTP 400 status.
pub fn decode_param(value: Option<&str>) -> Result<Option<String>, DecodeError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(Some(String::new()));
    }

    // urlencoding passes malformed escapes through verbatim; the contract
    // here is a hard 400.
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return Err(DecodeError::new(raw));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    match urlencoding::decode(raw) {
        Ok(decoded) => Ok(Some(decoded.into_owned())),
        Err(_) => Err(DecodeError::new(raw)),
    }
}

/// One compiled path pattern bound to one handler, optionally tagged with an
/// HTTP method.
pub struct Layer {
    pattern: PathPattern,
    handler: Handler,
    method: Option<Method>,
}

impl Layer {
    /// Build an untagged layer (matches any method already filtered
    /// upstream).
    pub fn new(expr: impl Into<PathExpression>, options: MatchOptions, handler: Handler) -> Self {
        Self {
            pattern: PathPattern::compile(expr, options),
            handler,
            method: None,
        }
    }

    /// Build a layer tagged with a method; dispatch skips it for requests
    /// resolved to a different method.
    pub fn with_method(
        method: Method,
        expr: impl Into<PathExpression>,
        options: MatchOptions,
        handler: Handler,
    ) -> Self {
        Self {
            pattern: PathPattern::compile(expr, options),
            handler,
            method: Some(method),
        }
    }

    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        self.pattern.keys()
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Match a request path against this layer's pattern.
    ///
    /// Returns `Ok(None)` for empty paths and non-matches. Decode failures
    /// propagate; they are the caller's to thread onto the dispatch chain.
    pub fn match_path(&self, path: &str) -> Result<Option<PathMatch>, DecodeError> {
        if path.is_empty() {
            return Ok(None);
        }

        // fast path non-ending match for / (any path matches)
        if self.pattern.fast_slash() {
            return Ok(Some(PathMatch::default()));
        }

        // fast path for * (everything matched in a param)
        if self.pattern.fast_star() {
            let mut params = Params::new();
            params.assign(Arc::from("0"), decode_param(Some(path))?);
            return Ok(Some(PathMatch {
                path: path.to_string(),
                params,
            }));
        }

        let Some((matched, groups)) = self.pattern.exec(path) else {
            return Ok(None);
        };

        let mut params = Params::new();
        for (key, raw) in self.pattern.keys().iter().zip(groups) {
            let value = decode_param(raw)?;
            params.assign(Arc::clone(&key.name), value);
        }

        Ok(Some(PathMatch {
            path: matched.to_string(),
            params,
        }))
    }

    /// Run this layer for a clean chain state.
    ///
    /// Error-role layers forward the state untouched. A panic inside the
    /// handler is caught and forwarded to the continuation as the pending
    /// error; the chain resumes with pre-invocation snapshots of the request
    /// and response.
    pub fn handle_request(&self, req: Request, res: Response, next: Next) {
        let Handler::Request(handler) = &self.handler else {
            return next.run(req, res, Flow::Continue);
        };

        let snapshot = (req.clone(), res.clone());
        let resume = next.resume();
        let outcome = catch_unwind(AssertUnwindSafe(|| (handler.as_ref())(req, res, next)));
        if let Err(panic) = outcome {
            let reason = panic_reason(panic.as_ref());
            error!(reason = %reason, "request handler panicked");
            let (req, res) = snapshot;
            resume.run(req, res, Flow::Fail(anyhow!("handler panicked: {reason}")));
        }
    }

    /// Run this layer for an error chain state.
    ///
    /// Request-role layers forward the error unchanged; error handlers are
    /// invoked with it. Panics are normalized exactly as in
    /// [`handle_request`](Layer::handle_request).
    pub fn handle_error(&self, err: anyhow::Error, req: Request, res: Response, next: Next) {
        let Handler::Error(handler) = &self.handler else {
            return next.run(req, res, Flow::Fail(err));
        };

        let snapshot = (req.clone(), res.clone());
        let resume = next.resume();
        let outcome = catch_unwind(AssertUnwindSafe(|| (handler.as_ref())(err, req, res, next)));
        if let Err(panic) = outcome {
            let reason = panic_reason(panic.as_ref());
            error!(reason = %reason, "error handler panicked");
            let (req, res) = snapshot;
            resume.run(req, res, Flow::Fail(anyhow!("handler panicked: {reason}")));
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("method", &self.method)
            .field("handler", &self.handler)
            .field("keys", &self.pattern.keys())
            .finish()
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
