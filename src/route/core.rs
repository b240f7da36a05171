use crate::error::RegistrationError;
use crate::layer::{Handler, IntoHandlers, Layer};
use crate::pattern::MatchOptions;
use http::Method;
use tracing::debug;

use super::methods::MethodSet;

/// An ordered stack of layers registered for one path, partitioned by HTTP
/// method.
///
/// Build and register mutably, then freeze behind an `Arc` for dispatch:
///
/// ```no_run
/// use std::sync::Arc;
/// use stackroute::{Flow, Next, Request, Response, Route};
/// use http::Method;
///
/// let mut route = Route::new("/pets/{id}");
/// route.get(|req: Request, res: Response, next: Next| {
///     next.run(req, res, Flow::Continue);
/// });
///
/// let route = Arc::new(route);
/// let req = Request::new(Method::GET, "/pets/42");
/// route.dispatch(req, Response::default(), |flow| {
///     assert!(matches!(flow, Flow::Continue));
/// });
/// ```
#[derive(Debug)]
pub struct Route {
    path: String,
    stack: Vec<Layer>,
    methods: MethodSet,
}

impl Route {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        debug!(path = %path, "new route");
        Self {
            path,
            stack: Vec::new(),
            methods: MethodSet::new(),
        }
    }

    /// The path this route was declared for (informational; matching against
    /// it is the owning router's job).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The layer stack in registration (and dispatch) order.
    #[must_use]
    pub fn stack(&self) -> &[Layer] {
        &self.stack
    }

    /// The method capability flags.
    #[must_use]
    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    /// Register handlers for every method and set the matches-all flag.
    pub fn all<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(None, handlers.into_handlers());
        self
    }

    /// Register handlers for an explicit method.
    ///
    /// Fails for methods outside the fixed verb set before any layer is
    /// appended; handlers accepted by an earlier call stay registered.
    pub fn on<M>(
        &mut self,
        method: Method,
        handlers: impl IntoHandlers<M>,
    ) -> Result<&mut Self, RegistrationError> {
        if !MethodSet::is_known(&method) {
            return Err(RegistrationError::unsupported_method(&method));
        }
        self.append(Some(method), handlers.into_handlers());
        Ok(self)
    }

    pub fn get<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::GET), handlers.into_handlers());
        self
    }

    pub fn head<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::HEAD), handlers.into_handlers());
        self
    }

    pub fn post<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::POST), handlers.into_handlers());
        self
    }

    pub fn put<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::PUT), handlers.into_handlers());
        self
    }

    pub fn delete<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::DELETE), handlers.into_handlers());
        self
    }

    pub fn connect<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::CONNECT), handlers.into_handlers());
        self
    }

    pub fn options<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::OPTIONS), handlers.into_handlers());
        self
    }

    pub fn trace<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::TRACE), handlers.into_handlers());
        self
    }

    pub fn patch<M>(&mut self, handlers: impl IntoHandlers<M>) -> &mut Self {
        self.append(Some(Method::PATCH), handlers.into_handlers());
        self
    }

    /// Determine if the route handles a given method.
    ///
    /// True for everything once the matches-all flag is set; HEAD falls back
    /// to GET while no HEAD layer was registered explicitly.
    #[must_use]
    pub fn handles_method(&self, method: &Method) -> bool {
        if self.methods.matches_all() {
            return true;
        }
        if *method == Method::HEAD && !self.methods.contains(&Method::HEAD) {
            return self.methods.contains(&Method::GET);
        }
        self.methods.contains(method)
    }

    /// The methods this route supports, with HEAD synthesized from GET when
    /// it was never registered explicitly.
    #[must_use]
    pub fn supported_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.methods.iter().collect();
        if self.methods.contains(&Method::GET) && !self.methods.contains(&Method::HEAD) {
            methods.push(Method::HEAD);
        }
        methods
    }

    /// The method dispatch filters layers by: the request method, with HEAD
    /// downgraded to GET while no layer carries an explicit HEAD tag.
    pub(crate) fn effective_method(&self, method: &Method) -> Method {
        if *method == Method::HEAD && !self.methods.contains(&Method::HEAD) {
            Method::GET
        } else {
            method.clone()
        }
    }

    fn append(&mut self, method: Option<Method>, handlers: Vec<Handler>) {
        for handler in handlers {
            debug!(path = %self.path, method = ?method, handler = ?handler, "register layer");
            // Layers are bound to "/" in prefix mode so they match any
            // remainder of the route's own matched path.
            let layer = match &method {
                Some(m) => {
                    Layer::with_method(m.clone(), "/", MatchOptions { end: false }, handler)
                }
                None => Layer::new("/", MatchOptions { end: false }, handler),
            };
            match &method {
                Some(m) => {
                    self.methods.insert(m);
                }
                None => self.methods.mark_all(),
            }
            self.stack.push(layer);
        }
    }
}
