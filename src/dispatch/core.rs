use crate::request::Request;
use crate::response::Response;
use crate::route::Route;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use http::Method;
use tracing::{debug, warn};

/// Maximum consecutive synchronous continuation steps before the next step is
/// deferred to the drain loop.
pub const MAX_SYNC_STEPS: u32 = 100;

/// The value a handler resumes the chain with, and the value `done`
/// ultimately receives.
///
/// `done` only ever sees `Continue` (clean completion or a route-level
/// abort), `Fail` (an error survived the stack), or `SkipRouter`.
#[derive(Debug)]
pub enum Flow {
    /// Proceed to the next layer.
    Continue,
    /// Enter error mode with this pending error.
    Fail(anyhow::Error),
    /// Abort the current route without error.
    SkipRoute,
    /// Abort the current route and the enclosing composition.
    SkipRouter,
}

impl Flow {
    /// Shorthand for `Flow::Fail` from any convertible error.
    pub fn fail(err: impl Into<anyhow::Error>) -> Self {
        Flow::Fail(err.into())
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Flow::Continue => "continue",
            Flow::Fail(_) => "fail",
            Flow::SkipRoute => "route",
            Flow::SkipRouter => "router",
        }
    }
}

/// Completion callback handed to [`Route::dispatch`]; invoked exactly once.
pub type Done = Box<dyn FnOnce(Flow)>;

/// Single-use continuation handle given to each invoked layer.
///
/// `run` consumes the handle, so one step cannot resume the chain twice. The
/// handle is not `Send`; it may be stashed and invoked later, but only on the
/// dispatching thread.
pub struct Next {
    state: Rc<DispatchState>,
}

impl Next {
    pub(crate) fn new(state: Rc<DispatchState>) -> Self {
        Self { state }
    }

    /// Resume the chain with the given flow.
    pub fn run(self, req: Request, res: Response, flow: Flow) {
        pump(&self.state, flow, req, res);
    }

    /// A second handle onto the same chain state, for resuming after a
    /// caught handler panic.
    pub(crate) fn resume(&self) -> Next {
        Next {
            state: Rc::clone(&self.state),
        }
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// Per-dispatch traversal state, shared by every `Next` handed out during one
/// call.
pub(crate) struct DispatchState {
    route: Arc<Route>,
    method: Method,
    cursor: Cell<usize>,
    sync_steps: Cell<u32>,
    deferred: RefCell<VecDeque<(Flow, Request, Response)>>,
    pumping: Cell<bool>,
    done: RefCell<Option<Done>>,
}

impl Route {
    /// Dispatch a request into this route's layer stack.
    ///
    /// `done` is invoked exactly once: with [`Flow::Continue`] on clean
    /// completion or an intentional route-level abort, with [`Flow::Fail`]
    /// when an error survived every layer, or with [`Flow::SkipRouter`].
    /// The route records itself onto the request before any layer runs.
    pub fn dispatch(
        self: Arc<Self>,
        mut req: Request,
        res: Response,
        done: impl FnOnce(Flow) + 'static,
    ) {
        if self.stack().is_empty() {
            debug!(path = %self.path(), "dispatch: route has no layers");
            done(Flow::Continue);
            return;
        }

        let method = self.effective_method(req.method());
        debug!(
            request_id = %req.request_id(),
            path = %req.path(),
            method = %method,
            layers = self.stack().len(),
            "dispatch start"
        );
        req.set_route(Arc::clone(&self));

        let state = Rc::new(DispatchState {
            route: self,
            method,
            cursor: Cell::new(0),
            sync_steps: Cell::new(0),
            deferred: RefCell::new(VecDeque::new()),
            pumping: Cell::new(false),
            done: RefCell::new(Some(Box::new(done))),
        });
        pump(&state, Flow::Continue, req, res);
    }
}

/// Entry point for every continuation invocation. The outermost active call
/// owns the deferral drain loop; re-entrant calls (handlers invoking `Next`
/// synchronously) just step and let the owner drain.
fn pump(state: &Rc<DispatchState>, flow: Flow, req: Request, res: Response) {
    if state.pumping.get() {
        step(state, flow, req, res);
        return;
    }

    state.pumping.set(true);
    step(state, flow, req, res);
    loop {
        let deferred = state.deferred.borrow_mut().pop_front();
        match deferred {
            Some((flow, req, res)) => step(state, flow, req, res),
            None => break,
        }
    }
    state.pumping.set(false);
}

fn step(state: &Rc<DispatchState>, flow: Flow, req: Request, res: Response) {
    match flow {
        // signal to exit route
        Flow::SkipRoute => {
            debug!(request_id = %req.request_id(), "dispatch: route abort signal");
            finish(state, Flow::Continue);
        }
        // signal to exit router
        Flow::SkipRouter => {
            debug!(request_id = %req.request_id(), "dispatch: router abort signal");
            finish(state, Flow::SkipRouter);
        }
        flow => {
            // max sync stack
            let steps = state.sync_steps.get() + 1;
            if steps > MAX_SYNC_STEPS {
                debug!(request_id = %req.request_id(), "dispatch: deferring step");
                state.sync_steps.set(0);
                state.deferred.borrow_mut().push_back((flow, req, res));
                return;
            }
            state.sync_steps.set(steps);

            let index = state.cursor.get();
            state.cursor.set(index + 1);

            // end of layers
            let Some(layer) = state.route.stack().get(index) else {
                finish(state, flow);
                return;
            };

            if layer.method().is_some_and(|m| *m != state.method) {
                step(state, flow, req, res);
            } else if let Flow::Fail(err) = flow {
                layer.handle_error(err, req, res, Next::new(Rc::clone(state)));
            } else {
                layer.handle_request(req, res, Next::new(Rc::clone(state)));
            }
            state.sync_steps.set(0);
        }
    }
}

fn finish(state: &Rc<DispatchState>, flow: Flow) {
    let done = state.done.borrow_mut().take();
    match done {
        Some(done) => {
            debug!(outcome = flow.label(), "dispatch complete");
            done(flow);
        }
        None => warn!("continuation invoked after dispatch already completed"),
    }
}
