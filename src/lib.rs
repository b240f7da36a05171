//! # stackroute
//!
//! **stackroute** is a single-route request matcher and continuation-passing
//! dispatcher: one route's worth of a router, specified precisely enough to
//! be the foundation a composing router is built on.
//!
//! ## Overview
//!
//! A [`Route`] owns an ordered stack of [`Layer`]s, each binding a compiled
//! path pattern to one [`Handler`] and optionally tagged with an HTTP method.
//! Dispatching a request walks the stack once, in registration order,
//! filtering by method, threading errors, and honoring flow-control signals —
//! all through an explicit continuation value ([`Flow`]) handed to each layer
//! via a single-use [`Next`] handle.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`pattern`]** - Path-expression compilation into anchored regexes with
//!   ordered capture keys
//! - **[`layer`]** - One pattern bound to one handler; matching, parameter
//!   decoding, and handler invocation with panic recovery
//! - **[`route`]** - The layer stack, per-method registration, and method
//!   capability introspection
//! - **[`dispatch`]** - The continuation-passing chain: flow signals,
//!   synchronous-depth limiting, and the completion callback
//! - **[`request`]** / **[`response`]** - The transport value types threaded
//!   through the chain
//! - **[`params`]** - Ordered small-vector parameter storage
//! - **[`ids`]** - ULID request identifiers for log correlation
//! - **[`error`]** - Decode and registration error types
//!
//! ## Request Flow
//!
//! 1. The owning router matches a request path to a route (via [`Layer`]
//!    matching) and extracts path parameters
//! 2. [`Route::dispatch`] resolves the effective method (HEAD falls back to
//!    GET unless HEAD layers exist) and records the route on the request
//! 3. Each eligible layer runs with ownership of the request/response and a
//!    [`Next`] continuation
//! 4. Errors — signalled or panicked — travel the same channel as flow
//!    control until an error handler recovers or the stack ends
//! 5. The `done` callback receives the terminal [`Flow`] exactly once
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use http::Method;
//! use stackroute::{Flow, Next, Request, Response, Route};
//!
//! let mut route = Route::new("/pets/{id}");
//! route
//!     .get(|req: Request, mut res: Response, next: Next| {
//!         res.status = 200;
//!         next.run(req, res, Flow::Continue);
//!     })
//!     .all(|req: Request, res: Response, next: Next| {
//!         next.run(req, res, Flow::Continue);
//!     });
//!
//! let route = Arc::new(route);
//! let req = Request::new(Method::GET, "/pets/42");
//! route.dispatch(req, Response::default(), |flow| {
//!     assert!(matches!(flow, Flow::Continue));
//! });
//! ```

pub mod dispatch;
pub mod error;
pub mod ids;
pub mod layer;
pub mod params;
pub mod pattern;
pub mod request;
pub mod response;
pub mod route;

pub use dispatch::{Done, Flow, Next, MAX_SYNC_STEPS};
pub use error::{DecodeError, RegistrationError};
pub use ids::RequestId;
pub use layer::{decode_param, Handler, IntoHandlers, Layer, PathMatch};
pub use params::{Params, MAX_INLINE_PARAMS};
pub use pattern::{Key, MatchOptions, PathExpression, PathPattern};
pub use request::{parse_query_params, HeaderVec, Request, MAX_INLINE_HEADERS};
pub use response::Response;
pub use route::{MethodSet, Route};
