//! # Layer Module
//!
//! A layer binds one compiled path pattern to one handler, optionally tagged
//! with an HTTP method. Layers are the unit a [`Route`](crate::Route) stacks
//! and dispatches over.
//!
//! ## Matching
//!
//! [`Layer::match_path`] runs the compiled pattern against a request path and
//! returns an immutable [`PathMatch`] value — matched substring plus decoded
//! parameters. Match results are request-scoped values held by the caller,
//! never stored on the layer, so a frozen layer can serve any number of
//! concurrent matches.
//!
//! Two fast paths bypass the regex entirely: a `"/"` prefix-matching layer
//! matches any path with empty captures, and a `"*"` layer captures the whole
//! (decoded) path under key `"0"`.
//!
//! ## Handlers
//!
//! [`Handler`] is an explicit tagged role chosen at registration:
//! [`Handler::request`] for the normal three-argument shape,
//! [`Handler::error`] for the error-consuming four-argument shape. During
//! dispatch each layer is offered the current chain state; a layer whose role
//! does not apply forwards the state unchanged. Handler panics are caught and
//! normalized into the continuation error channel.

mod core;

pub use core::{
    decode_param, ErrorFn, Handler, IntoHandlers, Layer, PathMatch, RequestFn, ViaFn, ViaHandler,
    ViaList,
};
