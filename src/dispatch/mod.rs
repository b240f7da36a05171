//! # Dispatch Module
//!
//! The continuation-passing engine behind [`Route::dispatch`](crate::Route::dispatch).
//!
//! ## Chain semantics
//!
//! Dispatch walks the route's layer stack once per request. Each eligible
//! layer receives ownership of the request and response plus a single-use
//! [`Next`] continuation; it resumes the chain by calling
//! [`Next::run`] with a [`Flow`]:
//!
//! - [`Flow::Continue`] — proceed to the next layer.
//! - [`Flow::Fail`] — enter (or stay in) error mode; only error-role layers
//!   run until one recovers with `Continue`.
//! - [`Flow::SkipRoute`] — abort this route cleanly; `done` sees `Continue`.
//! - [`Flow::SkipRouter`] — abort this route and tell the enclosing
//!   composition to stop trying alternatives; `done` sees `SkipRouter`.
//!
//! Layers whose method tag differs from the resolved request method are
//! skipped. An error that survives the whole stack reaches `done` verbatim.
//!
//! ## Stack depth
//!
//! Handlers that call their continuation synchronously build native stack
//! depth. A run of more than [`MAX_SYNC_STEPS`] consecutive synchronous steps
//! parks the pending step on a deferral queue which the outermost active
//! invocation drains once the stack has unwound — one extra turn of latency
//! traded for bounded depth.
//!
//! ## Cooperative model
//!
//! One logical chain is active per dispatch call; per-call state is
//! `Rc`-shared and not `Send`. A handler may stash its `Next` (with the
//! request and response) and invoke it at any later point on the same
//! thread — the chain resumes where it left off. A handler that never calls
//! its continuation stalls that dispatch; that is the contract, not a
//! defect.

mod core;

pub use core::{Done, Flow, Next, MAX_SYNC_STEPS};
