//! # Route Module
//!
//! A route is an ordered stack of [`Layer`](crate::Layer)s registered for one
//! path, partitioned by HTTP method. It is the unit a composing router is
//! built from: the router decides *which* route a request reaches, the route
//! decides *which handlers* run and in what order.
//!
//! ## Registration
//!
//! Handlers are appended per verb (`get`, `post`, ...), for an explicit
//! [`http::Method`] via [`Route::on`], or for every method via
//! [`Route::all`]. Insertion order is dispatch order and layers are never
//! removed. Method capability flags live in a fixed-shape [`MethodSet`]
//! bitfield over the nine standard verbs plus an explicit matches-all flag;
//! a HEAD capability is implied by GET until HEAD is registered explicitly.
//!
//! ## Dispatch
//!
//! Once built, a route is frozen behind an `Arc` and dispatched via
//! [`Route::dispatch`](crate::Route::dispatch); see the
//! [`dispatch`](crate::dispatch) module for the chain semantics.

mod core;
mod methods;
#[cfg(test)]
mod tests;

pub use core::Route;
pub use methods::MethodSet;
