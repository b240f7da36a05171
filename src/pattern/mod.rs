//! # Pattern Module
//!
//! Path-expression compilation for layer matching. A path expression — a
//! literal template, a prebuilt regex, or a list of either — is compiled once
//! into an anchored [`regex::Regex`] plus an ordered capture-key list, then
//! executed against request paths at match time.
//!
//! ## Template syntax
//!
//! Literal templates are segment-based: `{name}` captures one segment
//! (`/pets/{id}` matches `/pets/42` with `id = 42`), `*` captures the rest of
//! the path under a positional key (`"0"`, `"1"`, ...). Everything else is
//! matched literally, regex metacharacters included.
//!
//! ## End vs. prefix matching
//!
//! [`MatchOptions::end`] controls whether a match must consume the whole
//! path. Prefix (non-end) matches must stop at a `/` boundary or the end of
//! the input, so `/pets` can prefix-match `/pets/42` but not `/petstore`.
//!
//! Two fast-path flags are precomputed at compile time and consumed by the
//! layer matcher: the literal `"/"` with prefix matching (matches any path)
//! and the literal `"*"` (captures the whole path).

mod core;

pub use core::{Key, MatchOptions, PathExpression, PathPattern};
