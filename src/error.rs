//! Errors originated by this crate.
//!
//! Two kinds of failure start here: a capture-decode failure discovered while
//! matching a path (recoverable, carried down the dispatch chain so an error
//! handler may intercept it) and a registration-time rejection (fatal to the
//! registration call, never seen mid-dispatch). Everything else travelling on
//! the dispatch error channel is an opaque `anyhow::Error` supplied by
//! handlers.

use http::Method;
use std::fmt;

/// Failure to percent-decode a captured path parameter.
///
/// Carries the raw value that failed to decode and maps to an HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    value: String,
}

impl DecodeError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The raw captured value that failed to decode.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// HTTP status equivalent for this failure.
    #[must_use]
    pub fn status(&self) -> u16 {
        400
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode param '{}'", self.value)
    }
}

impl std::error::Error for DecodeError {}

/// Rejection of a handler registration call.
///
/// Returned by [`Route::on`](crate::Route::on) before any layer is appended;
/// the per-verb registration methods cannot produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The method is not one of the nine standard HTTP verbs the route's
    /// fixed method set can represent.
    UnsupportedMethod {
        /// The offending method name.
        method: String,
    },
}

impl RegistrationError {
    pub(crate) fn unsupported_method(method: &Method) -> Self {
        Self::UnsupportedMethod {
            method: method.as_str().to_string(),
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::UnsupportedMethod { method } => {
                write!(
                    f,
                    "Route.on() requires a standard HTTP method but got '{}'",
                    method
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}
