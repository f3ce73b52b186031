//! Error types for Daedalus.
//!
//! The taxonomy is split by the phase that raises each error:
//!
//! | Error | Phase | Severity |
//! |---|---|---|
//! | [`RegistrationError`] | route registration / `build()` | fatal, fails startup |
//! | [`ResolveError`] | named-route URL generation | recoverable by caller |
//! | [`DispatchError`] | request dispatch | recoverable (generic 404) |
//!
//! Registration errors are never silently swallowed: a malformed route
//! table refuses to build. Dispatch can only fail with
//! [`DispatchError::NoMatch`], and only when no fallback handler is
//! configured. Handler and middleware failures are not router concerns and
//! propagate through whatever wraps dispatch.

use daedalus_router::PatternError;
use http::{Method, StatusCode};
use thiserror::Error;

/// Errors raised while registering routes, surfaced by `build()`.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A route pattern failed to compile.
    #[error("invalid route pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern string as registered, group prefix included.
        pattern: String,
        /// The underlying compilation failure.
        #[source]
        source: PatternError,
    },

    /// A route name was registered twice.
    #[error("route name '{name}' is already registered")]
    DuplicateRouteName {
        /// The repeated name.
        name: String,
    },

    /// `name()` was called before any route was registered.
    #[error("cannot name route '{name}': no route registered yet")]
    NameWithoutRoute {
        /// The orphaned name.
        name: String,
    },

    /// `middleware()` was called before any route was registered.
    #[error("cannot attach middleware '{middleware}': no route registered yet")]
    MiddlewareWithoutRoute {
        /// Name of the orphaned middleware.
        middleware: String,
    },
}

/// Errors raised while resolving a named route to a concrete path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The name was never attached to a route.
    #[error("unknown route name '{name}'")]
    UnknownRouteName {
        /// The unresolved name.
        name: String,
    },

    /// A parameter the pattern needs was not supplied.
    #[error("route '{name}' is missing a value for parameter '{parameter}'")]
    MissingParameter {
        /// The route name being resolved.
        name: String,
        /// The unsupplied parameter.
        parameter: String,
    },
}

/// Errors raised during dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No registered route matched and no fallback is configured.
    #[error("no route matches {method} {path}")]
    NoMatch {
        /// The request method.
        method: Method,
        /// The request path.
        path: String,
    },
}

impl DispatchError {
    /// Returns the HTTP status code the caller should surface.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NoMatch { .. } => StatusCode::NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_error_wraps_pattern_error() {
        let source = daedalus_router::PathPattern::parse("a/{x?}/b").unwrap_err();
        let error = RegistrationError::Pattern {
            pattern: "/a/{x?}/b".to_string(),
            source,
        };
        let message = error.to_string();
        assert!(message.contains("/a/{x?}/b"));
        assert!(message.contains("trailing"));
    }

    #[test]
    fn test_resolve_error_messages() {
        let error = ResolveError::UnknownRouteName {
            name: "profile".to_string(),
        };
        assert!(error.to_string().contains("profile"));

        let error = ResolveError::MissingParameter {
            name: "user.show".to_string(),
            parameter: "id".to_string(),
        };
        assert!(error.to_string().contains("user.show"));
        assert!(error.to_string().contains("id"));
    }

    #[test]
    fn test_no_match_maps_to_not_found() {
        let error = DispatchError::NoMatch {
            method: Method::GET,
            path: "/missing".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert!(error.to_string().contains("GET"));
        assert!(error.to_string().contains("/missing"));
    }
}
