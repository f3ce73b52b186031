//! Registered route entries.

use daedalus_core::ArcHandler;
use daedalus_middleware::ArcMiddleware;
use daedalus_router::PathPattern;
use http::Method;

/// One registered route.
///
/// An entry is created at registration time with its group prefix already
/// folded into the compiled pattern, and is immutable once the router is
/// built. The registry holds entries in registration order, which is also
/// their match-priority order.
#[derive(Clone)]
pub struct RouteEntry {
    /// The HTTP method this entry answers.
    method: Method,

    /// The compiled pattern, group prefix included.
    pattern: PathPattern,

    /// The handler dispatch resolves to.
    handler: ArcHandler,

    /// The entry's unique name, if registered with one.
    name: Option<String>,

    /// Middleware to run before the handler, in attachment order.
    middleware: Vec<ArcMiddleware>,
}

impl RouteEntry {
    /// Creates a new entry.
    pub(crate) fn new(
        method: Method,
        pattern: PathPattern,
        handler: ArcHandler,
        middleware: Vec<ArcMiddleware>,
    ) -> Self {
        Self {
            method,
            pattern,
            handler,
            name: None,
            middleware,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn push_middleware(&mut self, middleware: ArcMiddleware) {
        self.middleware.push(middleware);
    }

    pub(crate) fn handler(&self) -> ArcHandler {
        std::sync::Arc::clone(&self.handler)
    }

    /// Returns the HTTP method this entry answers.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns the entry's name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the entry's middleware in attachment order.
    #[must_use]
    pub fn middleware(&self) -> &[ArcMiddleware] {
        &self.middleware
    }

    /// Returns the names of the entry's middleware in attachment order.
    pub fn middleware_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.middleware.iter().map(|m| m.name())
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .field("middleware", &self.middleware_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
