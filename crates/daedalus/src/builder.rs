//! Route registration.
//!
//! [`RouterBuilder`] is the mutable registration surface. All registration
//! happens at application bootstrap; [`RouterBuilder::build`] then freezes
//! the table into an immutable [`Router`]. Pattern and naming problems are
//! recorded as they occur and surfaced by `build()`, so a misconfigured
//! route table fails startup instead of misrouting traffic later.

use std::collections::HashMap;
use std::sync::Arc;

use daedalus_core::{
    ArcHandler, BoxFuture, Handler, RegistrationError, RequestContext, Response,
};
use daedalus_middleware::ArcMiddleware;
use daedalus_router::PathPattern;
use http::{Method, StatusCode};

use crate::entry::RouteEntry;
use crate::router::Router;

/// Builder for a [`Router`].
///
/// Routes are appended in call order, and that order is match priority:
/// when two entries could both match a path, the earlier-registered one
/// wins.
///
/// # Example
///
/// ```rust
/// use daedalus::{Router, RouterBuilder};
/// use daedalus_core::{FnHandler, RequestContext, Response};
///
/// let mut builder = Router::builder();
/// builder
///     .get("/", FnHandler::new(|_ctx: RequestContext| async {
///         Response::text("Hello, Daedalus!")
///     }))
///     .get("user/{id}", FnHandler::new(|ctx: RequestContext| async move {
///         Response::text(format!("User ID: {}", ctx.param("id").unwrap_or("?")))
///     }))
///     .name("user.show");
///
/// let router = builder.build().unwrap();
/// assert_eq!(router.len(), 2);
/// ```
pub struct RouterBuilder {
    /// Entries in registration order.
    entries: Vec<RouteEntry>,

    /// Route name to entry index.
    names: HashMap<String, usize>,

    /// The process-wide fallback handler, if set.
    fallback: Option<ArcHandler>,

    /// Prefix segments contributed by enclosing groups.
    prefix_stack: Vec<String>,

    /// Middleware contributed by enclosing groups.
    middleware_stack: Vec<ArcMiddleware>,

    /// First registration failure; reported by `build()`.
    error: Option<RegistrationError>,
}

impl RouterBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            names: HashMap::new(),
            fallback: None,
            prefix_stack: Vec::new(),
            middleware_stack: Vec::new(),
            error: None,
        }
    }

    /// Registers a route for an explicit method.
    ///
    /// The pattern is compiled immediately, with the current group prefix
    /// prepended; compilation failures are recorded and surfaced by
    /// [`RouterBuilder::build`].
    pub fn route(&mut self, method: Method, pattern: &str, handler: impl Handler) -> &mut Self {
        self.add_entry(method, pattern, Arc::new(handler));
        self
    }

    /// Registers a GET route.
    pub fn get(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::GET, pattern, handler)
    }

    /// Registers a POST route.
    pub fn post(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::POST, pattern, handler)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::PUT, pattern, handler)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, pattern: &str, handler: impl Handler) -> &mut Self {
        self.route(Method::PATCH, pattern, handler)
    }

    /// Attaches a unique name to the most recently registered route.
    ///
    /// Duplicate names are a registration error: the name stays bound to
    /// its first route and `build()` fails.
    pub fn name(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.entries.is_empty() {
            self.record_error(RegistrationError::NameWithoutRoute { name: id });
        } else if self.names.contains_key(&id) {
            self.record_error(RegistrationError::DuplicateRouteName { name: id });
        } else {
            let index = self.entries.len() - 1;
            self.names.insert(id.clone(), index);
            self.entries[index].set_name(id);
        }
        self
    }

    /// Attaches one middleware to the most recently registered route.
    ///
    /// Runs after any group middleware already folded into the entry.
    pub fn middleware(&mut self, middleware: ArcMiddleware) -> &mut Self {
        if self.entries.is_empty() {
            self.record_error(RegistrationError::MiddlewareWithoutRoute {
                middleware: middleware.name().to_string(),
            });
        } else {
            let index = self.entries.len() - 1;
            self.entries[index].push_middleware(middleware);
        }
        self
    }

    /// Registers a scoped group of routes.
    ///
    /// Every route registered inside `scope` gets `prefix` prepended to
    /// its pattern and `middleware` prepended to its chain. Groups nest:
    /// enclosing prefixes and middleware concatenate in order. The
    /// prefix/middleware context is restored when `scope` returns,
    /// whether or not registrations inside it succeeded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use daedalus::Router;
    /// use daedalus_core::{FnHandler, RequestContext, Response};
    ///
    /// let mut builder = Router::builder();
    /// builder.group("admin", &[], |admin| {
    ///     admin.get("/dashboard", FnHandler::new(|_ctx: RequestContext| async {
    ///         Response::text("Welcome to the admin dashboard!")
    ///     }));
    /// });
    ///
    /// let router = builder.build().unwrap();
    /// assert_eq!(router.entries()[0].pattern().as_str(), "/admin/dashboard");
    /// ```
    pub fn group<F>(&mut self, prefix: &str, middleware: &[ArcMiddleware], scope: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let prefix_depth = self.prefix_stack.len();
        let middleware_depth = self.middleware_stack.len();

        let trimmed = prefix.trim_matches('/');
        if !trimmed.is_empty() {
            self.prefix_stack.push(trimmed.to_string());
        }
        self.middleware_stack.extend(middleware.iter().cloned());

        scope(self);

        self.prefix_stack.truncate(prefix_depth);
        self.middleware_stack.truncate(middleware_depth);
        self
    }

    /// Registers a redirect route.
    ///
    /// The entry's handler is a built-in action producing a 302 redirect
    /// to `to`; no caller-supplied handler is involved.
    pub fn redirect(&mut self, from: &str, to: &str) -> &mut Self {
        self.redirect_with_status(from, to, StatusCode::FOUND)
    }

    /// Registers a redirect route with an explicit status code.
    pub fn redirect_with_status(&mut self, from: &str, to: &str, status: StatusCode) -> &mut Self {
        let action = RedirectAction {
            location: to.to_string(),
            status,
        };
        self.add_entry(Method::GET, from, Arc::new(action));
        self
    }

    /// Sets the process-wide fallback handler, invoked when no route
    /// matches. The last call wins.
    pub fn fallback(&mut self, handler: impl Handler) -> &mut Self {
        if self.fallback.is_some() {
            tracing::debug!("fallback handler replaced");
        }
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// Freezes the route table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] recorded during
    /// registration; the table is never partially usable.
    pub fn build(self) -> Result<Router, RegistrationError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        tracing::debug!(routes = self.entries.len(), "route table frozen");
        Ok(Router::from_parts(self.entries, self.names, self.fallback))
    }

    fn add_entry(&mut self, method: Method, pattern: &str, handler: ArcHandler) {
        let full = self.full_pattern(pattern);
        match PathPattern::parse(&full) {
            Ok(compiled) => {
                tracing::debug!(method = %method, pattern = %compiled, "registered route");
                self.entries.push(RouteEntry::new(
                    method,
                    compiled,
                    handler,
                    self.middleware_stack.clone(),
                ));
            }
            Err(source) => {
                self.record_error(RegistrationError::Pattern {
                    pattern: full,
                    source,
                });
            }
        }
    }

    fn full_pattern(&self, pattern: &str) -> String {
        let mut parts: Vec<&str> = self.prefix_stack.iter().map(String::as_str).collect();
        let trimmed = pattern.trim_matches('/');
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
        format!("/{}", parts.join("/"))
    }

    fn record_error(&mut self, error: RegistrationError) {
        tracing::warn!(%error, "route registration failed");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in handler backing `redirect()` entries.
struct RedirectAction {
    location: String,
    status: StatusCode,
}

impl Handler for RedirectAction {
    fn call(&self, _ctx: RequestContext) -> BoxFuture<'static, Response> {
        let response = Response::redirect_with_status(self.location.clone(), self.status);
        Box::pin(std::future::ready(response))
    }
}
