//! Core middleware trait and chain types.
//!
//! This module defines the [`Middleware`] trait and the [`Next`]
//! continuation that threads a request through a route's middleware into
//! its handler.

use daedalus_core::{ArcHandler, BoxFuture, RequestContext, Response};
use std::future::Future;
use std::sync::Arc;

/// A type-erased, shareable middleware.
pub type ArcMiddleware = Arc<dyn Middleware>;

/// A middleware stage.
///
/// Middleware receives the request context and a [`Next`] continuation.
/// Calling `next.run(ctx)` hands the request onward; returning without
/// calling it short-circuits the chain with this stage's response.
///
/// # Invariants
///
/// - `next.run()` consumes the continuation; it cannot be called twice.
/// - Middleware must not assume it runs on any particular route: the same
///   instance may be shared across many entries via route groups.
///
/// # Example
///
/// ```rust
/// use daedalus_core::{BoxFuture, RequestContext, Response};
/// use daedalus_middleware::{Middleware, Next};
///
/// struct RequestLog;
///
/// impl Middleware for RequestLog {
///     fn name(&self) -> &'static str {
///         "request_log"
///     }
///
///     fn handle<'a>(&'a self, ctx: RequestContext, next: Next) -> BoxFuture<'a, Response> {
///         Box::pin(async move {
///             tracing::debug!(request_id = %ctx.request_id(), path = ctx.path(), "request");
///             next.run(ctx).await
///         })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this middleware.
    ///
    /// Used for logging and registration diagnostics.
    fn name(&self) -> &'static str;

    /// Processes the request through this stage.
    fn handle<'a>(&'a self, ctx: RequestContext, next: Next) -> BoxFuture<'a, Response>;
}

/// The remainder of a route's chain: outstanding middleware, then the
/// handler.
///
/// `Next` owns its stages, so it can be moved freely into the futures a
/// middleware builds. [`Next::run`] consumes it, which makes calling
/// onward twice a compile error rather than a runtime surprise.
pub struct Next {
    /// The route's middleware in attachment order.
    stack: Vec<ArcMiddleware>,
    /// The terminal handler.
    handler: ArcHandler,
    /// Index of the next stage to run.
    index: usize,
}

impl Next {
    /// Builds the chain for one route.
    ///
    /// The first middleware in `stack` runs first; the handler terminates
    /// the chain.
    #[must_use]
    pub fn chain(stack: Vec<ArcMiddleware>, handler: ArcHandler) -> Self {
        Self {
            stack,
            handler,
            index: 0,
        }
    }

    /// Runs the remainder of the chain.
    ///
    /// Consumes `self`: a middleware can call onward at most once.
    pub async fn run(mut self, ctx: RequestContext) -> Response {
        if self.index < self.stack.len() {
            let stage = Arc::clone(&self.stack[self.index]);
            self.index += 1;
            tracing::trace!(stage = stage.name(), "entering middleware");
            stage.handle(ctx, self).await
        } else {
            let handler = Arc::clone(&self.handler);
            handler.call(ctx).await
        }
    }
}

/// A middleware created from an async function.
///
/// Lets simple hooks be defined without a manual trait impl.
///
/// # Example
///
/// ```rust
/// use daedalus_core::{RequestContext, Response};
/// use daedalus_middleware::{FnMiddleware, Next};
///
/// let timing = FnMiddleware::new("timing", |ctx: RequestContext, next: Next| async move {
///     let start = std::time::Instant::now();
///     let response = next.run(ctx).await;
///     tracing::debug!(elapsed = ?start.elapsed(), "handled");
///     response
/// });
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    #[must_use]
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(RequestContext, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle<'a>(&'a self, ctx: RequestContext, next: Next) -> BoxFuture<'a, Response> {
        Box::pin((self.func)(ctx, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daedalus_core::{FnHandler, Params, QueryParams};
    use http::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_context() -> RequestContext {
        RequestContext::new(Method::GET, "/test", Params::new(), QueryParams::new())
    }

    fn ok_handler() -> ArcHandler {
        Arc::new(FnHandler::new(|_ctx: RequestContext| async {
            Response::text("handler")
        }))
    }

    #[tokio::test]
    async fn test_empty_chain_runs_handler() {
        let next = Next::chain(Vec::new(), ok_handler());
        let response = next.run(test_context()).await;
        assert_eq!(response.as_text(), Some("handler"));
    }

    #[tokio::test]
    async fn test_chain_runs_in_attachment_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let make = |label: &'static str, order: Arc<std::sync::Mutex<Vec<&'static str>>>| {
            Arc::new(FnMiddleware::new(label, move |ctx: RequestContext, next: Next| {
                let order = order.clone();
                async move {
                    order.lock().unwrap().push(label);
                    next.run(ctx).await
                }
            })) as ArcMiddleware
        };

        let stack = vec![
            make("first", order.clone()),
            make("second", order.clone()),
            make("third", order.clone()),
        ];

        let response = Next::chain(stack, ok_handler()).run(test_context()).await;
        assert_eq!(response.as_text(), Some("handler"));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_short_circuit_skips_handler() {
        let handler_calls = Arc::new(AtomicUsize::new(0));
        let calls = handler_calls.clone();

        let handler: ArcHandler = Arc::new(FnHandler::new(move |_ctx: RequestContext| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Response::text("handler")
            }
        }));

        let guard: ArcMiddleware = Arc::new(FnMiddleware::new(
            "guard",
            |_ctx: RequestContext, _next: Next| async {
                Response::text("blocked").with_status(StatusCode::FORBIDDEN)
            },
        ));

        let later_calls = Arc::new(AtomicUsize::new(0));
        let later_counter = later_calls.clone();
        let later: ArcMiddleware = Arc::new(FnMiddleware::new("later", move |ctx: RequestContext, next: Next| {
            let later_counter = later_counter.clone();
            async move {
                later_counter.fetch_add(1, Ordering::SeqCst);
                next.run(ctx).await
            }
        }));

        let response = Next::chain(vec![guard, later], handler)
            .run(test_context())
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.as_text(), Some("blocked"));
        assert_eq!(handler_calls.load(Ordering::SeqCst), 0);
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_middleware_wraps_response() {
        let tagger: ArcMiddleware = Arc::new(FnMiddleware::new(
            "tagger",
            |ctx: RequestContext, next: Next| async {
                let response = next.run(ctx).await;
                let body = response.as_text().unwrap_or_default().to_string();
                Response::text(format!("[{body}]"))
            },
        ));

        let response = Next::chain(vec![tagger], ok_handler())
            .run(test_context())
            .await;
        assert_eq!(response.as_text(), Some("[handler]"));
    }

    #[test]
    fn test_middleware_name() {
        let mw = FnMiddleware::new("auth", |ctx: RequestContext, next: Next| async move {
            next.run(ctx).await
        });
        assert_eq!(mw.name(), "auth");
    }
}
