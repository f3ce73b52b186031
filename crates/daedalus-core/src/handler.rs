//! Handler trait for request processing.
//!
//! The [`Handler`] trait defines the interface the router dispatches into.
//! Handlers receive the assembled [`RequestContext`] by value and produce a
//! [`Response`]; whether they do blocking or asynchronous work inside is
//! opaque to the router.

use crate::{RequestContext, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed future, as returned by type-erased handlers and middleware.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased, shareable handler.
pub type ArcHandler = Arc<dyn Handler>;

/// A request handler.
///
/// The context is handed over by value: dispatch builds one context per
/// request and ownership flows down the middleware chain into the handler.
///
/// # Example
///
/// ```rust
/// use daedalus_core::{BoxFuture, Handler, RequestContext, Response};
///
/// struct Greeter;
///
/// impl Handler for Greeter {
///     fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
///         Box::pin(async move {
///             match ctx.param("name") {
///                 Some(name) => Response::text(format!("Hello, {name}!")),
///                 None => Response::text("Hello!"),
///             }
///         })
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles a request and produces a response.
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response>;
}

/// A function-based handler wrapper.
///
/// Lets async closures and free functions act as handlers without a manual
/// trait impl.
///
/// # Example
///
/// ```rust
/// use daedalus_core::{FnHandler, RequestContext, Response};
///
/// let handler = FnHandler::new(|_ctx: RequestContext| async {
///     Response::text("Hello, Daedalus!")
/// });
/// ```
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F> {
    /// Creates a new function-based handler.
    #[must_use]
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
        Box::pin((self.func)(ctx))
    }
}
