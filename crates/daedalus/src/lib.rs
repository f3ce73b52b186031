//! # Daedalus
//!
//! **Transport-agnostic request routing with groups, middleware, and named
//! routes**
//!
//! Daedalus maps a request line (method + path) to a registered handler:
//!
//! - **Parameterized patterns** – static segments, required `{id}` and
//!   trailing optional `{age?}` parameters
//! - **Registration-order dispatch** – the first matching entry wins;
//!   route order is exactly what the application configured
//! - **Route groups** – shared prefix and middleware applied to every
//!   route registered inside a scope, nestable
//! - **Per-route middleware** – chains that can short-circuit before the
//!   handler runs
//! - **Named routes** – resolve a name plus parameter values back to a
//!   concrete path
//! - **Redirects and fallback** – built-in redirect entries and a
//!   process-wide not-found handler
//!
//! Daedalus owns no transport: the surrounding infrastructure parses
//! requests, supplies decoded query parameters, and writes whatever
//! [`Response`](daedalus_core::Response) value comes back.
//!
//! ## Quick Start
//!
//! ```rust
//! use daedalus::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut builder = Router::builder();
//! builder
//!     .get("/", FnHandler::new(|_ctx: RequestContext| async {
//!         Response::text("Hello, Daedalus!")
//!     }))
//!     .get("greet/{name}", FnHandler::new(|ctx: RequestContext| async move {
//!         Response::text(format!("Hello, {}!", ctx.param("name").unwrap_or("stranger")))
//!     }))
//!     .name("greet")
//!     .fallback(FnHandler::new(|_ctx: RequestContext| async {
//!         Response::text("404 - Page not found").with_status(StatusCode::NOT_FOUND)
//!     }));
//!
//! let router = builder.build().unwrap();
//!
//! let response = router
//!     .dispatch(Method::GET, "/greet/Ariadne", QueryParams::new())
//!     .await
//!     .unwrap();
//! assert_eq!(response.as_text(), Some("Hello, Ariadne!"));
//!
//! assert_eq!(router.url_for("greet", &[("name", "Icarus")]).unwrap(), "/greet/Icarus");
//! # });
//! ```
//!
//! ## Concurrency
//!
//! Registration happens once at bootstrap; [`RouterBuilder::build`]
//! freezes the table. A built [`Router`] is immutable, so sharing it
//! behind an `Arc` and dispatching from many tasks concurrently is safe
//! without locks.

#![forbid(unsafe_code)]

mod builder;
mod entry;
mod router;

pub use builder::RouterBuilder;
pub use entry::RouteEntry;
pub use router::{RouteMatch, Router};

// Re-export the layered crates under stable names
pub use daedalus_core::{
    ArcHandler, BoxFuture, DispatchError, FnHandler, Handler, QueryParams, RegistrationError,
    RequestContext, RequestId, ResolveError, Response, ResponseKind, ViewData,
};
pub use daedalus_middleware::{ArcMiddleware, FnMiddleware, Middleware, Next};
pub use daedalus_router::{Params, PathPattern, PathSegment, PatternError};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use daedalus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Router, RouterBuilder};
    pub use daedalus_core::{
        FnHandler, Handler, QueryParams, RequestContext, Response, ViewData,
    };
    pub use daedalus_middleware::{ArcMiddleware, FnMiddleware, Middleware, Next};
    pub use http::{Method, StatusCode};
}
