//! # Daedalus Middleware
//!
//! Per-route middleware for the Daedalus router.
//!
//! Middleware wraps handler invocation: each stage receives the request
//! context and a [`Next`] continuation for the remainder of the chain. A
//! stage may run work before and after `next.run(ctx)`, or return its own
//! [`Response`](daedalus_core::Response) without calling onward, which
//! short-circuits the chain: later stages and the handler never run.
//!
//! ```text
//! Request → first → second → ... → handler
//!                                     ↓
//! Response ←──────────────────────────┘
//! ```
//!
//! Chains are attached per route at registration time (directly or through
//! a route group) and run in attachment order.
//!
//! # Example
//!
//! ```rust
//! use daedalus_core::{RequestContext, Response};
//! use daedalus_middleware::{FnMiddleware, Next};
//! use http::StatusCode;
//!
//! let guard = FnMiddleware::new("auth", |ctx: RequestContext, next: Next| async move {
//!     if ctx.query_param("token").is_none() {
//!         return Response::text("Unauthorized").with_status(StatusCode::UNAUTHORIZED);
//!     }
//!     next.run(ctx).await
//! });
//! ```

#![forbid(unsafe_code)]

mod middleware;

pub use middleware::{ArcMiddleware, FnMiddleware, Middleware, Next};
