//! # Daedalus Core
//!
//! Core types and traits shared across the Daedalus routing stack:
//!
//! - [`RequestContext`] - Per-request context carrying the request line,
//!   extracted path parameters, and query parameters
//! - [`RequestId`] - UUID v7 request identifier for log correlation
//! - [`Response`] - The opaque response value handlers produce
//! - [`Handler`] - Core handler trait
//! - [`RegistrationError`] / [`ResolveError`] / [`DispatchError`] - Error
//!   taxonomy, split by the phase that raises them

#![forbid(unsafe_code)]

mod error;
mod handler;
mod request;
mod response;

pub use error::{DispatchError, RegistrationError, ResolveError};
pub use handler::{ArcHandler, BoxFuture, FnHandler, Handler};
pub use request::{QueryParams, RequestContext, RequestId};
pub use response::{Response, ResponseKind, ViewData};

// Re-exported so downstream crates get the parameter type without a direct
// dependency on the pattern layer.
pub use daedalus_router::Params;
