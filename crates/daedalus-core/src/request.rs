//! Request context types.
//!
//! The [`RequestContext`] carries all per-request state through the
//! middleware chain and into handlers. It is assembled by the router after
//! a successful match and is read-only from the handler's point of view.

use daedalus_router::Params;
use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query-string parameters, surfaced as an order-preserving string map.
///
/// The router never parses a query string itself; the surrounding request
/// infrastructure supplies the decoded pairs.
pub type QueryParams = IndexMap<String, String>;

/// A unique identifier for each dispatched request, using UUID v7.
///
/// UUID v7 is time-ordered, which makes it suitable for request tracking
/// and log correlation.
///
/// # Example
///
/// ```
/// use daedalus_core::RequestId;
///
/// let id = RequestId::new();
/// println!("Request ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID.
    ///
    /// Useful when propagating an ID minted by upstream infrastructure.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-request context that flows through middleware into the handler.
///
/// `RequestContext` aggregates everything a handler may consult:
///
/// - **Request line**: method and path as dispatched
/// - **Path parameters**: values extracted by the matched pattern
/// - **Query parameters**: decoded pairs supplied by the caller
/// - **Route name**: the matched route's name, when it has one
/// - **Request ID**: a fresh UUID v7 for log correlation
///
/// # Example
///
/// ```
/// use daedalus_core::{Params, QueryParams, RequestContext};
/// use http::Method;
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// let ctx = RequestContext::new(Method::GET, "/user/42", params, QueryParams::new());
/// assert_eq!(ctx.param("id"), Some("42"));
/// assert_eq!(ctx.path(), "/user/42");
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this dispatch.
    request_id: RequestId,

    /// The request method.
    method: Method,

    /// The request path as dispatched.
    path: String,

    /// Parameters extracted by the matched pattern.
    params: Params,

    /// Decoded query-string pairs.
    query: QueryParams,

    /// Name of the matched route, if it was registered with one.
    route_name: Option<String>,
}

impl RequestContext {
    /// Creates a new request context with a fresh request ID.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, params: Params, query: QueryParams) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            params,
            query,
            route_name: None,
        }
    }

    /// Attaches the matched route's name.
    #[must_use]
    pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
        self.route_name = Some(name.into());
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the extracted path parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns a single path parameter's captured value.
    ///
    /// `None` both for parameters the route never declares and for optional
    /// parameters the request did not supply; `self.params().contains(..)`
    /// distinguishes the two.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns a single query parameter by key.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns the matched route's name, if any.
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.route_name.as_deref()
    }
}
