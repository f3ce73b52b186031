//! Response model.
//!
//! A [`Response`] is the opaque value a handler or middleware produces.
//! The router never interprets it beyond carrying it back to the caller:
//! rendering a view or serializing JSON onto the wire is the job of the
//! surrounding infrastructure.

use http::StatusCode;
use indexmap::IndexMap;
use serde_json::Value;

/// Data mapping handed to an external view-rendering collaborator.
pub type ViewData = IndexMap<String, Value>;

/// The payload variants a handler can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    /// Plain text body.
    Text(String),

    /// JSON payload; serialization is delegated to `serde_json`.
    Json(Value),

    /// A named view plus its data mapping, for an external template
    /// renderer.
    View {
        /// Name of the view to render.
        name: String,
        /// Data handed to the renderer.
        data: ViewData,
    },

    /// A redirect directive.
    Redirect {
        /// Target location.
        location: String,
    },
}

/// The value a handler, middleware, or built-in route action returns.
///
/// Every response carries a status code alongside its payload. The
/// constructors pick the conventional default (200 for content, 302 for
/// redirects); [`Response::with_status`] overrides it, which is how a
/// fallback handler produces a 404 with a body.
///
/// # Example
///
/// ```
/// use daedalus_core::Response;
/// use http::StatusCode;
///
/// let ok = Response::text("Hello, Daedalus!");
/// assert_eq!(ok.status(), StatusCode::OK);
///
/// let missing = Response::text("404 - Page not found").with_status(StatusCode::NOT_FOUND);
/// assert_eq!(missing.status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The payload.
    kind: ResponseKind,
    /// The status code to surface.
    status: StatusCode,
}

impl Response {
    /// Creates a plain-text response with status 200.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Text(body.into()),
            status: StatusCode::OK,
        }
    }

    /// Creates a JSON response with status 200.
    #[must_use]
    pub fn json(value: Value) -> Self {
        Self {
            kind: ResponseKind::Json(value),
            status: StatusCode::OK,
        }
    }

    /// Creates a view response with no data and status 200.
    #[must_use]
    pub fn view(name: impl Into<String>) -> Self {
        Self::view_with(name, ViewData::new())
    }

    /// Creates a view response with a data mapping and status 200.
    #[must_use]
    pub fn view_with(name: impl Into<String>, data: ViewData) -> Self {
        Self {
            kind: ResponseKind::View {
                name: name.into(),
                data,
            },
            status: StatusCode::OK,
        }
    }

    /// Creates a redirect response with status 302 Found.
    #[must_use]
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::redirect_with_status(location, StatusCode::FOUND)
    }

    /// Creates a redirect response with an explicit status code.
    #[must_use]
    pub fn redirect_with_status(location: impl Into<String>, status: StatusCode) -> Self {
        Self {
            kind: ResponseKind::Redirect {
                location: location.into(),
            },
            status,
        }
    }

    /// Overrides the status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the payload.
    #[must_use]
    pub const fn kind(&self) -> &ResponseKind {
        &self.kind
    }

    /// Returns the text body, if this is a text response.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            ResponseKind::Text(body) => Some(body),
            _ => None,
        }
    }

    /// Returns the JSON payload, if this is a JSON response.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match &self.kind {
            ResponseKind::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the redirect location, if this is a redirect.
    #[must_use]
    pub fn redirect_location(&self) -> Option<&str> {
        match &self.kind {
            ResponseKind::Redirect { location } => Some(location),
            _ => None,
        }
    }
}
