//! Dispatch and URL generation.
//!
//! [`Router`] owns the frozen route table. Dispatch walks the table in
//! registration order and hands the first match to its middleware chain
//! and handler; name resolution substitutes supplied values back into a
//! named route's pattern.

use std::collections::HashMap;

use daedalus_core::{
    ArcHandler, DispatchError, QueryParams, RequestContext, ResolveError, Response,
};
use daedalus_middleware::Next;
use daedalus_router::{Params, PathSegment};
use http::Method;

use crate::builder::RouterBuilder;
use crate::entry::RouteEntry;

/// A matched route with its extracted parameters.
///
/// Produced per request by [`Router::match_route`] and discarded after
/// dispatch; borrows the matched entry from the router.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched entry.
    entry: &'a RouteEntry,
    /// Parameters the entry's pattern extracted from the path.
    params: Params,
}

impl<'a> RouteMatch<'a> {
    /// Returns the matched entry.
    #[must_use]
    pub const fn entry(&self) -> &'a RouteEntry {
        self.entry
    }

    /// Returns the extracted parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Consumes the match, yielding the extracted parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }
}

/// An immutable request router.
///
/// Built once at application bootstrap via [`Router::builder`], then
/// shared by reference (typically behind an `Arc`) with every place that
/// dispatches. Dispatch takes `&self` and performs no interior mutation,
/// so concurrent dispatch from many tasks needs no locking, provided
/// registration completed before the router was shared.
///
/// # Match Priority
///
/// Entries are tried strictly in registration order and the first match
/// wins. There is no static-before-parameter reordering: register the more
/// specific route first if two patterns overlap.
///
/// # Example
///
/// ```rust
/// use daedalus::Router;
/// use daedalus_core::{FnHandler, QueryParams, RequestContext, Response};
/// use http::Method;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut builder = Router::builder();
/// builder.get("user/{id}", FnHandler::new(|ctx: RequestContext| async move {
///     Response::text(format!("User ID: {}", ctx.param("id").unwrap_or("?")))
/// }));
/// let router = builder.build().unwrap();
///
/// let response = router
///     .dispatch(Method::GET, "/user/42", QueryParams::new())
///     .await
///     .unwrap();
/// assert_eq!(response.as_text(), Some("User ID: 42"));
/// # });
/// ```
#[derive(Clone)]
pub struct Router {
    /// Entries in registration order.
    entries: Vec<RouteEntry>,

    /// Route name to entry index.
    names: HashMap<String, usize>,

    /// Handler invoked when nothing matches.
    fallback: Option<ArcHandler>,
}

impl Router {
    /// Creates a registration builder.
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub(crate) fn from_parts(
        entries: Vec<RouteEntry>,
        names: HashMap<String, usize>,
        fallback: Option<ArcHandler>,
    ) -> Self {
        Self {
            entries,
            names,
            fallback,
        }
    }

    /// Dispatches a request to the first matching route.
    ///
    /// Walks the table in registration order, skipping entries whose
    /// method differs; the first pattern match wins. The matched entry's
    /// middleware runs in attachment order and may short-circuit; the
    /// handler's return value is the response. When nothing matches, the
    /// fallback handler (if set) is invoked with an empty parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoMatch`] only when no entry matches and
    /// no fallback is configured; the caller surfaces it as a generic
    /// not-found response.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
    ) -> Result<Response, DispatchError> {
        if let Some(route_match) = self.match_route(&method, path) {
            let entry = route_match.entry();
            tracing::debug!(
                method = %method,
                path,
                pattern = %entry.pattern(),
                "matched route"
            );

            let mut ctx = RequestContext::new(method, path, route_match.into_params(), query);
            if let Some(name) = entry.name() {
                ctx = ctx.with_route_name(name);
            }

            let chain = Next::chain(entry.middleware().to_vec(), entry.handler());
            return Ok(chain.run(ctx).await);
        }

        if let Some(fallback) = &self.fallback {
            tracing::debug!(method = %method, path, "no route matched, invoking fallback");
            let ctx = RequestContext::new(method, path, Params::new(), query);
            return Ok(fallback.call(ctx).await);
        }

        tracing::debug!(method = %method, path, "no route matched and no fallback configured");
        Err(DispatchError::NoMatch {
            method,
            path: path.to_string(),
        })
    }

    /// Matches a request line against the table without dispatching.
    ///
    /// Walks the entries in registration order and returns the first whose
    /// method and pattern both match. Useful for introspection and for
    /// callers that separate matching from handler invocation.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            if entry.method() != method {
                return None;
            }
            entry
                .pattern()
                .match_path(path)
                .map(|params| RouteMatch { entry, params })
        })
    }

    /// Resolves a named route to a concrete path.
    ///
    /// Required parameters must all be supplied. Optional parameters may
    /// be omitted from the tail: unsupplied trailing optionals are left
    /// out of the generated path, but an unsupplied optional in front of a
    /// supplied one is an error, since the resulting path would bind the
    /// wrong slot.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownRouteName`] when the name was never
    /// registered; [`ResolveError::MissingParameter`] when a needed value
    /// is absent from `args`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use daedalus::Router;
    /// use daedalus_core::{FnHandler, RequestContext, Response};
    ///
    /// let mut builder = Router::builder();
    /// builder
    ///     .get("user/{id}", FnHandler::new(|_ctx: RequestContext| async {
    ///         Response::text("user")
    ///     }))
    ///     .name("user.show");
    /// let router = builder.build().unwrap();
    ///
    /// assert_eq!(router.url_for("user.show", &[("id", "7")]).unwrap(), "/user/7");
    /// assert!(router.url_for("user.show", &[]).is_err());
    /// ```
    pub fn url_for(&self, name: &str, args: &[(&str, &str)]) -> Result<String, ResolveError> {
        let Some(&index) = self.names.get(name) else {
            return Err(ResolveError::UnknownRouteName {
                name: name.to_string(),
            });
        };
        let pattern = self.entries[index].pattern();
        let supplied = |param: &str| {
            args.iter()
                .find(|(key, _)| *key == param)
                .map(|(_, value)| *value)
        };

        let last_supplied_optional = pattern
            .segments()
            .iter()
            .enumerate()
            .filter_map(|(i, segment)| match segment {
                PathSegment::Optional(p) if supplied(p).is_some() => Some(i),
                _ => None,
            })
            .last();

        let mut parts: Vec<String> = Vec::new();
        for (i, segment) in pattern.segments().iter().enumerate() {
            match segment {
                PathSegment::Static(text) => parts.push(text.clone()),
                PathSegment::Param(param) => match supplied(param) {
                    Some(value) => parts.push(value.to_string()),
                    None => {
                        return Err(ResolveError::MissingParameter {
                            name: name.to_string(),
                            parameter: param.clone(),
                        })
                    }
                },
                PathSegment::Optional(param) => {
                    let needed = last_supplied_optional.is_some_and(|last| i <= last);
                    if !needed {
                        continue;
                    }
                    match supplied(param) {
                        Some(value) => parts.push(value.to_string()),
                        None => {
                            return Err(ResolveError::MissingParameter {
                                name: name.to_string(),
                                parameter: param.clone(),
                            })
                        }
                    }
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }

    /// Returns the registered entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a fallback handler is configured.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Returns the registered route names, in no particular order.
    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.entries.len())
            .field("names", &self.names.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daedalus_core::FnHandler;
    use http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn text(body: &'static str) -> FnHandler<impl Fn(RequestContext) -> std::future::Ready<Response> + Send + Sync> {
        FnHandler::new(move |_ctx: RequestContext| std::future::ready(Response::text(body)))
    }

    async fn get(router: &Router, path: &str) -> Result<Response, DispatchError> {
        router.dispatch(Method::GET, path, QueryParams::new()).await
    }

    #[tokio::test]
    async fn test_dispatch_static() {
        let mut builder = Router::builder();
        builder.get("/welcome", text("welcome"));
        let router = builder.build().unwrap();

        let response = get(&router, "/welcome").await.unwrap();
        assert_eq!(response.as_text(), Some("welcome"));

        assert!(get(&router, "/other").await.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_binds_params() {
        let mut builder = Router::builder();
        builder.get("user/{id}", FnHandler::new(|ctx: RequestContext| async move {
            Response::text(format!("User ID: {}", ctx.param("id").unwrap_or("?")))
        }));
        let router = builder.build().unwrap();

        let response = get(&router, "/user/42").await.unwrap();
        assert_eq!(response.as_text(), Some("User ID: 42"));

        // Empty trailing segment does not satisfy the required parameter
        assert!(get(&router, "/user/").await.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_method_mismatch_skips_entry() {
        let mut builder = Router::builder();
        builder.post("/submit", text("posted"));
        let router = builder.build().unwrap();

        assert!(get(&router, "/submit").await.is_err());
        let response = router
            .dispatch(Method::POST, "/submit", QueryParams::new())
            .await
            .unwrap();
        assert_eq!(response.as_text(), Some("posted"));
    }

    #[tokio::test]
    async fn test_dispatch_first_match_wins() {
        let mut builder = Router::builder();
        builder.get("user/{name}", text("by name"));
        builder.get("user/admin", text("admin"));
        let router = builder.build().unwrap();

        // Earlier-registered parameter route shadows the later static one
        let response = get(&router, "/user/admin").await.unwrap();
        assert_eq!(response.as_text(), Some("by name"));
    }

    #[tokio::test]
    async fn test_dispatch_fallback_only_when_nothing_matches() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let mut builder = Router::builder();
        builder.get("/present", text("present"));
        builder.fallback(FnHandler::new(move |_ctx: RequestContext| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Response::text("404 - Page not found").with_status(StatusCode::NOT_FOUND)
            }
        }));
        let router = builder.build().unwrap();

        let response = get(&router, "/present").await.unwrap();
        assert_eq!(response.as_text(), Some("present"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let response = get(&router, "/absent").await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_no_match_without_fallback() {
        let mut builder = Router::builder();
        builder.get("/only", text("only"));
        let router = builder.build().unwrap();

        let error = get(&router, "/missing").await.unwrap_err();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert!(matches!(error, DispatchError::NoMatch { .. }));
    }

    #[tokio::test]
    async fn test_dispatch_query_params_reach_handler() {
        let mut builder = Router::builder();
        builder.get("/search", FnHandler::new(|ctx: RequestContext| async move {
            Response::text(format!(
                "Search results for: {}",
                ctx.query_param("query").unwrap_or_default()
            ))
        }));
        let router = builder.build().unwrap();

        let mut query = QueryParams::new();
        query.insert("query".to_string(), "Daedalus".to_string());

        let response = router
            .dispatch(Method::GET, "/search", query)
            .await
            .unwrap();
        assert_eq!(response.as_text(), Some("Search results for: Daedalus"));
    }

    #[tokio::test]
    async fn test_dispatch_exposes_route_name() {
        let mut builder = Router::builder();
        builder
            .get("profile", FnHandler::new(|ctx: RequestContext| async move {
                Response::text(ctx.route_name().unwrap_or("unnamed").to_string())
            }))
            .name("profile");
        let router = builder.build().unwrap();

        let response = get(&router, "/profile").await.unwrap();
        assert_eq!(response.as_text(), Some("profile"));
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_over_shared_router() {
        let mut builder = Router::builder();
        builder.get("user/{id}", FnHandler::new(|ctx: RequestContext| async move {
            Response::text(ctx.param("id").unwrap_or("?").to_string())
        }));
        let router = Arc::new(builder.build().unwrap());

        let mut tasks = Vec::new();
        for i in 0..8 {
            let router = Arc::clone(&router);
            tasks.push(tokio::spawn(async move {
                let path = format!("/user/{i}");
                let response = router
                    .dispatch(Method::GET, &path, QueryParams::new())
                    .await
                    .unwrap();
                assert_eq!(response.as_text(), Some(i.to_string().as_str()));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
    }

    #[test]
    fn test_url_for_required_params() {
        let mut builder = Router::builder();
        builder.get("user/{id}", text("user")).name("user.show");
        let router = builder.build().unwrap();

        assert_eq!(router.url_for("user.show", &[("id", "7")]).unwrap(), "/user/7");

        let error = router.url_for("user.show", &[]).unwrap_err();
        assert_eq!(
            error,
            ResolveError::MissingParameter {
                name: "user.show".to_string(),
                parameter: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_url_for_unknown_name() {
        let router = Router::builder().build().unwrap();
        let error = router.url_for("nowhere", &[]).unwrap_err();
        assert_eq!(
            error,
            ResolveError::UnknownRouteName {
                name: "nowhere".to_string()
            }
        );
    }

    #[test]
    fn test_url_for_optional_params() {
        let mut builder = Router::builder();
        builder
            .get("profile/{name?}/{age?}", text("profile"))
            .name("profile");
        let router = builder.build().unwrap();

        assert_eq!(router.url_for("profile", &[]).unwrap(), "/profile");
        assert_eq!(
            router.url_for("profile", &[("name", "John")]).unwrap(),
            "/profile/John"
        );
        assert_eq!(
            router
                .url_for("profile", &[("name", "John"), ("age", "30")])
                .unwrap(),
            "/profile/John/30"
        );

        // A supplied optional behind an unsupplied one cannot be placed
        let error = router.url_for("profile", &[("age", "30")]).unwrap_err();
        assert_eq!(
            error,
            ResolveError::MissingParameter {
                name: "profile".to_string(),
                parameter: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_url_for_root() {
        let mut builder = Router::builder();
        builder.get("/", text("home")).name("home");
        let router = builder.build().unwrap();

        assert_eq!(router.url_for("home", &[]).unwrap(), "/");
    }

    #[test]
    fn test_match_route_without_dispatch() {
        let mut builder = Router::builder();
        builder.get("user/{id}", text("user")).name("user.show");
        let router = builder.build().unwrap();

        let route_match = router.match_route(&Method::GET, "/user/42").unwrap();
        assert_eq!(route_match.entry().name(), Some("user.show"));
        assert_eq!(route_match.params().get("id"), Some("42"));

        assert!(router.match_route(&Method::POST, "/user/42").is_none());
        assert!(router.match_route(&Method::GET, "/posts").is_none());
    }

    #[test]
    fn test_router_introspection() {
        let mut builder = Router::builder();
        builder.get("/a", text("a")).name("a");
        builder.get("/b", text("b"));
        let router = builder.build().unwrap();

        assert_eq!(router.len(), 2);
        assert!(!router.is_empty());
        assert!(!router.has_fallback());
        let names: Vec<_> = router.route_names().collect();
        assert_eq!(names, vec!["a"]);
    }
}
