//! Router core module - hot path for request matching.

use crate::route::{parse_method, split_segments, Route, RouteError, Segment};
use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
/// Most REST-style routes have ≤4 path params (e.g. /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the match hot path.
///
/// Param names use `Arc<str>` instead of `String` because:
/// - Names come from the static route table (known at registration)
/// - `Arc::clone()` is O(1) vs an O(n) string copy per request
/// - Values remain `String` as they're per-request data from the URL
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to a route.
///
/// Contains the matched route and the extracted path parameters in
/// left-to-right segment order.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (Arc to avoid expensive clones)
    pub route: Arc<Route>,
    /// Path parameters extracted from the URL (e.g. `{id}` → `{"id": "123"}`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name.
    ///
    /// Uses "last write wins" semantics: if the pattern repeats a parameter
    /// name (e.g. `/pair/{id}/{id}`), returns the last occurrence. Duplicate
    /// names within one route are legal but not recommended.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to a HashMap for handlers that want a plain map.
    ///
    /// Note: this allocates - use `get_path_param()` in hot paths instead.
    /// Duplicate names resolve to the last binding, consistent with
    /// [`RouteMatch::get_path_param`].
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Router that matches HTTP requests against an ordered route table.
///
/// The table is append-only and scanned in registration order; the first
/// route whose method and segments are compatible with the request wins.
/// The linear scan is O(n) in the number of routes, which is the intended
/// trade-off for a table small enough to read in a route dump.
///
/// Population happens during application bootstrap; once the router is
/// handed to a [`crate::service::RouterService`] the table is frozen and
/// safe to share across concurrently handled requests.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Arc<Route>>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// `method` is case-insensitive and must be one of GET, POST, PUT or
    /// DELETE. Leading and trailing slashes in `pattern` are ignored.
    /// `handler_ref` must be of the form `Controller@action`. `middleware`
    /// lists authorization rule names to run, in order, before the handler.
    ///
    /// No deduplication or conflict detection is performed: two routes with
    /// an identical method and pattern are both retained, and the
    /// earlier-registered one always wins at match time.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`RouteError`] instead of storing a route that
    /// would break at dispatch time.
    pub fn register(
        &mut self,
        method: &str,
        pattern: &str,
        handler_ref: &str,
        middleware: &[&str],
    ) -> Result<(), RouteError> {
        let method = parse_method(method)?;
        self.push_route(method, pattern, handler_ref, middleware)
    }

    /// Register a GET route.
    pub fn get(
        &mut self,
        pattern: &str,
        handler_ref: &str,
        middleware: &[&str],
    ) -> Result<(), RouteError> {
        self.push_route(Method::GET, pattern, handler_ref, middleware)
    }

    /// Register a POST route.
    pub fn post(
        &mut self,
        pattern: &str,
        handler_ref: &str,
        middleware: &[&str],
    ) -> Result<(), RouteError> {
        self.push_route(Method::POST, pattern, handler_ref, middleware)
    }

    /// Register a PUT route.
    pub fn put(
        &mut self,
        pattern: &str,
        handler_ref: &str,
        middleware: &[&str],
    ) -> Result<(), RouteError> {
        self.push_route(Method::PUT, pattern, handler_ref, middleware)
    }

    /// Register a DELETE route.
    pub fn delete(
        &mut self,
        pattern: &str,
        handler_ref: &str,
        middleware: &[&str],
    ) -> Result<(), RouteError> {
        self.push_route(Method::DELETE, pattern, handler_ref, middleware)
    }

    fn push_route(
        &mut self,
        method: Method,
        pattern: &str,
        handler_ref: &str,
        middleware: &[&str],
    ) -> Result<(), RouteError> {
        let middleware = middleware.iter().map(|m| m.to_string()).collect();
        let route = Route::with_method(method, pattern, handler_ref, middleware)?;

        info!(
            method = %route.method,
            pattern = %route.pattern,
            handler = %route.handler,
            middleware_count = route.middleware.len(),
            routes_count = self.routes.len() + 1,
            "Route registered"
        );

        self.routes.push(Arc::new(route));
        Ok(())
    }

    /// All registered routes, in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Print all registered routes to stdout.
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} -> {} middleware={:?}",
                route.method, route.pattern, route.handler, route.middleware
            );
        }
    }

    /// Match an HTTP request to a route.
    ///
    /// Walks the table in registration order. A route is a candidate only if
    /// its segment count equals the request's and its method equals the
    /// effective request method; candidates are then compared segment by
    /// segment, left to right. Literal segments require byte-for-byte
    /// equality; placeholder segments match any value, including an empty
    /// segment, and bind it. The first fully compatible route wins.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - if a matching route is found
    /// * `None` - if no route matches (the not-found path)
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        let request_segments: SmallVec<[&str; MAX_INLINE_PARAMS]> =
            split_segments(path).collect();

        for route in &self.routes {
            if route.method != *method || route.segments.len() != request_segments.len() {
                continue;
            }

            let mut params = ParamVec::new();
            let mut matched = true;
            for (segment, raw) in route.segments.iter().zip(request_segments.iter()) {
                match segment {
                    Segment::Param(name) => {
                        // Later bindings of a repeated name shadow earlier ones.
                        params.push((Arc::clone(name), (*raw).to_string()));
                    }
                    Segment::Literal(lit) => {
                        if lit.as_str() != *raw {
                            matched = false;
                            break;
                        }
                    }
                }
            }

            if matched {
                info!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern,
                    handler = %route.handler,
                    path_params = ?params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    route: Arc::clone(route),
                    path_params: params,
                });
            }
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }
}
