//! # Service Module
//!
//! [`RouterService`] glues the router and the dispatcher behind the single
//! request-surface entry point. Constructing the service freezes the route
//! table and validates that every registered route resolves to a registered
//! handler, so configuration mistakes fail at bootstrap instead of on the
//! first request.
//!
//! The request context is explicit: the transport method, the request path,
//! and the optional form method-override field are passed in rather than
//! read from ambient state, which keeps dispatch trivially testable.

use crate::dispatcher::{DispatchError, Dispatcher};
use crate::router::Router;
use http::Method;
use tracing::{debug, warn};

/// Everything the service needs to know about one incoming request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Transport-level method from the HTTP request line
    pub method: Method,
    /// Request path component, without query string
    pub path: String,
    /// Value of the hidden `_method` form field, if the transport carried one
    pub form_method_override: Option<String>,
}

impl RequestContext {
    /// Context for a request without a method-override field.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            form_method_override: None,
        }
    }

    /// Attach a form method-override value.
    ///
    /// The override is honored only when the transport method is POST; see
    /// [`RouterService::dispatch`].
    #[must_use]
    pub fn with_form_override(mut self, value: impl Into<String>) -> Self {
        self.form_method_override = Some(value.into());
        self
    }
}

/// Outcome of a dispatch. A request that matches no route is a normal
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A route matched; its middleware chain and handler ran.
    Handled,
    /// No route matched; the not-found collaborator ran exactly once.
    NotFound,
}

/// The assembled router service: frozen route table plus dispatcher.
///
/// Owning both ends makes the mutation and read phases temporally disjoint
/// by construction: registration happens on the `Router` and `Dispatcher`
/// before they are handed over, and the service only ever reads them, so it
/// can be shared across concurrently handled requests.
pub struct RouterService {
    router: Router,
    dispatcher: Dispatcher,
}

impl RouterService {
    /// Assemble a service, validating routes against the handler registry.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownHandler`] for the first route whose
    /// handler reference has no registered handler.
    pub fn new(router: Router, dispatcher: Dispatcher) -> Result<Self, DispatchError> {
        for route in router.routes() {
            if !dispatcher.has_handler(&route.handler) {
                return Err(DispatchError::UnknownHandler {
                    reference: route.handler.clone(),
                });
            }
        }
        Ok(Self { router, dispatcher })
    }

    /// The frozen route table.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch one request.
    ///
    /// Computes the effective method (the form override is honored only for
    /// POST and is upper-cased), matches the path against the route table,
    /// and on a match runs the route's authorization rules and handler. When
    /// nothing matches, the not-found collaborator is invoked exactly once
    /// and `Ok(Dispatch::NotFound)` is returned.
    ///
    /// # Errors
    ///
    /// Propagates [`DispatchError`] from the dispatcher; no-match is never
    /// an error.
    pub fn dispatch(&self, ctx: &RequestContext) -> Result<Dispatch, DispatchError> {
        let method = match effective_method(&ctx.method, ctx.form_method_override.as_deref()) {
            Some(method) => method,
            None => {
                // An override that is not a valid HTTP token can never equal
                // a registered method.
                warn!(
                    path = %ctx.path,
                    form_override = ?ctx.form_method_override,
                    "Method override is not a valid HTTP token"
                );
                self.dispatcher.not_found();
                return Ok(Dispatch::NotFound);
            }
        };

        if method != ctx.method {
            debug!(
                transport_method = %ctx.method,
                effective_method = %method,
                path = %ctx.path,
                "Form method override applied"
            );
        }

        match self.router.route(&method, &ctx.path) {
            Some(route_match) => {
                self.dispatcher.dispatch(route_match, method, &ctx.path)?;
                Ok(Dispatch::Handled)
            }
            None => {
                self.dispatcher.not_found();
                Ok(Dispatch::NotFound)
            }
        }
    }
}

/// Effective method for matching: the upper-cased form override when the
/// transport method is POST and an override is present, else the transport
/// method itself.
fn effective_method(raw: &Method, form_override: Option<&str>) -> Option<Method> {
    match form_override {
        Some(value) if *raw == Method::POST => {
            Method::from_bytes(value.to_ascii_uppercase().as_bytes()).ok()
        }
        _ => Some(raw.clone()),
    }
}
