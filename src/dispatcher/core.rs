//! Dispatcher core module - hot path for request dispatch.

use crate::route::{HandlerRef, RouteError};
use crate::router::{ParamVec, RouteMatch};
use crate::security::{AllowAll, SecurityProvider};
use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Request data passed to a handler.
///
/// Carries the effective method, the request path, the resolved handler
/// reference, and the path parameters extracted by the router.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Effective HTTP method the request was matched under
    pub method: Method,
    /// Request path as received
    pub path: String,
    /// Reference of the handler this request was dispatched to
    pub handler: HandlerRef,
    /// Path parameters extracted from the URL (stack-allocated for ≤8 params)
    pub path_params: ParamVec,
}

impl HandlerRequest {
    /// Get a path parameter by name.
    ///
    /// Uses "last write wins" semantics for patterns that repeat a
    /// parameter name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to a HashMap.
    /// Note: this allocates - use `get_path_param()` in hot paths.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// A handler unit method: receives the request's parameter mapping and
/// performs the business logic. The return value is not part of the
/// dispatch contract.
pub trait Handler: Send + Sync {
    /// Invoke the handler for a dispatched request.
    fn invoke(&self, req: HandlerRequest);
}

impl<F> Handler for F
where
    F: Fn(HandlerRequest) + Send + Sync,
{
    fn invoke(&self, req: HandlerRequest) {
        self(req)
    }
}

/// Collaborator invoked exactly once when no route matches a request.
/// Owns response generation for the not-found case.
pub trait NotFoundHandler: Send + Sync {
    /// Handle a request that matched no route.
    fn not_found(&self);
}

impl<F> NotFoundHandler for F
where
    F: Fn() + Send + Sync,
{
    fn not_found(&self) {
        self()
    }
}

/// Default not-found collaborator until one is registered.
struct LoggingNotFound;

impl NotFoundHandler for LoggingNotFound {
    fn not_found(&self) {
        warn!("No not-found collaborator registered");
    }
}

/// Error raised when a matched request cannot be dispatched.
#[derive(Debug)]
pub enum DispatchError {
    /// No handler is registered under the route's handler reference.
    ///
    /// [`crate::service::RouterService::new`] validates all routes against
    /// the registry, so in a validated service this cannot occur at dispatch
    /// time.
    UnknownHandler {
        /// The unresolvable handler reference
        reference: HandlerRef,
    },
    /// An authorization rule failed. The provider owns the failure; its
    /// error is preserved unmodified as the source.
    Auth {
        /// The rule name that failed
        rule: String,
        /// The provider's error
        source: anyhow::Error,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownHandler { reference } => {
                write!(f, "no handler registered for '{}'", reference)
            }
            DispatchError::Auth { rule, source } => {
                write!(f, "authorization rule '{}' failed: {}", rule, source)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Auth { source, .. } => {
                let source: &(dyn std::error::Error + 'static) = source.as_ref();
                Some(source)
            }
            DispatchError::UnknownHandler { .. } => None,
        }
    }
}

/// Dispatcher that routes matched requests to registered handlers.
///
/// Maintains a registry of handler references to handler units, the
/// security provider that runs named authorization rules, and the
/// not-found collaborator.
pub struct Dispatcher {
    handlers: HashMap<HandlerRef, Box<dyn Handler>>,
    security: Arc<dyn SecurityProvider>,
    not_found: Box<dyn NotFoundHandler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a new empty dispatcher.
    ///
    /// Handlers must be registered using [`Dispatcher::register_handler`].
    /// Until collaborators are injected, authorization checks pass
    /// ([`AllowAll`]) and the not-found path only logs.
    #[must_use]
    pub fn new() -> Self {
        Dispatcher {
            handlers: HashMap::new(),
            security: Arc::new(AllowAll),
            not_found: Box::new(LoggingNotFound),
        }
    }

    /// Register a handler unit under a `Controller@action` reference.
    ///
    /// If a handler with the same reference already exists it is replaced
    /// and the replacement is logged.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedHandlerReference`] if the reference
    /// string is not of the required form.
    pub fn register_handler<H>(&mut self, reference: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        let reference = HandlerRef::parse(reference)?;

        if self
            .handlers
            .insert(reference.clone(), Box::new(handler))
            .is_some()
        {
            warn!(handler = %reference, "Replaced existing handler");
        } else {
            info!(
                handler = %reference,
                total_handlers = self.handlers.len(),
                "Handler registered"
            );
        }
        Ok(())
    }

    /// Set the security provider that runs named authorization rules.
    pub fn set_security_provider(&mut self, provider: Arc<dyn SecurityProvider>) {
        self.security = provider;
    }

    /// Set the not-found collaborator.
    pub fn set_not_found<N>(&mut self, not_found: N)
    where
        N: NotFoundHandler + 'static,
    {
        self.not_found = Box::new(not_found);
    }

    /// Whether a handler is registered under the given reference.
    #[must_use]
    pub fn has_handler(&self, reference: &HandlerRef) -> bool {
        self.handlers.contains_key(reference)
    }

    /// Dispatch a matched request: authorization rules first, handler second.
    ///
    /// Each middleware name on the matched route is run through the security
    /// provider in listed order. The dispatcher never skips or reorders the
    /// chain and adds no short-circuit of its own: the walk stops only when
    /// the provider fails. After the chain, the handler is resolved and
    /// invoked with the extracted parameters.
    ///
    /// # Arguments
    ///
    /// * `route_match` - Matched route with path parameters
    /// * `method` - The effective request method
    /// * `path` - The request path as received
    ///
    /// # Errors
    ///
    /// * [`DispatchError::Auth`] - a rule failed; the provider's error is the source
    /// * [`DispatchError::UnknownHandler`] - no handler under the route's reference
    pub fn dispatch(
        &self,
        route_match: RouteMatch,
        method: Method,
        path: &str,
    ) -> Result<(), DispatchError> {
        let RouteMatch { route, path_params } = route_match;

        debug!(
            handler = %route.handler,
            middleware_count = route.middleware.len(),
            "Running authorization rules"
        );
        for rule in &route.middleware {
            self.security
                .check(rule)
                .map_err(|source| DispatchError::Auth {
                    rule: rule.clone(),
                    source,
                })?;
        }

        let handler = self.handlers.get(&route.handler).ok_or_else(|| {
            error!(
                handler = %route.handler,
                available_handlers = self.handlers.len(),
                "Handler not found"
            );
            DispatchError::UnknownHandler {
                reference: route.handler.clone(),
            }
        })?;

        info!(
            method = %method,
            path = %path,
            handler = %route.handler,
            path_params = ?path_params,
            "Request dispatched to handler"
        );

        handler.invoke(HandlerRequest {
            method,
            path: path.to_string(),
            handler: route.handler.clone(),
            path_params,
        });
        Ok(())
    }

    /// Invoke the not-found collaborator.
    ///
    /// Called exactly once per request that matched no route. No middleware
    /// or handler runs on this path.
    pub fn not_found(&self) {
        self.not_found.not_found();
    }
}
