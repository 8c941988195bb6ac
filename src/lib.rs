//! # microroute
//!
//! **microroute** is a minimal HTTP request router: it maps an incoming
//! (method, path) pair to a registered handler, extracting named `{param}`
//! path parameters, and running a chain of named authorization checks before
//! dispatch.
//!
//! ## Architecture
//!
//! The library is organized into a handful of small modules:
//!
//! - **[`route`]** - route metadata: segments, handler references, validation
//! - **[`router`]** - the route table and the first-match-wins matching engine
//! - **[`dispatcher`]** - handler registry and middleware-then-handler dispatch
//! - **[`security`]** - the named authorization check seam
//! - **[`service`]** - the assembled request surface with method-override
//!   handling and bootstrap-time handler validation
//!
//! ## Matching model
//!
//! Routes are scanned in registration order; the first route with the same
//! segment count, the same method, and compatible segments wins. A literal
//! segment requires byte-for-byte equality; a `{name}` placeholder matches
//! any segment value (including an empty one) and binds it. There is no
//! specificity ranking and no route-based fallback: when nothing matches,
//! the not-found collaborator is invoked.
//!
//! ## Quick Start
//!
//! ```
//! use microroute::{Dispatcher, HandlerRequest, RequestContext, Router, RouterService};
//! use http::Method;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build phase: routes and handlers are registered, errors fail fast.
//! let mut router = Router::new();
//! router.get("/users/{id}", "UserController@show", &["auth"])?;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register_handler("UserController@show", |req: HandlerRequest| {
//!     assert_eq!(req.get_path_param("id"), Some("42"));
//! })?;
//!
//! // Serving phase: the table is frozen inside the service.
//! let service = RouterService::new(router, dispatcher)?;
//! service.dispatch(&RequestContext::new(Method::GET, "/users/42"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Collaborators
//!
//! Authorization checks, handler business logic, and not-found rendering are
//! external collaborators behind narrow traits
//! ([`SecurityProvider`](security::SecurityProvider),
//! [`Handler`](dispatcher::Handler),
//! [`NotFoundHandler`](dispatcher::NotFoundHandler)). The router never
//! interprets an authorization failure; it propagates the provider's error
//! unmodified.

pub mod dispatcher;
pub mod route;
pub mod router;
pub mod security;
pub mod service;

pub use dispatcher::{DispatchError, Dispatcher, Handler, HandlerRequest, NotFoundHandler};
pub use route::{HandlerRef, Route, RouteError, Segment};
pub use router::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use security::{AllowAll, RuleSet, SecurityProvider};
pub use service::{Dispatch, RequestContext, RouterService};
