//! # Router Module
//!
//! The router module provides the route table and the path matching engine.
//! It matches incoming requests against registered URI patterns and extracts
//! named path parameters.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Storing registered routes in registration order (append-only)
//! - Validating registrations eagerly (method, pattern, handler reference)
//! - Matching incoming requests to routes, first-registered match wins
//! - Extracting `{name}` path parameters from matched routes
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: URI patterns (e.g. `/users/{id}`) are split into
//!    segments once, so no pattern parsing happens per request.
//!
//! 2. **Matching**: For each incoming request, the router walks the table in
//!    registration order and gates on segment count and method, then compares
//!    segments left to right. The first structurally compatible route wins:
//!    there is no specificity ranking and no longest-prefix preference, so
//!    two routes with identical method and pattern may coexist and the
//!    earlier one always wins.
//!
//! ## Example
//!
//! ```
//! use microroute::router::Router;
//! use http::Method;
//!
//! # fn main() -> Result<(), microroute::route::RouteError> {
//! let mut router = Router::new();
//! router.get("/users/{id}", "UserController@show", &[])?;
//!
//! let route_match = router.route(&Method::GET, "/users/42").unwrap();
//! assert_eq!(route_match.get_path_param("id"), Some("42"));
//! # Ok(())
//! # }
//! ```

mod core;

pub use core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
