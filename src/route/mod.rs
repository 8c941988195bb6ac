//! # Route Module
//!
//! Route metadata for the router: the parsed form of everything a caller
//! provides at registration time.
//!
//! ## Overview
//!
//! A [`Route`] is immutable once registered and carries:
//!
//! - the HTTP method, restricted to the four supported verbs
//! - the URI pattern, pre-split into [`Segment`]s (literal or `{name}`
//!   placeholder)
//! - the [`HandlerRef`] naming the handler unit (`Controller@action`)
//! - the ordered list of authorization rule names to run before dispatch
//!
//! All validation happens here, at registration time: an unsupported method,
//! an empty pattern, or a malformed handler reference is rejected with a
//! [`RouteError`] instead of surfacing as a failure at dispatch time.
//!
//! ## Placeholder syntax
//!
//! A pattern segment is a placeholder only when it is fully wrapped as
//! `{name}` with a non-empty interior. Any other shape is treated as a
//! literal, segments with stray braces like `{id` or `x}` included. This is
//! a deliberate permissive policy, not a validation gap.

mod types;

pub(crate) use types::{parse_method, split_segments};
pub use types::{HandlerRef, Route, RouteError, Segment};
