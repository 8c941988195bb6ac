//! # Dispatcher Module
//!
//! The dispatcher owns the handler registry and carries a matched request
//! through its authorization checks to its handler.
//!
//! ## Overview
//!
//! The dispatcher is responsible for:
//! - Registering handler units under `Controller@action` references
//! - Running a matched route's authorization rules, in order, through the
//!   configured [`crate::security::SecurityProvider`]
//! - Invoking the handler with the extracted path parameters
//! - Invoking the not-found collaborator when no route matched
//!
//! ## Request Flow
//!
//! 1. Router matches the incoming request → [`crate::router::RouteMatch`]
//! 2. Dispatcher runs each middleware rule name through the provider
//! 3. Dispatcher looks up the handler by its reference
//! 4. Handler is invoked with a [`HandlerRequest`]
//!
//! Each dispatch is synchronous and self-contained; the dispatcher keeps no
//! state across requests.
//!
//! ## Error Handling
//!
//! - Malformed handler references fail at registration ([`crate::route::RouteError`])
//! - Unresolvable handlers are caught at service construction; if the
//!   dispatcher is driven directly, they surface as
//!   [`DispatchError::UnknownHandler`] with a clear diagnostic
//! - Provider failures propagate as [`DispatchError::Auth`] with the
//!   provider's own error preserved as the source

mod core;

pub use core::{
    DispatchError, Dispatcher, Handler, HandlerRequest, NotFoundHandler,
};
