//! # Security Module
//!
//! The authorization seam for the dispatcher: named rule checks that run
//! after a route matches and before its handler is invoked.
//!
//! ## Overview
//!
//! Routes list middleware as opaque rule names (e.g. `"auth"`). When a route
//! matches, the dispatcher invokes the registered [`SecurityProvider`] once
//! per listed name, in order. The provider owns the pass/fail semantics
//! entirely: the dispatcher neither interprets nor suppresses a failure, it
//! only propagates it. If the provider does not fail, every listed check
//! runs before the handler.
//!
//! ## Implementing a provider
//!
//! ```
//! use microroute::security::SecurityProvider;
//!
//! struct AdminOnly;
//!
//! impl SecurityProvider for AdminOnly {
//!     fn check(&self, rule: &str) -> anyhow::Result<()> {
//!         match rule {
//!             "admin" => anyhow::bail!("not an admin"),
//!             _ => Ok(()),
//!         }
//!     }
//! }
//! ```
//!
//! Two small providers ship with the crate: [`AllowAll`] (the default until
//! one is registered) and [`RuleSet`], an allow-list over rule names.

use anyhow::{bail, Result};
use std::collections::HashSet;

/// Trait for implementing named authorization checks.
///
/// `rule` is the middleware name as listed at route registration. Returning
/// `Err` halts the request before the handler runs; the error is propagated
/// to the dispatch caller unmodified.
pub trait SecurityProvider: Send + Sync {
    /// Run the named authorization rule against the current request context.
    fn check(&self, rule: &str) -> Result<()>;
}

/// Provider that passes every check. The dispatcher default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SecurityProvider for AllowAll {
    fn check(&self, _rule: &str) -> Result<()> {
        Ok(())
    }
}

/// Allow-list provider: a check passes iff its rule name was granted.
///
/// Useful in tests and in applications where authorization state is computed
/// up front (e.g. from a session) and dispatch only has to consult it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    granted: HashSet<String>,
}

impl RuleSet {
    /// Build a rule set from the granted rule names.
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }
}

impl SecurityProvider for RuleSet {
    fn check(&self, rule: &str) -> Result<()> {
        if self.granted.contains(rule) {
            Ok(())
        } else {
            bail!("authorization rule '{rule}' denied");
        }
    }
}
