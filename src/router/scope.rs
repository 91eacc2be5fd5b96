use crate::error::RouterError;
use crate::handler::IntoHandlerRef;
use crate::pattern::{normalize, RoutePattern};
use tracing::debug;

use super::core::{parse_methods, RouteEntry, Router, TableKind};

/// Registration context carrying the accumulated mount prefix
///
/// The prefix is a value owned by the scope, so a nested [`RouteScope::mount`] can
/// never leak its prefix into the parent: when the callback returns (or fails) the
/// child scope is simply dropped.
pub struct RouteScope<'r> {
    router: &'r mut Router,
    base: String,
}

impl<'r> RouteScope<'r> {
    pub(crate) fn root(router: &'r mut Router) -> Self {
        Self {
            router,
            base: String::new(),
        }
    }

    /// The mount prefix applied to patterns registered through this scope
    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Register a primary route for each method in a `|`-delimited list
    ///
    /// # Errors
    ///
    /// Fails on an invalid method, handler reference or pattern.
    pub fn add(
        &mut self,
        methods: &str,
        pattern: &str,
        handler: impl IntoHandlerRef,
    ) -> Result<(), RouterError> {
        self.register(TableKind::Route, methods, pattern, handler)
    }

    /// Register before-middleware for each method in a `|`-delimited list
    ///
    /// # Errors
    ///
    /// Fails on an invalid method, handler reference or pattern.
    pub fn before(
        &mut self,
        methods: &str,
        pattern: &str,
        handler: impl IntoHandlerRef,
    ) -> Result<(), RouterError> {
        self.register(TableKind::Before, methods, pattern, handler)
    }

    pub fn get(&mut self, pattern: &str, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.add("GET", pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.add("POST", pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.add("PUT", pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.add("PATCH", pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.add("DELETE", pattern, handler)
    }

    pub fn options(&mut self, pattern: &str, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.add("OPTIONS", pattern, handler)
    }

    /// Register a group of routes under `prefix`
    ///
    /// `prefix` is appended to this scope's prefix by plain string concatenation and
    /// `f` receives a child scope carrying the result. Mounts nest arbitrarily.
    ///
    /// # Errors
    ///
    /// Propagates the first registration error raised inside `f`. Routes registered
    /// before the failure stay registered.
    pub fn mount<F>(&mut self, prefix: &str, f: F) -> Result<(), RouterError>
    where
        F: FnOnce(&mut RouteScope<'_>) -> Result<(), RouterError>,
    {
        let mut base = String::with_capacity(self.base.len() + prefix.len());
        base.push_str(&self.base);
        base.push_str(prefix);
        debug!(base = %base, "Mounting route group");

        let mut child = RouteScope {
            router: &mut *self.router,
            base,
        };
        f(&mut child)
    }

    /// Set the not-found handler (global, not affected by the mount prefix)
    ///
    /// # Errors
    ///
    /// Fails if `handler` is a malformed `owner@member` string.
    pub fn set_not_found(&mut self, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        self.router.set_not_found(handler)
    }

    fn register(
        &mut self,
        kind: TableKind,
        methods: &str,
        pattern: &str,
        handler: impl IntoHandlerRef,
    ) -> Result<(), RouterError> {
        // Validate everything before touching the table
        let methods = parse_methods(methods)?;
        let handler = handler.into_handler_ref()?;
        let pattern = RoutePattern::compile(&normalize(&self.base, pattern))?;

        let table = self.router.table_mut(kind);
        for method in methods {
            debug!(
                kind = ?kind,
                method = %method,
                pattern = %pattern.as_str(),
                handler = %handler.describe(),
                "Registered route"
            );
            table.push(method, RouteEntry::new(pattern.clone(), handler.clone()));
        }
        Ok(())
    }
}
