//! Router core module - route table storage and lookup.
//!
//! Registration populates the tables once at startup; dispatch only reads them.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use crate::error::RouterError;
use crate::handler::{HandlerRef, IntoHandlerRef};
use crate::pattern::{Params, RoutePattern};
use http::Method;
use smallvec::SmallVec;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::scope::RouteScope;

/// Matches slower than this are logged at WARN
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// A registered pattern and the handler it triggers
///
/// Immutable once registered.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pattern: RoutePattern,
    handler: HandlerRef,
}

impl RouteEntry {
    pub(crate) fn new(pattern: RoutePattern, handler: HandlerRef) -> Self {
        Self { pattern, handler }
    }

    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }
}

/// Ordered route entries per HTTP method
///
/// Methods are kept in first-registration order and entries in insertion order:
/// first registered, first tried.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    tables: Vec<(Method, Vec<RouteEntry>)>,
}

impl MethodTable {
    pub(crate) fn push(&mut self, method: Method, entry: RouteEntry) {
        match self.tables.iter_mut().find(|(m, _)| *m == method) {
            Some((_, entries)) => entries.push(entry),
            None => self.tables.push((method, vec![entry])),
        }
    }

    /// Entries registered for `method`, in registration order
    #[must_use]
    pub fn lookup(&self, method: &Method) -> &[RouteEntry] {
        self.tables
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    /// Every `(method, entry)` pair, grouped by method
    pub fn iter(&self) -> impl Iterator<Item = (&Method, &RouteEntry)> {
        self.tables
            .iter()
            .flat_map(|(m, entries)| entries.iter().map(move |e| (m, e)))
    }

    /// Total number of entries across all methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.iter().map(|(_, entries)| entries.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which table a registration goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableKind {
    Route,
    Before,
}

/// Route registry: primary routes, before-middleware and the not-found fallback
///
/// Construct one, populate it during startup (directly or through a route file), then
/// hand it to a [`Dispatcher`](crate::dispatcher::Dispatcher). Independent instances
/// share nothing, so tests can build as many as they like.
///
/// # Example
///
/// ```rust
/// use routemount::handler::HandlerRef;
/// use routemount::router::Router;
/// use http::Method;
///
/// let mut router = Router::new();
/// router.get("/hello", HandlerRef::direct(|_, out| {
///     out.write_str("hello world!!");
///     Ok(())
/// })).unwrap();
/// router.mount("/v1", |v1| {
///     v1.get("/users", "users@index")
/// }).unwrap();
///
/// assert!(router.resolve(&Method::GET, "/v1/users").is_some());
/// assert!(router.resolve(&Method::GET, "/users").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: MethodTable,
    befores: MethodTable,
    not_found: Option<HandlerRef>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration scope at the root (empty mount prefix)
    pub fn scope(&mut self) -> RouteScope<'_> {
        RouteScope::root(self)
    }

    /// Register a primary route for each method in a `|`-delimited list
    ///
    /// # Errors
    ///
    /// Fails on an invalid method, handler reference or pattern; nothing is
    /// registered in that case.
    pub fn add(
        &mut self,
        methods: &str,
        pattern: &str,
        handler: impl IntoHandlerRef,
    ) -> Result<(), RouterError> {
        self.scope().add(methods, pattern, handler)
    }

    /// Register before-middleware for each method in a `|`-delimited list
    ///
    /// # Errors
    ///
    /// Same as [`Router::add`].
    pub fn before(
        &mut self,
        methods: &str,
        pattern: &str,
        handler: impl IntoHandlerRef,
    ) -> Result<(), RouterError> {
        self.scope().before(methods, pattern, handler)
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
    /// See [`RouteScope::mount`].
    ///
    /// # Errors
    ///
    /// Propagates the first registration error raised inside `f`.
    pub fn mount<F>(&mut self, prefix: &str, f: F) -> Result<(), RouterError>
    where
        F: FnOnce(&mut RouteScope<'_>) -> Result<(), RouterError>,
    {
        self.scope().mount(prefix, f)
    }

    /// Set the handler run when no primary route matches
    ///
    /// # Errors
    ///
    /// Fails if `handler` is a malformed `owner@member` string.
    pub fn set_not_found(&mut self, handler: impl IntoHandlerRef) -> Result<(), RouterError> {
        let handler = handler.into_handler_ref()?;
        debug!(handler = %handler.describe(), "Registered not-found handler");
        self.not_found = Some(handler);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn not_found(&self) -> Option<&HandlerRef> {
        self.not_found.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn routes(&self) -> &MethodTable {
        &self.routes
    }

    #[inline]
    #[must_use]
    pub fn befores(&self) -> &MethodTable {
        &self.befores
    }

    pub(crate) fn table_mut(&mut self, kind: TableKind) -> &mut MethodTable {
        match kind {
            TableKind::Route => &mut self.routes,
            TableKind::Before => &mut self.befores,
        }
    }

    /// Find the first primary route for `method` that matches `path`
    ///
    /// Routes are tried in registration order; the first match wins.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<(&RouteEntry, Params)> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();
        let result = self
            .routes
            .lookup(method)
            .iter()
            .find_map(|entry| entry.pattern.match_path(path).map(|params| (entry, params)));
        let match_duration = match_start.elapsed();

        match &result {
            Some((entry, params)) => {
                if match_duration > SLOW_MATCH {
                    warn!(
                        method = %method,
                        path = %path,
                        route_pattern = %entry.pattern.as_str(),
                        handler = %entry.handler.describe(),
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        route_pattern = %entry.pattern.as_str(),
                        handler = %entry.handler.describe(),
                        path_params = ?params.as_slice(),
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
            }
            None => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }

        result
    }

    /// Every before-middleware entry for `method` that matches `path`, in order
    pub fn matching_befores<'a>(
        &'a self,
        method: &Method,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a RouteEntry, Params)> + 'a {
        self.befores
            .lookup(method)
            .iter()
            .filter_map(move |entry| entry.pattern.match_path(path).map(|params| (entry, params)))
    }

    /// One line per registered entry: `[kind] METHOD pattern -> handler`
    #[must_use]
    pub fn route_lines(&self) -> Vec<String> {
        let befores = self.befores.iter().map(|(m, e)| ("before", m, e));
        let routes = self.routes.iter().map(|(m, e)| ("route", m, e));
        let mut lines: Vec<String> = befores
            .chain(routes)
            .map(|(kind, method, entry)| {
                format!(
                    "[{kind}] {method} {} -> {}",
                    entry.pattern.as_str(),
                    entry.handler.describe()
                )
            })
            .collect();
        if let Some(handler) = &self.not_found {
            lines.push(format!("[not_found] -> {}", handler.describe()));
        }
        lines
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!(
            "[routes] count={} before_count={}",
            self.routes.len(),
            self.befores.len()
        );
        for line in self.route_lines() {
            println!("{line}");
        }
    }

    /// Log a summary of the loaded table
    pub fn log_summary(&self) {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|(method, entry)| format!("{} {}", method, entry.pattern.as_str()))
            .collect();

        info!(
            routes_count = self.routes.len(),
            before_count = self.befores.len(),
            has_not_found = self.not_found.is_some(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }
}

/// Parse a `GET|POST` style method list
///
/// Names are trimmed and upper-cased; duplicates are kept so each registration lands
/// in the table exactly as listed.
pub(crate) fn parse_methods(methods: &str) -> Result<SmallVec<[Method; 4]>, RouterError> {
    methods
        .split('|')
        .map(|raw| {
            let name = raw.trim().to_ascii_uppercase();
            if name.is_empty() {
                return Err(RouterError::InvalidMethod {
                    method: raw.to_string(),
                });
            }
            Method::from_bytes(name.as_bytes()).map_err(|_| RouterError::InvalidMethod {
                method: raw.to_string(),
            })
        })
        .collect()
}
