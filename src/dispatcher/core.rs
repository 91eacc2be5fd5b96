//! Dispatcher core module - hot path for request dispatch.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use crate::handler::{HandlerRef, HandlerResolver, ResponseBody};
use crate::pattern::Params;
use crate::router::Router;
use http::{Method, StatusCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

use super::request::Request;

/// How a dispatch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// A primary route matched and ran; the completion callback (if any) ran after it
    Handled,
    /// No primary route matched; the custom not-found handler ran
    NotFoundHandled,
    /// No primary route matched and no not-found handler is set; the transport should
    /// emit a 404
    NotFound,
}

/// Result of one [`Dispatcher::dispatch`] call
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Method used for table lookup (after HEAD and override handling)
    pub effective_method: Method,
    /// Relative path the patterns were matched against
    pub path: String,
    /// Number of before-middleware entries invoked
    pub before_handled: usize,
    /// Number of primary routes invoked (0 or 1)
    pub routes_handled: usize,
    /// Normalized pattern of the primary route that ran
    pub matched_pattern: Option<String>,
    /// Parameters passed to the primary route
    pub params: Params,
    pub status: DispatchStatus,
    /// True for HEAD requests: `body` has been discarded
    pub body_suppressed: bool,
    /// Everything handlers wrote, unless suppressed
    pub body: Vec<u8>,
}

impl DispatchOutcome {
    /// Whether the transport has to emit a not-found status itself
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == DispatchStatus::NotFound
    }

    /// Status the transport must set, if the router decides it
    ///
    /// Only the bare not-found case is decided here; otherwise handlers own the
    /// response status.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self.status {
            DispatchStatus::NotFound => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }
}

/// Runs before-middleware, the first matching route and the fallback for a request
///
/// Holds a fully populated [`Router`] behind an `Arc`, so worker threads can share one
/// dispatcher without locking. The router is never mutated after construction.
#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
    resolver: Option<Arc<dyn HandlerResolver>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        router.log_summary();
        Self {
            router,
            resolver: None,
        }
    }

    /// Attach the resolver used for `owner@member` handler references
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn HandlerResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[inline]
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch a request
    ///
    /// 1. Resolve the effective method (HEAD → GET, POST + override header).
    /// 2. Run **every** before-middleware entry whose pattern matches.
    /// 3. Run the **first** primary route whose pattern matches.
    /// 4. If none matched, run the not-found handler or report [`DispatchStatus::NotFound`];
    ///    otherwise run `on_complete`.
    ///
    /// For HEAD requests handlers still run, but everything they write is discarded.
    ///
    /// # Errors
    ///
    /// Handler failures are returned unchanged and abort the dispatch. A deferred
    /// handler that the resolver does not know fails with
    /// [`RouterError::UnresolvableHandler`](crate::RouterError::UnresolvableHandler).
    pub fn dispatch(
        &self,
        request: &Request,
        on_complete: Option<&HandlerRef>,
    ) -> anyhow::Result<DispatchOutcome> {
        let method = request.effective_method();
        let path = request.current_path();
        let span = info_span!(
            "dispatch",
            method = %request.method,
            effective_method = %method,
            path = %path
        );
        let _guard = span.enter();
        let start = Instant::now();

        let mut body = if request.suppresses_body() {
            ResponseBody::suppressed()
        } else {
            ResponseBody::new()
        };

        // Before phase: no early exit
        let mut before_handled = 0;
        for (entry, params) in self.router.matching_befores(&method, &path) {
            debug!(
                pattern = %entry.pattern().as_str(),
                handler = %entry.handler().describe(),
                "Running before-middleware"
            );
            self.invoke(entry.handler(), &params, &mut body)?;
            before_handled += 1;
        }

        // Main phase: first match wins
        let mut routes_handled = 0;
        let mut matched_pattern = None;
        let mut matched_params = Params::default();
        if let Some((entry, params)) = self.router.resolve(&method, &path) {
            self.invoke(entry.handler(), &params, &mut body)?;
            routes_handled += 1;
            matched_pattern = Some(entry.pattern().as_str().to_string());
            matched_params = params;
        }

        let status = if routes_handled == 0 {
            match self.router.not_found() {
                Some(handler) => {
                    info!(handler = %handler.describe(), "Running not-found handler");
                    self.invoke(handler, &Params::default(), &mut body)?;
                    DispatchStatus::NotFoundHandled
                }
                None => {
                    warn!("No handler for request, signalling 404");
                    DispatchStatus::NotFound
                }
            }
        } else {
            if let Some(callback) = on_complete {
                self.invoke(callback, &Params::default(), &mut body)?;
            }
            DispatchStatus::Handled
        };

        let body_suppressed = body.is_suppressed();
        let body = body.finish();

        debug!(
            status = ?status,
            before_handled,
            routes_handled,
            body_suppressed,
            duration_us = start.elapsed().as_micros(),
            "Dispatch complete"
        );

        Ok(DispatchOutcome {
            effective_method: method,
            path,
            before_handled,
            routes_handled,
            matched_pattern,
            params: matched_params,
            status,
            body_suppressed,
            body,
        })
    }

    fn invoke(
        &self,
        handler: &HandlerRef,
        params: &Params,
        body: &mut ResponseBody,
    ) -> anyhow::Result<()> {
        handler.invoke(self.resolver.as_deref(), params, body)
    }
}
