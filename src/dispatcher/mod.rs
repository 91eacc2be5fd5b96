//! # Dispatcher Module
//!
//! The dispatcher decides which handlers run for a request and with which parameters.
//!
//! ## Overview
//!
//! For every request the dispatcher:
//! - Resolves the effective method (HEAD is handled as GET, a POST may be overridden
//!   to PUT, DELETE or PATCH with `X-HTTP-Method-Override`)
//! - Computes the relative path (script directory and query string removed)
//! - Runs every matching before-middleware entry
//! - Runs the first matching primary route
//! - Falls back to the not-found handler, or reports a 404 to the transport
//!
//! ## Request Flow
//!
//! ```text
//! Request ─▶ effective method ─▶ befores (all matches) ─▶ routes (first match)
//!                                                         │
//!                         ┌───────────── matched ─────────┴──── none ──────────┐
//!                         ▼                                                    ▼
//!                   on_complete                                not_found handler / 404
//! ```
//!
//! ## Example
//!
//! ```rust
//! use routemount::dispatcher::{Dispatcher, DispatchStatus, Request};
//! use routemount::handler::HandlerRef;
//! use routemount::router::Router;
//! use http::Method;
//! use std::sync::Arc;
//!
//! let mut router = Router::new();
//! router.get(r"/(\w+)/(\w+)/.*", HandlerRef::direct(|params, out| {
//!     out.write_str(&format!("{}:{}", params.get(0).unwrap_or(""), params.get(1).unwrap_or("")));
//!     Ok(())
//! })).unwrap();
//!
//! let dispatcher = Dispatcher::new(Arc::new(router));
//! let outcome = dispatcher.dispatch(&Request::new(Method::GET, "/blog/show/42"), None).unwrap();
//! assert_eq!(outcome.status, DispatchStatus::Handled);
//! assert_eq!(outcome.body, b"blog:show");
//! ```
//!
//! ## Error Handling
//!
//! The dispatcher does not catch handler failures: they are returned from
//! [`Dispatcher::dispatch`] as-is. Deferred `owner@member` handlers that cannot be
//! resolved fail the dispatch with an unresolvable-handler error.

mod core;
mod request;

pub use core::{DispatchOutcome, DispatchStatus, Dispatcher};
pub use request::{HeaderVec, Request, MAX_INLINE_HEADERS, METHOD_OVERRIDE_HEADER};
